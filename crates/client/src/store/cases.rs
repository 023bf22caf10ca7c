use std::future::Future;
use std::sync::{Arc, RwLock};

use shared_types::{
    AppError, Case, CreateCaseRequest, CreateCaseResponse, MutationAck, Participant, WalletAddress,
};

use super::invalidation::{CaseMutation, Collection};
use super::Fence;
use crate::api::cases::CaseApi;
use crate::flash::FlashRelay;
use crate::session::Session;

/// Cached case collections plus the shared loading/error flags for the
/// case resource type.
#[derive(Clone, Debug, Default)]
pub struct CaseState {
    pub owned_cases: Vec<Case>,
    pub participating_cases: Vec<Case>,
    pub current_case: Option<Case>,
    pub loading: bool,
    pub error: Option<AppError>,
}

/// Holds the authoritative-but-cached case collections and issues intents
/// against the backend. Reads are snapshots; writes happen only through the
/// fetch and mutation methods here.
pub struct CaseStore<A: CaseApi> {
    api: A,
    session: Session,
    flash: FlashRelay,
    state: Arc<RwLock<CaseState>>,
    list_fence: Fence,
    current_fence: Fence,
}

impl<A: CaseApi> CaseStore<A> {
    pub fn new(api: A, session: Session, flash: FlashRelay) -> Self {
        Self {
            api,
            session,
            flash,
            state: Arc::new(RwLock::new(CaseState::default())),
            list_fence: Fence::default(),
            current_fence: Fence::default(),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CaseState {
        self.state.read().expect("case state lock poisoned").clone()
    }

    pub fn current_case(&self) -> Option<Case> {
        self.state
            .read()
            .expect("case state lock poisoned")
            .current_case
            .clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().expect("case state lock poisoned").loading
    }

    pub fn error(&self) -> Option<AppError> {
        self.state
            .read()
            .expect("case state lock poisoned")
            .error
            .clone()
    }

    /// Distinct "not found" state: the last case fetch came back 404, as
    /// opposed to still loading or a generic error.
    pub fn case_not_found(&self) -> bool {
        self.error().is_some_and(|e| e.is_not_found())
    }

    // ── Fetches ─────────────────────────────────────────────────────

    /// Replace both case lists wholesale. No-ops when unauthenticated; on
    /// failure the previous collections stay untouched.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_cases(&self) {
        if !self.session.is_authenticated() {
            return;
        }
        let ticket = self.list_fence.begin();
        self.begin_load();

        match self.api.list_cases().await {
            Ok(list) => {
                let mut state = self.state.write().expect("case state lock poisoned");
                if self.list_fence.try_apply(ticket) {
                    state.owned_cases = list.owned_cases;
                    state.participating_cases = list.participating_cases;
                } else {
                    tracing::warn!("Discarding stale case list response");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch cases");
                self.set_error(e);
                self.flash.error("Failed to load cases");
            }
        }
        self.end_load();
    }

    /// Replace `current_case`; returns the fetched case, or `None` on
    /// failure (including not-found, which is queryable afterwards via
    /// [`CaseStore::case_not_found`]).
    #[tracing::instrument(skip(self))]
    pub async fn fetch_case_by_id(&self, case_id: &str) -> Option<Case> {
        if !self.session.is_authenticated() {
            return None;
        }
        let ticket = self.current_fence.begin();
        self.begin_load();

        let result = match self.api.get_case(case_id).await {
            Ok(case) => {
                let mut state = self.state.write().expect("case state lock poisoned");
                if self.current_fence.try_apply(ticket) {
                    state.current_case = Some(case.clone());
                } else {
                    tracing::warn!(case_id, "Discarding stale case response");
                }
                Some(case)
            }
            Err(e) => {
                tracing::error!(error = %e, case_id, "Failed to fetch case");
                let text = e
                    .server_message()
                    .unwrap_or("Failed to load case details")
                    .to_string();
                self.set_error(e);
                self.flash.error(text);
                None
            }
        };
        self.end_load();
        result
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub async fn create_case(&self, req: &CreateCaseRequest) -> Result<CreateCaseResponse, AppError> {
        self.run_mutation(CaseMutation::Create, None, self.api.create_case(req))
            .await
    }

    pub async fn grant_access(
        &self,
        case_id: &str,
        participant: &Participant,
    ) -> Result<MutationAck, AppError> {
        self.run_mutation(
            CaseMutation::GrantAccess,
            Some(case_id),
            self.api.grant_access(case_id, participant),
        )
        .await
    }

    pub async fn revoke_access(
        &self,
        case_id: &str,
        wallet: &WalletAddress,
    ) -> Result<MutationAck, AppError> {
        self.run_mutation(
            CaseMutation::RevokeAccess,
            Some(case_id),
            self.api.revoke_access(case_id, wallet),
        )
        .await
    }

    /// Transfer admin. Atomic from the caller's point of view: once this
    /// returns Ok the refetched state shows the new admin, with no
    /// intermediate where both or neither hold the role.
    pub async fn change_admin(
        &self,
        case_id: &str,
        new_admin: &WalletAddress,
    ) -> Result<MutationAck, AppError> {
        self.run_mutation(
            CaseMutation::ChangeAdmin,
            Some(case_id),
            self.api.change_admin(case_id, new_admin),
        )
        .await
    }

    pub async fn close_case(&self, case_id: &str) -> Result<MutationAck, AppError> {
        self.run_mutation(
            CaseMutation::Close,
            Some(case_id),
            self.api.close_case(case_id),
        )
        .await
    }

    /// Drop all cached case state, e.g. at logout. Late responses from
    /// requests still in flight are fenced out.
    pub fn reset(&self) {
        self.list_fence.invalidate_pending();
        self.current_fence.invalidate_pending();
        let mut state = self.state.write().expect("case state lock poisoned");
        *state = CaseState::default();
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Uniform mutation protocol: loading on + error cleared, call the API,
    /// on success flash + refetch the collections the invalidation table
    /// names, on failure flash the server message (or the per-operation
    /// fallback) and record the error. Loading always ends false.
    async fn run_mutation<T, Fut>(
        &self,
        mutation: CaseMutation,
        case_id: Option<&str>,
        call: Fut,
    ) -> Result<T, AppError>
    where
        Fut: Future<Output = Result<T, AppError>>,
    {
        self.begin_load();
        let result = call.await;

        match &result {
            Ok(_) => {
                tracing::info!(?mutation, case_id, "Case mutation succeeded");
                self.flash.success(mutation.success_message());
                for collection in mutation.invalidates() {
                    self.refetch(*collection, case_id).await;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, ?mutation, case_id, "Case mutation failed");
                let text = e
                    .server_message()
                    .unwrap_or(mutation.failure_message())
                    .to_string();
                self.set_error(e.clone());
                self.flash.error(text);
            }
        }

        self.end_load();
        result
    }

    async fn refetch(&self, collection: Collection, case_id: Option<&str>) {
        match collection {
            Collection::CaseList => self.fetch_cases().await,
            Collection::CurrentCase => {
                // Only refresh when the mutated case is the one on screen.
                let matches = match (case_id, self.current_case()) {
                    (Some(id), Some(current)) => current.case_id == id,
                    _ => false,
                };
                if let (true, Some(id)) = (matches, case_id) {
                    self.fetch_case_by_id(id).await;
                }
            }
            // Document collections belong to the document store.
            Collection::Documents | Collection::DocumentLogs => {}
        }
    }

    // ── Flag plumbing ───────────────────────────────────────────────

    fn begin_load(&self) {
        let mut state = self.state.write().expect("case state lock poisoned");
        state.loading = true;
        state.error = None;
    }

    fn end_load(&self) {
        let mut state = self.state.write().expect("case state lock poisoned");
        state.loading = false;
    }

    fn set_error(&self, error: AppError) {
        let mut state = self.state.write().expect("case state lock poisoned");
        state.error = Some(error);
    }
}
