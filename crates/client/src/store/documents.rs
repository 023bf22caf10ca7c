use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use shared_types::{
    AppError, Document, DocumentAccess, DocumentLog, DocumentPermissions, MutationAck,
    UploadDocumentRequest, WalletAddress,
};

use super::invalidation::{Collection, DocumentMutation};
use super::Fence;
use crate::api::documents::DocumentApi;
use crate::flash::FlashRelay;
use crate::ipfs::{BlobStore, FileData, PinMetadata};
use crate::session::Session;

/// Progress snaps back to zero this long after an upload finishes, so the
/// UI gets a beat to show the full bar.
pub const PROGRESS_RESET_DELAY: Duration = Duration::from_secs(1);

/// Cached document collections for whichever case/document was last
/// fetched, plus the shared loading/error flags for the document resource
/// type and the upload progress gauge.
#[derive(Clone, Debug, Default)]
pub struct DocumentState {
    pub documents: Vec<Document>,
    /// The case `documents` is scoped to.
    pub case_scope: Option<String>,
    pub current_document: Option<Document>,
    /// Newest first.
    pub document_logs: Vec<DocumentLog>,
    pub loading: bool,
    pub error: Option<AppError>,
    /// 0–100; blob upload covers roughly the first 60, metadata
    /// registration the rest.
    pub upload_progress: u8,
}

/// Cached documents and logs plus the two-step upload orchestration
/// against the blob store and the records API.
pub struct DocumentStore<A: DocumentApi, B: BlobStore> {
    api: A,
    blob: B,
    session: Session,
    flash: FlashRelay,
    state: Arc<RwLock<DocumentState>>,
    documents_fence: Fence,
    current_fence: Fence,
    logs_fence: Fence,
}

impl<A: DocumentApi, B: BlobStore> DocumentStore<A, B> {
    pub fn new(api: A, blob: B, session: Session, flash: FlashRelay) -> Self {
        Self {
            api,
            blob,
            session,
            flash,
            state: Arc::new(RwLock::new(DocumentState::default())),
            documents_fence: Fence::default(),
            current_fence: Fence::default(),
            logs_fence: Fence::default(),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> DocumentState {
        self.state
            .read()
            .expect("document state lock poisoned")
            .clone()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.state
            .read()
            .expect("document state lock poisoned")
            .documents
            .clone()
    }

    pub fn loading(&self) -> bool {
        self.state
            .read()
            .expect("document state lock poisoned")
            .loading
    }

    pub fn error(&self) -> Option<AppError> {
        self.state
            .read()
            .expect("document state lock poisoned")
            .error
            .clone()
    }

    pub fn upload_progress(&self) -> u8 {
        self.state
            .read()
            .expect("document state lock poisoned")
            .upload_progress
    }

    /// Gateway URL for a document's content; the UI turns this into a
    /// download link.
    pub fn download_url(&self, cid: &str) -> String {
        self.blob.file_url(cid)
    }

    // ── Fetches ─────────────────────────────────────────────────────

    /// Replace the document list with the given case's documents. No-ops
    /// when unauthenticated; returns the fetched list, or empty on failure
    /// with the previous collection left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_case_documents(&self, case_id: &str) -> Vec<Document> {
        if !self.session.is_authenticated() {
            return Vec::new();
        }
        let ticket = self.documents_fence.begin();
        self.begin_load();

        let result = match self.api.list_documents(case_id).await {
            Ok(documents) => {
                let mut state = self.state.write().expect("document state lock poisoned");
                if self.documents_fence.try_apply(ticket) {
                    state.documents = documents.clone();
                    state.case_scope = Some(case_id.to_string());
                } else {
                    tracing::warn!(case_id, "Discarding stale document list response");
                }
                documents
            }
            Err(e) => {
                tracing::error!(error = %e, case_id, "Failed to fetch documents");
                let text = e
                    .server_message()
                    .unwrap_or("Failed to load documents")
                    .to_string();
                self.set_error(e);
                self.flash.error(text);
                Vec::new()
            }
        };
        self.end_load();
        result
    }

    /// Fetch one document for viewing (the backend logs the view) and make
    /// it the current document.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_document(&self, doc_id: &str) -> Option<Document> {
        if !self.session.is_authenticated() {
            return None;
        }
        let ticket = self.current_fence.begin();
        self.begin_load();

        let result = match self.api.view_document(doc_id).await {
            Ok(document) => {
                let mut state = self.state.write().expect("document state lock poisoned");
                if self.current_fence.try_apply(ticket) {
                    state.current_document = Some(document.clone());
                } else {
                    tracing::warn!(doc_id, "Discarding stale document response");
                }
                Some(document)
            }
            Err(e) => {
                tracing::error!(error = %e, doc_id, "Failed to fetch document");
                let text = e
                    .server_message()
                    .unwrap_or("Failed to load document")
                    .to_string();
                self.set_error(e);
                self.flash.error(text);
                None
            }
        };
        self.end_load();
        result
    }

    /// Replace the audit log collection for one document, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_document_logs(&self, doc_id: &str) -> Vec<DocumentLog> {
        if !self.session.is_authenticated() {
            return Vec::new();
        }
        let ticket = self.logs_fence.begin();
        self.begin_load();

        let result = match self.api.document_logs(doc_id).await {
            Ok(mut logs) => {
                logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                let mut state = self.state.write().expect("document state lock poisoned");
                if self.logs_fence.try_apply(ticket) {
                    state.document_logs = logs.clone();
                } else {
                    tracing::warn!(doc_id, "Discarding stale document log response");
                }
                logs
            }
            Err(e) => {
                tracing::error!(error = %e, doc_id, "Failed to fetch document logs");
                let text = e
                    .server_message()
                    .unwrap_or("Failed to load document logs")
                    .to_string();
                self.set_error(e);
                self.flash.error(text);
                Vec::new()
            }
        };
        self.end_load();
        result
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Two-step upload: pin the bytes, then register the metadata. If the
    /// second step fails the pinned blob is simply orphaned — the document
    /// list is only refetched on full success.
    pub async fn upload_document(
        &self,
        case_id: &str,
        title: &str,
        file: FileData,
        access_control: Vec<DocumentAccess>,
    ) -> Result<MutationAck, AppError> {
        self.begin_load();
        self.set_progress(0);

        let result = self.upload_steps(case_id, title, &file, access_control).await;

        match &result {
            Ok(_) => {
                tracing::info!(case_id, "Document uploaded");
                self.flash.success(DocumentMutation::Upload.success_message());
                self.refetch(DocumentMutation::Upload, Some(case_id)).await;
            }
            Err(e) => {
                tracing::error!(error = %e, case_id, "Document upload failed");
                let text = e
                    .server_message()
                    .unwrap_or(DocumentMutation::Upload.failure_message())
                    .to_string();
                self.set_error(e.clone());
                self.flash.error(text);
            }
        }

        self.end_load();
        self.schedule_progress_reset();
        result
    }

    async fn upload_steps(
        &self,
        case_id: &str,
        title: &str,
        file: &FileData,
        access_control: Vec<DocumentAccess>,
    ) -> Result<MutationAck, AppError> {
        let title = if title.trim().is_empty() {
            file.name.clone()
        } else {
            title.to_string()
        };

        self.set_progress(10);
        let metadata = PinMetadata {
            name: title.clone(),
            case_id: case_id.to_string(),
        };
        let receipt = self.blob.upload_file(file, &metadata).await?;
        self.set_progress(60);

        let request = UploadDocumentRequest {
            case_id: case_id.to_string(),
            title,
            file_type: file.content_type.clone(),
            file_size: file.bytes.len() as i64,
            ipfs_cid: receipt.ipfs_cid,
            encrypted: false,
            access_control,
        };
        self.set_progress(80);
        let ack = self.api.upload_document(&request).await?;
        self.set_progress(100);
        Ok(ack)
    }

    pub async fn delete_document(&self, doc_id: &str) -> Result<MutationAck, AppError> {
        // The owning case, for the post-delete refetch.
        let case_id = self
            .state
            .read()
            .expect("document state lock poisoned")
            .documents
            .iter()
            .find(|d| d.id == doc_id)
            .map(|d| d.case_id.clone());

        self.run_mutation(
            DocumentMutation::Delete,
            case_id.as_deref(),
            self.api.delete_document(doc_id),
        )
        .await
    }

    pub async fn grant_document_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError> {
        self.run_mutation(
            DocumentMutation::GrantAccess,
            None,
            self.api.grant_access(doc_id, target, permissions),
        )
        .await
    }

    pub async fn revoke_document_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError> {
        self.run_mutation(
            DocumentMutation::RevokeAccess,
            None,
            self.api.revoke_access(doc_id, target, permissions),
        )
        .await
    }

    /// Drop all cached document state, e.g. at logout. Late responses from
    /// requests still in flight are fenced out.
    pub fn reset(&self) {
        self.documents_fence.invalidate_pending();
        self.current_fence.invalidate_pending();
        self.logs_fence.invalidate_pending();
        let mut state = self.state.write().expect("document state lock poisoned");
        *state = DocumentState::default();
    }

    // ── Dispatch ────────────────────────────────────────────────────

    async fn run_mutation<T, Fut>(
        &self,
        mutation: DocumentMutation,
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
                tracing::info!(?mutation, case_id, "Document mutation succeeded");
                self.flash.success(mutation.success_message());
                self.refetch(mutation, case_id).await;
            }
            Err(e) => {
                tracing::error!(error = %e, ?mutation, case_id, "Document mutation failed");
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

    async fn refetch(&self, mutation: DocumentMutation, case_id: Option<&str>) {
        for collection in mutation.invalidates() {
            if let (Collection::Documents, Some(id)) = (*collection, case_id) {
                self.fetch_case_documents(id).await;
            }
        }
    }

    // ── Flag plumbing ───────────────────────────────────────────────

    fn begin_load(&self) {
        let mut state = self.state.write().expect("document state lock poisoned");
        state.loading = true;
        state.error = None;
    }

    fn end_load(&self) {
        let mut state = self.state.write().expect("document state lock poisoned");
        state.loading = false;
    }

    fn set_error(&self, error: AppError) {
        let mut state = self.state.write().expect("document state lock poisoned");
        state.error = Some(error);
    }

    fn set_progress(&self, progress: u8) {
        let mut state = self.state.write().expect("document state lock poisoned");
        state.upload_progress = progress;
    }

    fn schedule_progress_reset(&self) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(PROGRESS_RESET_DELAY).await;
            state.write().expect("document state lock poisoned").upload_progress = 0;
        });
    }
}
