//! Scripted fakes for the API ports and the blob store, shared by the
//! store integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use client::api::cases::CaseApi;
use client::api::documents::DocumentApi;
use client::flash::FlashRelay;
use client::ipfs::{BlobStore, FileData, PinMetadata, PinReceipt};
use client::session::Session;
use shared_types::{
    AppError, Case, CaseListResponse, CasePermissions, CreateCaseRequest, CreateCaseResponse,
    Document, DocumentLog, DocumentPermissions, MutationAck, Participant, ParticipantRole,
    UploadDocumentRequest, WalletAddress,
};

pub const ADMIN: &str = "0xAAaa000000000000000000000000000000000001";
pub const LAWYER: &str = "0xbbbb000000000000000000000000000000000002";
pub const OTHER: &str = "0xcccc000000000000000000000000000000000003";

pub fn wallet(s: &str) -> WalletAddress {
    WalletAddress::parse(s).unwrap()
}

pub fn authed_session(wallet_hex: &str) -> Session {
    let session = Session::new();
    session.init("test-jwt", wallet(wallet_hex));
    session
}

pub fn make_case(case_id: &str, admin: &str, closed: bool) -> Case {
    Case {
        case_id: case_id.into(),
        title: format!("Case {}", case_id),
        description: String::new(),
        court_name: "Westfield District Court".into(),
        admin: wallet(admin),
        participants: vec![],
        is_closed: closed,
        created_at: Utc::now(),
        admin_history: vec![],
    }
}

pub fn make_participant(wallet_hex: &str, can_upload: bool) -> Participant {
    Participant {
        wallet: wallet(wallet_hex),
        role: ParticipantRole::Lawyer,
        permissions: CasePermissions {
            can_view: true,
            can_upload,
        },
    }
}

pub fn make_document(id: &str, case_id: &str, uploader: &str) -> Document {
    Document {
        id: id.into(),
        case_id: case_id.into(),
        title: format!("Document {}", id),
        file_type: "application/pdf".into(),
        file_size: 2048,
        ipfs_cid: format!("bafy-{}", id),
        uploaded_by: wallet(uploader),
        created_at: Utc::now(),
        access_control: vec![],
    }
}

pub fn pdf_file(name: &str, len: usize) -> FileData {
    FileData {
        name: name.into(),
        content_type: "application/pdf".into(),
        bytes: vec![0u8; len],
    }
}

/// One scripted reply, optionally resolving only after a simulated delay.
struct Scripted<T> {
    delay: Duration,
    result: Result<T, AppError>,
}

struct Queue<T>(Mutex<VecDeque<Scripted<T>>>);

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self(Mutex::new(VecDeque::new()))
    }
}

impl<T> Queue<T> {
    fn push(&self, result: Result<T, AppError>) {
        self.push_delayed(Duration::ZERO, result);
    }

    fn push_delayed(&self, delay: Duration, result: Result<T, AppError>) {
        self.0
            .lock()
            .unwrap()
            .push_back(Scripted { delay, result });
    }

    fn pop(&self) -> Option<Scripted<T>> {
        self.0.lock().unwrap().pop_front()
    }

    async fn take(&self, method: &str) -> Result<T, AppError> {
        let scripted = self
            .pop()
            .unwrap_or_else(|| panic!("no scripted response for {}", method));
        if scripted.delay > Duration::ZERO {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

// ── FakeCaseApi ─────────────────────────────────────────────────────

#[derive(Default)]
struct CaseQueues {
    list: Queue<CaseListResponse>,
    case: Queue<Case>,
    create: Queue<CreateCaseResponse>,
    ack: Queue<MutationAck>,
    calls: Mutex<Vec<String>>,
}

/// Scripted [`CaseApi`]: each method pops its next reply off a queue and
/// records the call. `list_cases` returns an empty list when unscripted so
/// table-driven refetches don't need boilerplate.
#[derive(Clone, Default)]
pub struct FakeCaseApi {
    inner: Arc<CaseQueues>,
}

impl FakeCaseApi {
    pub fn script_list(&self, result: Result<CaseListResponse, AppError>) {
        self.inner.list.push(result);
    }

    pub fn script_list_delayed(&self, delay: Duration, result: Result<CaseListResponse, AppError>) {
        self.inner.list.push_delayed(delay, result);
    }

    pub fn script_case(&self, result: Result<Case, AppError>) {
        self.inner.case.push(result);
    }

    pub fn script_create(&self, result: Result<CreateCaseResponse, AppError>) {
        self.inner.create.push(result);
    }

    pub fn script_ack(&self, result: Result<MutationAck, AppError>) {
        self.inner.ack.push(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.inner.calls.lock().unwrap().push(call.into());
    }
}

impl CaseApi for FakeCaseApi {
    async fn list_cases(&self) -> Result<CaseListResponse, AppError> {
        self.record("list_cases");
        if self.inner.list.0.lock().unwrap().is_empty() {
            return Ok(CaseListResponse::default());
        }
        self.inner.list.take("list_cases").await
    }

    async fn get_case(&self, case_id: &str) -> Result<Case, AppError> {
        self.record(format!("get_case:{}", case_id));
        self.inner.case.take("get_case").await
    }

    async fn create_case(&self, req: &CreateCaseRequest) -> Result<CreateCaseResponse, AppError> {
        self.record(format!("create_case:{}", req.title));
        self.inner.create.take("create_case").await
    }

    async fn grant_access(
        &self,
        case_id: &str,
        participant: &Participant,
    ) -> Result<MutationAck, AppError> {
        self.record(format!("grant_access:{}:{}", case_id, participant.wallet));
        self.inner.ack.take("grant_access").await
    }

    async fn revoke_access(
        &self,
        case_id: &str,
        wallet: &WalletAddress,
    ) -> Result<MutationAck, AppError> {
        self.record(format!("revoke_access:{}:{}", case_id, wallet));
        self.inner.ack.take("revoke_access").await
    }

    async fn change_admin(
        &self,
        case_id: &str,
        new_admin: &WalletAddress,
    ) -> Result<MutationAck, AppError> {
        self.record(format!("change_admin:{}:{}", case_id, new_admin));
        self.inner.ack.take("change_admin").await
    }

    async fn close_case(&self, case_id: &str) -> Result<MutationAck, AppError> {
        self.record(format!("close_case:{}", case_id));
        self.inner.ack.take("close_case").await
    }
}

// ── FakeDocumentApi ─────────────────────────────────────────────────

#[derive(Default)]
struct DocumentQueues {
    list: Queue<Vec<Document>>,
    view: Queue<Document>,
    logs: Queue<Vec<DocumentLog>>,
    ack: Queue<MutationAck>,
    uploads: Mutex<Vec<UploadDocumentRequest>>,
    calls: Mutex<Vec<String>>,
}

/// Scripted [`DocumentApi`], recording upload request bodies for
/// assertions.
#[derive(Clone, Default)]
pub struct FakeDocumentApi {
    inner: Arc<DocumentQueues>,
}

impl FakeDocumentApi {
    pub fn script_list(&self, result: Result<Vec<Document>, AppError>) {
        self.inner.list.push(result);
    }

    pub fn script_list_delayed(&self, delay: Duration, result: Result<Vec<Document>, AppError>) {
        self.inner.list.push_delayed(delay, result);
    }

    pub fn script_view(&self, result: Result<Document, AppError>) {
        self.inner.view.push(result);
    }

    pub fn script_logs(&self, result: Result<Vec<DocumentLog>, AppError>) {
        self.inner.logs.push(result);
    }

    pub fn script_ack(&self, result: Result<MutationAck, AppError>) {
        self.inner.ack.push(result);
    }

    pub fn uploads(&self) -> Vec<UploadDocumentRequest> {
        self.inner.uploads.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.inner.calls.lock().unwrap().push(call.into());
    }
}

impl DocumentApi for FakeDocumentApi {
    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, AppError> {
        self.record(format!("list_documents:{}", case_id));
        if self.inner.list.0.lock().unwrap().is_empty() {
            return Ok(Vec::new());
        }
        self.inner.list.take("list_documents").await
    }

    async fn view_document(&self, doc_id: &str) -> Result<Document, AppError> {
        self.record(format!("view_document:{}", doc_id));
        self.inner.view.take("view_document").await
    }

    async fn upload_document(&self, req: &UploadDocumentRequest) -> Result<MutationAck, AppError> {
        self.record(format!("upload_document:{}", req.case_id));
        self.inner.uploads.lock().unwrap().push(req.clone());
        self.inner.ack.take("upload_document").await
    }

    async fn delete_document(&self, doc_id: &str) -> Result<MutationAck, AppError> {
        self.record(format!("delete_document:{}", doc_id));
        self.inner.ack.take("delete_document").await
    }

    async fn document_logs(&self, doc_id: &str) -> Result<Vec<DocumentLog>, AppError> {
        self.record(format!("document_logs:{}", doc_id));
        self.inner.logs.take("document_logs").await
    }

    async fn grant_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        _permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError> {
        self.record(format!("grant_access:{}:{}", doc_id, target));
        self.inner.ack.take("grant_access").await
    }

    async fn revoke_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        _permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError> {
        self.record(format!("revoke_access:{}:{}", doc_id, target));
        self.inner.ack.take("revoke_access").await
    }
}

// ── FakeBlobStore ───────────────────────────────────────────────────

#[derive(Default)]
struct BlobQueues {
    upload: Queue<PinReceipt>,
    calls: Mutex<Vec<String>>,
}

/// Scripted [`BlobStore`].
#[derive(Clone, Default)]
pub struct FakeBlobStore {
    inner: Arc<BlobQueues>,
}

impl FakeBlobStore {
    pub fn script_upload(&self, result: Result<PinReceipt, AppError>) {
        self.inner.upload.push(result);
    }

    pub fn receipt(cid: &str) -> PinReceipt {
        PinReceipt {
            ipfs_cid: cid.into(),
            pin_size: 2048,
            timestamp: "2026-02-11T09:00:00Z".into(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl BlobStore for FakeBlobStore {
    async fn upload_file(
        &self,
        file: &FileData,
        metadata: &PinMetadata,
    ) -> Result<PinReceipt, AppError> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push(format!("upload_file:{}:{}", metadata.case_id, file.name));
        self.inner.upload.take("upload_file").await
    }

    fn file_url(&self, cid: &str) -> String {
        format!("https://gateway.test/ipfs/{}", cid)
    }

    async fn unpin(&self, cid: &str) -> Result<(), AppError> {
        self.inner.calls.lock().unwrap().push(format!("unpin:{}", cid));
        Ok(())
    }
}

/// Session + relay pair most tests start from.
pub fn harness() -> (Session, FlashRelay) {
    (authed_session(ADMIN), FlashRelay::new())
}
