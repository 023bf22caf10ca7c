use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::WalletAddress;
use crate::role::ParticipantRole;

// ── Access control ──────────────────────────────────────────────────

/// Per-document view/delete grants, independent of the owning case's
/// participant roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPermissions {
    pub can_view: bool,
    pub can_delete: bool,
}

/// One wallet's entry in a document's access list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAccess {
    pub wallet: WalletAddress,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_delete: bool,
}

// ── Document ────────────────────────────────────────────────────────

/// A file reference scoped to a case. The bytes live in the blob store,
/// keyed by `ipfs_cid`; this record is metadata only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub case_id: String,
    pub title: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: i64,
    /// Content hash into the blob store, immutable once set.
    pub ipfs_cid: String,
    pub uploaded_by: WalletAddress,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub access_control: Vec<DocumentAccess>,
}

impl Document {
    pub fn access_for(&self, wallet: &WalletAddress) -> Option<&DocumentAccess> {
        self.access_control.iter().find(|a| &a.wallet == wallet)
    }
}

// ── Audit log ───────────────────────────────────────────────────────

/// The actions the backend records against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentAction {
    Uploaded,
    Viewed,
    Deleted,
    Shared,
    Revoked,
}

/// Append-only audit entry, one per document action. Never mutated or
/// deleted; displayed newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLog {
    pub action: DocumentAction,
    pub user_wallet: WalletAddress,
    #[serde(default)]
    pub user_role: ParticipantRole,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── API response shapes ─────────────────────────────────────────────

/// `GET /case-doc/:caseId` — all documents on a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// `GET /case-doc/:id/view` envelope. The backend strips server-internal
/// fields before returning, hence "sanitized".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDocumentResponse {
    pub sanitized_document: Document,
}

/// `GET /case-doc/:id/logs` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLogsResponse {
    #[serde(default)]
    pub logs: Vec<DocumentLog>,
}
