use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::WalletAddress;
use crate::role::ParticipantRole;

// ── Participants ────────────────────────────────────────────────────

/// View/upload grants for a case participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePermissions {
    pub can_view: bool,
    pub can_upload: bool,
}

impl Default for CasePermissions {
    /// New participants can view but not upload until the admin says so.
    fn default() -> Self {
        Self {
            can_view: true,
            can_upload: false,
        }
    }
}

/// A non-admin wallet attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub wallet: WalletAddress,
    #[serde(default)]
    pub role: ParticipantRole,
    #[serde(default)]
    pub permissions: CasePermissions,
}

/// One entry in the append-only admin handover log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminChange {
    pub wallet: WalletAddress,
    pub changed_at: DateTime<Utc>,
}

// ── Case ────────────────────────────────────────────────────────────

/// A legal matter record: exactly one admin plus a participant roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub case_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub court_name: String,
    pub admin: WalletAddress,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Monotonic: once closed, a case never reopens.
    #[serde(default)]
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
    /// Append-only, first entry is the creator.
    #[serde(default)]
    pub admin_history: Vec<AdminChange>,
}

impl Case {
    /// Look up a participant entry by wallet (case-insensitive by
    /// construction of `WalletAddress`).
    pub fn participant(&self, wallet: &WalletAddress) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.wallet == wallet)
    }

    /// The wallet that created the case, if the history is populated.
    pub fn creator(&self) -> Option<&WalletAddress> {
        self.admin_history.first().map(|c| &c.wallet)
    }
}

// ── API response shapes ─────────────────────────────────────────────

/// `GET /case` — every case the caller owns or participates in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseListResponse {
    #[serde(default)]
    pub owned_cases: Vec<Case>,
    #[serde(default)]
    pub participating_cases: Vec<Case>,
}

/// `GET /case/:id` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEnvelope {
    #[serde(rename = "case")]
    pub case_record: Case,
}

/// `POST /case/create` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseResponse {
    pub case_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generic acknowledgement returned by the mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
