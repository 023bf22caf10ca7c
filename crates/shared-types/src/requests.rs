use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::case::Participant;
use crate::document::{DocumentAccess, DocumentPermissions};
use crate::identity::WalletAddress;

/// Request DTO for `POST /case/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCaseRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub court_name: String,
}

/// Request DTO for `PATCH /case/grant-access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantAccessRequest {
    pub case_id: String,
    pub participant: Participant,
}

/// Request DTO for `PATCH /case/revoke-access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeAccessRequest {
    pub case_id: String,
    pub wallet: WalletAddress,
}

/// Request DTO for `PATCH /case/change-admin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAdminRequest {
    pub case_id: String,
    pub new_admin_wallet: WalletAddress,
}

/// Request DTO for `POST /case-doc/upload` — metadata registration after
/// the blob itself has been pinned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UploadDocumentRequest {
    pub case_id: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    pub file_type: String,
    pub file_size: i64,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "IPFS CID is required"))
    )]
    pub ipfs_cid: String,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub access_control: Vec<DocumentAccess>,
}

/// Request DTO for `PATCH /case-doc/:id/grant-access` and
/// `PATCH /case-doc/:id/revoke-access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAccessRequest {
    pub target_wallet: WalletAddress,
    pub permissions: DocumentPermissions,
}
