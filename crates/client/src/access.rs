//! Pure capability evaluation: identity + case (+ document) in, booleans
//! out. No I/O, nothing stored — the backend re-checks everything anyway,
//! this is only what the client is allowed to offer.

use shared_types::{Case, Document, WalletAddress};

/// The current identity, absent when no wallet is connected. Every
/// capability is false for an absent identity.
pub type Identity<'a> = Option<&'a WalletAddress>;

pub fn is_admin(identity: Identity<'_>, case: &Case) -> bool {
    identity.is_some_and(|w| *w == case.admin)
}

pub fn is_participant(identity: Identity<'_>, case: &Case) -> bool {
    identity.is_some_and(|w| case.participant(w).is_some())
}

/// Admins and participants can always see the case itself; closure never
/// revokes read access.
pub fn can_view_case(identity: Identity<'_>, case: &Case) -> bool {
    is_admin(identity, case) || is_participant(identity, case)
}

pub fn can_upload_document(identity: Identity<'_>, case: &Case) -> bool {
    if case.is_closed {
        return false;
    }
    if is_admin(identity, case) {
        return true;
    }
    identity
        .and_then(|w| case.participant(w))
        .is_some_and(|p| p.permissions.can_upload)
}

/// Admins may delete anything on an open case; everyone else only their
/// own uploads.
pub fn can_delete_document(identity: Identity<'_>, case: &Case, document: &Document) -> bool {
    if case.is_closed {
        return false;
    }
    is_admin(identity, case) || identity.is_some_and(|w| *w == document.uploaded_by)
}

/// Granting per-document access is admin-only regardless of participant
/// permissions.
pub fn can_share_document(identity: Identity<'_>, case: &Case) -> bool {
    !case.is_closed && is_admin(identity, case)
}

pub fn can_manage_participants(identity: Identity<'_>, case: &Case) -> bool {
    !case.is_closed && is_admin(identity, case)
}

pub fn can_transfer_admin(identity: Identity<'_>, case: &Case, target: &WalletAddress) -> bool {
    !case.is_closed && is_admin(identity, case) && identity.is_some_and(|w| w != target)
}

pub fn can_close_case(identity: Identity<'_>, case: &Case) -> bool {
    !case.is_closed && is_admin(identity, case)
}

/// All case-level capabilities evaluated at once, for callers that render a
/// whole view from one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaseCapabilities {
    pub is_admin: bool,
    pub can_view: bool,
    pub can_upload: bool,
    pub can_share: bool,
    pub can_manage_participants: bool,
    pub can_close: bool,
}

impl CaseCapabilities {
    pub fn evaluate(identity: Identity<'_>, case: &Case) -> Self {
        Self {
            is_admin: is_admin(identity, case),
            can_view: can_view_case(identity, case),
            can_upload: can_upload_document(identity, case),
            can_share: can_share_document(identity, case),
            can_manage_participants: can_manage_participants(identity, case),
            can_close: can_close_case(identity, case),
        }
    }
}
