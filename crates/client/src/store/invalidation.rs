//! Static cache-invalidation policy: each mutation names exactly the
//! collections it stales, and the stores refetch those and nothing else.

/// The cached collections the stores hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    /// `owned_cases` + `participating_cases` (they always move together).
    CaseList,
    CurrentCase,
    Documents,
    DocumentLogs,
}

/// Write operations against cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseMutation {
    Create,
    GrantAccess,
    RevokeAccess,
    ChangeAdmin,
    Close,
}

impl CaseMutation {
    /// Set-membership or ownership changes invalidate the whole list;
    /// roster edits only touch the currently open case.
    pub fn invalidates(self) -> &'static [Collection] {
        match self {
            CaseMutation::Create => &[Collection::CaseList],
            CaseMutation::GrantAccess => &[Collection::CurrentCase],
            CaseMutation::RevokeAccess => &[Collection::CurrentCase],
            CaseMutation::ChangeAdmin => &[Collection::CaseList, Collection::CurrentCase],
            CaseMutation::Close => &[Collection::CaseList, Collection::CurrentCase],
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            CaseMutation::Create => "Case created successfully",
            CaseMutation::GrantAccess => "Access granted successfully",
            CaseMutation::RevokeAccess => "Access revoked successfully",
            CaseMutation::ChangeAdmin => "Case admin changed successfully",
            CaseMutation::Close => "Case closed successfully",
        }
    }

    /// Fallback shown when the failure carried no server message.
    pub fn failure_message(self) -> &'static str {
        match self {
            CaseMutation::Create => "Failed to create case",
            CaseMutation::GrantAccess => "Failed to grant access",
            CaseMutation::RevokeAccess => "Failed to revoke access",
            CaseMutation::ChangeAdmin => "Failed to change case admin",
            CaseMutation::Close => "Failed to close case",
        }
    }
}

/// Write operations against documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentMutation {
    Upload,
    Delete,
    GrantAccess,
    RevokeAccess,
}

impl DocumentMutation {
    pub fn invalidates(self) -> &'static [Collection] {
        match self {
            DocumentMutation::Upload => &[Collection::Documents],
            DocumentMutation::Delete => &[Collection::Documents],
            // Per-document grants don't change the list or the logs we hold.
            DocumentMutation::GrantAccess => &[],
            DocumentMutation::RevokeAccess => &[],
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            DocumentMutation::Upload => "Document uploaded successfully",
            DocumentMutation::Delete => "Document deleted successfully",
            DocumentMutation::GrantAccess => "Access granted successfully",
            DocumentMutation::RevokeAccess => "Access revoked successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            DocumentMutation::Upload => "Failed to upload document",
            DocumentMutation::Delete => "Failed to delete document",
            DocumentMutation::GrantAccess => "Failed to grant access",
            DocumentMutation::RevokeAccess => "Failed to revoke access",
        }
    }
}
