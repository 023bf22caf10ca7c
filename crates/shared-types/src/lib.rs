pub mod error;

// Records domain modules (canonical locations for all case/document types)
pub mod case;
pub mod document;
pub mod identity;
pub mod requests;
pub mod role;

pub use error::*;

// Re-export all domain types
pub use case::*;
pub use document::*;
pub use identity::*;
pub use requests::*;
pub use role::*;
