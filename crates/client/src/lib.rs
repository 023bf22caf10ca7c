//! Headless client core for the records manager: session lifecycle, the
//! access-control evaluator, API ports + HTTP adapters, the blob-store
//! adapter, cached case/document state with refetch-after-mutation, and the
//! flash relay the mutation results publish to.

pub mod access;
pub mod api;
pub mod config;
pub mod flash;
pub mod ipfs;
pub mod session;
pub mod store;
pub mod wallet;

pub use access::CaseCapabilities;
pub use config::ClientConfig;
pub use flash::{FlashKind, FlashMessage, FlashRelay};
pub use session::Session;
pub use store::{CaseStore, DocumentStore};
