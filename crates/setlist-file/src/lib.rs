//! setlist-file - Filesystem-backed credential store.

mod store;

pub use store::FileCredentialStore;
