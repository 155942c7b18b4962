// Adapters layer: concrete implementations for the hosted data service and local session files.

pub mod auth;
pub mod http;
pub mod rest_store;
pub mod session_file;

pub use auth::RestAuthProvider;
pub use http::ServiceClient;
pub use rest_store::RestNoteStore;
pub use session_file::FileSessionStore;
