pub mod catalog;
pub mod session_store;

pub use catalog::SongCatalog;
pub use session_store::{SessionEntry, SessionStore};
