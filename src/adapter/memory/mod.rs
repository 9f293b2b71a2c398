mod catalog;
mod session_store;

pub use catalog::InMemorySongCatalog;
pub use session_store::InMemorySessionStore;
