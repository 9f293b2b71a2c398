//! Genre search core.
//!
//! ## Overview
//! A search is a set of genre weights. Every catalog song carrying at least one
//! requested genre is scored by summing the weights of the genres it carries;
//! songs scoring above zero are ordered (score, then title, then id), bounded
//! to [`MAX_RESULTS`], cached per session and served in pages of
//! [`PAGE_SIZE`].
//!
//! ## Submodules
//! - **`request`**: endpoint bodies and their validation into a `SearchRequest`.
//! - **`weights`**: normalized genre weights, scoring and request fingerprints.
//! - **`ranker`**: catalog query plus scoring, ordering and truncation.
//! - **`pagination`**: page slicing.
//! - **`cache`**: session-scoped ranked result cache.
//! - **`service`**: ties the above together for the HTTP handlers.
//! - **`types`**: response DTOs.

pub mod cache;
pub mod pagination;
pub mod ranker;
pub mod request;
pub mod service;
pub mod types;
pub mod weights;

pub use cache::RankedSearchCache;
pub use ranker::{SearchRanker, rank_songs};
pub use request::{SearchRequest, SearchVariant};
pub use service::SearchService;
pub use weights::GenreWeights;

/// Upper bound on the size of any ranked result set.
pub const MAX_RESULTS: usize = 500;

/// Songs per page.
pub const PAGE_SIZE: usize = 20;
