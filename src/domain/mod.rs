pub mod arrangement;
pub mod ranked_search;
pub mod song;

pub use arrangement::{Arrangement, arrangement_icons};
pub use ranked_search::RankedSearch;
pub use song::{RankedSong, Song};

/// Canonical form of a genre name used for matching and cache keys.
///
/// Lower-cases per character, as SQL `LOWER` does, so stored and requested
/// names agree regardless of word position.
pub fn normalize_genre(name: &str) -> String {
    name.trim().chars().flat_map(char::to_lowercase).collect()
}

/// A caller-supplied genre preference. Weights may be zero or negative.
#[derive(Clone, Debug, PartialEq)]
pub struct GenreWeight {
    pub genre: String,
    pub weight: f64,
}

impl GenreWeight {
    pub fn new(genre: impl Into<String>, weight: f64) -> Self {
        Self {
            genre: genre.into(),
            weight,
        }
    }
}
