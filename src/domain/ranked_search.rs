use chrono::{DateTime, Utc};

use super::RankedSong;

/// Fully ranked result set of one logical search, shared by all of its pages.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedSearch {
    pub fingerprint: u64,
    pub songs: Vec<RankedSong>,
    /// Fixed when the set is created; later pages never recount.
    pub total: usize,
    pub created_at: DateTime<Utc>,
}

impl RankedSearch {
    pub fn new(fingerprint: u64, songs: Vec<RankedSong>) -> Self {
        let total = songs.len();
        Self {
            fingerprint,
            songs,
            total,
            created_at: Utc::now(),
        }
    }
}
