use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error};

use super::weights::GenreWeights;
use crate::domain::{RankedSong, Song};
use crate::error::SearchError;
use crate::port::SongCatalog;

/// Scores catalog songs against a set of genre weights.
#[derive(Clone)]
pub struct SearchRanker {
    catalog: Arc<dyn SongCatalog>,
}

impl SearchRanker {
    pub fn new(catalog: Arc<dyn SongCatalog>) -> Self {
        Self { catalog }
    }

    /// Queries the catalog and returns at most `max_results` songs ranked by
    /// score. Catalog failures abort the whole ranking.
    pub async fn compute_ranking(
        &self,
        weights: &GenreWeights,
        max_results: usize,
    ) -> Result<Vec<RankedSong>, SearchError> {
        if weights.is_empty() {
            return Err(SearchError::Validation("no genres provided".into()));
        }

        let genres = weights.genres();
        let candidates = self.catalog.find_by_genres(&genres).await.map_err(|e| {
            error!(error = %e, genres = ?genres, "catalog query failed");
            e
        })?;
        let candidate_count = candidates.len();

        let ranked = rank_songs(candidates, weights, max_results);
        debug!(
            candidates = candidate_count,
            ranked = ranked.len(),
            max_results,
            "computed ranking"
        );
        Ok(ranked)
    }
}

/// Scores, filters (`score > 0`), orders and truncates `songs`.
///
/// Order is score descending, then title ascending (ignoring case), then id
/// ascending, so equal inputs always produce equal pages.
pub fn rank_songs<I>(songs: I, weights: &GenreWeights, max_results: usize) -> Vec<RankedSong>
where
    I: IntoIterator<Item = Song>,
{
    // the first row per id wins if the catalog returns a song twice
    let mut seen = HashSet::new();
    let mut ranked: Vec<RankedSong> = songs
        .into_iter()
        .filter(|song| seen.insert(song.id))
        .filter_map(|song| {
            let score = weights.score(&song);
            (score > 0.0).then_some(RankedSong { song, score })
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked.truncate(max_results);
    ranked
}

fn compare_ranked(a: &RankedSong, b: &RankedSong) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| compare_titles(&a.song.title, &b.song.title))
        .then_with(|| a.song.id.cmp(&b.song.id))
}

/// Case-insensitive title order; titles differing only in case fall back to
/// their raw order.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
