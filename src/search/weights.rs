use std::collections::BTreeMap;
use std::fmt::Write as _;

use xxhash_rust::xxh3::xxh3_64;

use super::request::SearchVariant;
use crate::domain::{GenreWeight, Song, normalize_genre};

/// Normalized genre → weight map of one search.
///
/// Genre names are trimmed and lower-cased; when a genre is given more than
/// once the last weight wins. Blank names are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenreWeights {
    weights: BTreeMap<String, f64>,
}

impl GenreWeights {
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = GenreWeight>,
    {
        let mut map = BTreeMap::new();
        for GenreWeight { genre, weight } in weights {
            let genre = normalize_genre(&genre);
            if genre.is_empty() {
                continue;
            }
            map.insert(genre, weight);
        }
        Self { weights: map }
    }

    /// Every genre weighted 1.0, so a song's score counts the distinct requested genres it has.
    pub fn uniform<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_weights(
            genres
                .into_iter()
                .map(|g| GenreWeight::new(g.as_ref(), 1.0)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn get(&self, genre: &str) -> Option<f64> {
        self.weights.get(&normalize_genre(genre)).copied()
    }

    /// Requested genre names in sorted order.
    pub fn genres(&self) -> Vec<String> {
        self.weights.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(g, w)| (g.as_str(), *w))
    }

    /// Sum of the weights of requested genres the song carries. Each genre counts once.
    pub fn score(&self, song: &Song) -> f64 {
        self.weights
            .iter()
            .filter(|(genre, _)| song.has_genre(genre))
            .map(|(_, weight)| *weight)
            .sum()
    }

    /// Identity of a search for caching: variant, result bound and every
    /// (genre, weight) pair. Insensitive to request order and duplicates.
    pub fn fingerprint(&self, variant: SearchVariant, max_results: usize) -> u64 {
        let mut canonical = String::with_capacity(32 + self.weights.len() * 24);
        let _ = write!(canonical, "{}|{max_results}|", variant.as_str());
        for (genre, weight) in &self.weights {
            // -0.0 and 0.0 score identically
            let weight = if *weight == 0.0 { 0.0_f64 } else { *weight };
            let _ = write!(
                canonical,
                "{}:{genre}={:016x};",
                genre.len(),
                weight.to_bits()
            );
        }
        xxh3_64(canonical.as_bytes())
    }
}
