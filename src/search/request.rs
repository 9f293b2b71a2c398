//! Request bodies of the two genre-search endpoints and their normalization
//! into a [`SearchRequest`].

use serde::Deserialize;

use super::MAX_RESULTS;
use super::weights::GenreWeights;
use crate::domain::{GenreWeight, normalize_genre};
use crate::error::SearchError;

/// Which endpoint a search came through. Part of the cache identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchVariant {
    Weighted,
    Bands,
}

impl SearchVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::Bands => "bands",
        }
    }
}

/// A weight as sent by the browser: either a JSON number or a numeric string.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WeightValue {
    Number(f64),
    Text(String),
}

impl WeightValue {
    fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WeightedGenre {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub weight: Option<WeightValue>,
}

/// Body of `POST /api/songs_weighted`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedSearchBody {
    #[serde(default)]
    pub genres: Vec<WeightedGenre>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub total_requested: Option<i64>,
}

/// One selected band and the genres it is tagged with.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BandSelection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<Option<String>>,
}

/// Body of `POST /api/songs_bands`. The field is called `genres` on the wire
/// but carries band selections.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSearchBody {
    #[serde(default)]
    pub genres: Vec<BandSelection>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub total_requested: Option<i64>,
}

/// A validated, normalized search for one page.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    pub variant: SearchVariant,
    pub weights: GenreWeights,
    /// 1-based.
    pub page: usize,
    pub max_results: usize,
}

impl SearchRequest {
    /// Validates a weighted body. `ceiling` caps `totalRequested`.
    pub fn weighted(body: WeightedSearchBody, ceiling: usize) -> Result<Self, SearchError> {
        if body.genres.is_empty() {
            return Err(no_genres());
        }

        let mut weights = Vec::with_capacity(body.genres.len());
        for entry in &body.genres {
            let genre = normalize_genre(&entry.genre);
            if genre.is_empty() {
                return Err(SearchError::Validation("genre name must not be empty".into()));
            }
            let weight = entry
                .weight
                .as_ref()
                .and_then(WeightValue::parse)
                .ok_or_else(|| {
                    SearchError::Validation(format!("malformed weight for genre '{genre}'"))
                })?;
            weights.push(GenreWeight::new(genre, weight));
        }

        Ok(Self {
            variant: SearchVariant::Weighted,
            weights: GenreWeights::from_weights(weights),
            page: parse_page(body.page)?,
            max_results: parse_total_requested(body.total_requested, ceiling)?,
        })
    }

    /// Validates a band-selection body: band genres are flattened and
    /// deduplicated, each weighted 1.0.
    pub fn bands(body: BandSearchBody, ceiling: usize) -> Result<Self, SearchError> {
        let genres: Vec<String> = body
            .genres
            .iter()
            .flat_map(|band| band.genres.iter().flatten())
            .map(|g| normalize_genre(g))
            .filter(|g| !g.is_empty())
            .collect();

        if genres.is_empty() {
            return Err(no_genres());
        }

        Ok(Self {
            variant: SearchVariant::Bands,
            weights: GenreWeights::uniform(genres),
            page: parse_page(body.page)?,
            max_results: parse_total_requested(body.total_requested, ceiling)?,
        })
    }

    pub fn fingerprint(&self) -> u64 {
        self.weights.fingerprint(self.variant, self.max_results)
    }
}

fn no_genres() -> SearchError {
    SearchError::Validation("no genres provided".into())
}

fn parse_page(page: Option<i64>) -> Result<usize, SearchError> {
    match page {
        None => Ok(1),
        Some(p) if p >= 1 => usize::try_from(p)
            .map_err(|_| SearchError::Validation(format!("page out of range: {p}"))),
        Some(p) => Err(SearchError::Validation(format!(
            "page must be 1 or greater, got {p}"
        ))),
    }
}

fn parse_total_requested(requested: Option<i64>, ceiling: usize) -> Result<usize, SearchError> {
    let ceiling = ceiling.clamp(1, MAX_RESULTS);
    match requested {
        None => Ok(ceiling),
        Some(n) if n >= 1 => Ok(usize::try_from(n).map_or(ceiling, |n| n.min(ceiling))),
        Some(n) => Err(SearchError::Validation(format!(
            "totalRequested must be 1 or greater, got {n}"
        ))),
    }
}
