use serde::{Deserialize, Serialize};

use super::normalize_genre;

/// Read-only projection of a catalog song.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_cover: Option<String>,
    #[serde(default)]
    pub available: bool,
    /// Duration as stored in the catalog (e.g. `00:03:41`).
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub dlc: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub arrangements: Vec<String>,
}

impl Song {
    pub fn new(id: i64, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            album_cover: None,
            available: true,
            duration: None,
            dlc: None,
            genres: Vec::new(),
            arrangements: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_arrangements<I, S>(mut self, arrangements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arrangements = arrangements.into_iter().map(Into::into).collect();
        self
    }

    /// True if any of the song's genres normalizes to `genre`.
    ///
    /// `genre` must already be normalized (see [`crate::domain::normalize_genre`]).
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| normalize_genre(g) == genre)
    }
}

/// A song together with its match score for one search.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedSong {
    pub song: Song,
    pub score: f64,
}
