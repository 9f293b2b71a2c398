use std::future::Future;
use std::pin::Pin;

use crate::domain::Song;
use crate::error::SearchError;
use crate::port::SongCatalog;

/// Catalog backed by a fixed list of songs.
#[derive(Debug, Clone, Default)]
pub struct InMemorySongCatalog {
    songs: Vec<Song>,
}

impl InMemorySongCatalog {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Songs carrying at least one of the (normalized) `genres`, in catalog order.
    pub fn matching(&self, genres: &[String]) -> Vec<Song> {
        self.songs
            .iter()
            .filter(|song| genres.iter().any(|g| song.has_genre(g)))
            .cloned()
            .collect()
    }
}

impl SongCatalog for InMemorySongCatalog {
    fn find_by_genres<'a>(
        &'a self,
        genres: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Song>, SearchError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.matching(genres)) })
    }
}
