use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::domain::Song;
use crate::error::SearchError;
use crate::port::SongCatalog;

/// Songs carrying at least one requested genre, each with its complete genre
/// and arrangement lists. `$1` is the array of trimmed, lower-cased genre names.
const FIND_BY_GENRES: &str = r"
    SELECT
        s.id,
        s.title,
        s.artist,
        s.album,
        s.album_cover,
        s.available,
        s.duration,
        s.dlc,
        COALESCE(
            ARRAY_AGG(DISTINCT g.genre_name) FILTER (WHERE g.genre_name IS NOT NULL),
            ARRAY[]::TEXT[]
        ) AS genres,
        COALESCE(
            ARRAY_AGG(DISTINCT a.arrangement_name) FILTER (WHERE a.arrangement_name IS NOT NULL),
            ARRAY[]::TEXT[]
        ) AS arrangements
    FROM songs s
    LEFT JOIN song_genres sg ON sg.song_id = s.id
    LEFT JOIN genres g ON g.id = sg.genre_id
    LEFT JOIN song_arrangements sa ON sa.song_id = s.id
    LEFT JOIN arrangements a ON a.id = sa.arrangement_id
    WHERE EXISTS (
        SELECT 1
        FROM song_genres msg
        JOIN genres mg ON mg.id = msg.genre_id
        WHERE msg.song_id = s.id
          AND LOWER(TRIM(mg.genre_name)) = ANY($1)
    )
    GROUP BY s.id
";

#[derive(Debug, Clone)]
pub struct PgSongCatalog {
    pool: PgPool,
}

impl PgSongCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn query_by_genres(&self, genres: &[String]) -> Result<Vec<Song>> {
        let rows = sqlx::query(FIND_BY_GENRES)
            .bind(genres)
            .fetch_all(&self.pool)
            .await
            .context("failed to query songs by genre")?;

        let mut songs = Vec::with_capacity(rows.len());
        for row in rows {
            songs.push(Song {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
                artist: row.try_get("artist")?,
                album: row.try_get("album")?,
                album_cover: row.try_get("album_cover")?,
                available: row.try_get::<Option<bool>, _>("available")?.unwrap_or(false),
                duration: row.try_get("duration")?,
                dlc: row.try_get("dlc")?,
                genres: row.try_get("genres")?,
                arrangements: row.try_get("arrangements")?,
            });
        }

        Ok(songs)
    }
}

impl SongCatalog for PgSongCatalog {
    fn find_by_genres<'a>(
        &'a self,
        genres: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Song>, SearchError>> + Send + 'a>> {
        Box::pin(async move {
            self.query_by_genres(genres)
                .await
                .map_err(|e| SearchError::CatalogUnavailable(format!("{e:#}")))
        })
    }
}
