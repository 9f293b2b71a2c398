use serde::Serialize;

use crate::domain::{RankedSong, arrangement_icons};

/// Song as rendered in a search response.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongResult {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub album_cover: Option<String>,
    pub available: bool,
    pub duration: Option<String>,
    pub dlc: Option<String>,
    pub genres: Vec<String>,
    pub arrangements: Vec<String>,
    pub arrangement_icons: Vec<&'static str>,
    pub score: f64,
}

impl From<&RankedSong> for SongResult {
    fn from(ranked: &RankedSong) -> Self {
        let song = &ranked.song;
        Self {
            id: song.id,
            title: song.title.clone(),
            artist: song.artist.clone(),
            album: song.album.clone(),
            album_cover: song.album_cover.clone(),
            available: song.available,
            duration: song.duration.clone(),
            dlc: song.dlc.clone(),
            genres: song.genres.clone(),
            arrangements: song.arrangements.clone(),
            arrangement_icons: arrangement_icons(&song.arrangements),
            score: ranked.score,
        }
    }
}

/// Response body of both genre-search endpoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub songs: Vec<SongResult>,
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_more: bool,
}
