//! Catalog-wide statistics

use crate::types::Duration;
use serde::{Deserialize, Serialize};

/// Counts and lengths summarizing the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub genres_count: u64,
    pub movies_count: u64,
    pub movies_media_count: u64,
    pub movies_total_length: Duration,
    pub series_count: u64,
    pub seasons_count: u64,
    pub episodes_count: u64,
    pub series_total_length: Duration,
    pub music_count: u64,
    pub music_media_count: u64,
    pub songs_count: u64,
    pub music_total_length: Duration,
    pub games_count: u64,
    pub games_media_count: u64,
    pub programs_count: u64,
    pub programs_media_count: u64,
    pub book_categories_count: u64,
    pub books_count: u64,
}

impl CatalogStats {
    /// Creates empty statistics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when nothing is catalogued
    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Number of top-level entries, children are not counted
    pub fn total_entries(&self) -> u64 {
        self.genres_count
            + self.movies_count
            + self.series_count
            + self.music_count
            + self.games_count
            + self.programs_count
            + self.book_categories_count
    }

    /// Number of physical media across movies, music, games and programs
    pub fn total_media_count(&self) -> u64 {
        self.movies_media_count
            + self.music_media_count
            + self.games_media_count
            + self.programs_media_count
    }

    /// Playing time of everything that has one
    pub fn total_length(&self) -> Duration {
        self.movies_total_length + self.series_total_length + self.music_total_length
    }

    /// Returns the average movie length
    pub fn average_movie_length(&self) -> Duration {
        average(self.movies_total_length, self.movies_count)
    }

    /// Returns the average episode length
    pub fn average_episode_length(&self) -> Duration {
        average(self.series_total_length, self.episodes_count)
    }

    /// Returns the average song length
    pub fn average_song_length(&self) -> Duration {
        average(self.music_total_length, self.songs_count)
    }
}

fn average(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(total.as_millis() / count)
}
