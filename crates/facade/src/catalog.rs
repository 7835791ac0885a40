//! The whole catalog behind one database pool
//!
//! Facades are wired bottom-up: children first, so every parent facade can
//! hold its child copier, then genres last so they can see who uses them.

use crate::collaborators::{Existence, Lookup};
use crate::error::FacadeResult;
use crate::facade::Facade;
use catalog_config::{CatalogConfig, Config};
use catalog_core::{
    Book, BookCategory, CatalogStats, Duration, EntityId, Episode, Game, Genre, Movie, Music,
    Program, Season, Serie, Song, ValidationRules,
};
use catalog_database::{DatabaseConfig, DbPool, Record, SqliteRepository};
use chrono::Datelike;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Facade backed by the SQLite repository
pub type SqliteFacade<T> = Facade<T, SqliteRepository<T>>;

/// Builds validation rules from configuration, bounded by the current year
pub fn validation_rules(config: &CatalogConfig) -> ValidationRules {
    ValidationRules {
        min_year: config.min_year,
        max_year: chrono::Local::now().year(),
        max_text_length: config.max_text_length,
    }
}

pub struct Catalog {
    pool: DbPool,
    genres: Arc<SqliteFacade<Genre>>,
    movies: Arc<SqliteFacade<Movie>>,
    series: Arc<SqliteFacade<Serie>>,
    seasons: Arc<SqliteFacade<Season>>,
    episodes: Arc<SqliteFacade<Episode>>,
    music: Arc<SqliteFacade<Music>>,
    songs: Arc<SqliteFacade<Song>>,
    games: Arc<SqliteFacade<Game>>,
    programs: Arc<SqliteFacade<Program>>,
    book_categories: Arc<SqliteFacade<BookCategory>>,
    books: Arc<SqliteFacade<Book>>,
}

impl Catalog {
    /// Opens (and migrates) the database at `database_path`
    pub async fn open(config: &Config, database_path: impl AsRef<Path>) -> FacadeResult<Self> {
        let path = database_path.as_ref();
        let database = DatabaseConfig::new(path)
            .with_max_connections(config.app.max_connections)
            .with_wal(config.app.enable_wal);
        let pool = catalog_database::open(&database).await?;

        info!("Opened catalog at {}", path.display());
        Ok(Self::with_pool(pool, validation_rules(&config.catalog)))
    }

    /// Throwaway catalog, mostly for tests
    pub async fn in_memory(rules: ValidationRules) -> FacadeResult<Self> {
        let pool = catalog_database::connect_in_memory().await?;
        catalog_database::run_migrations(&pool).await?;
        Ok(Self::with_pool(pool, rules))
    }

    /// Wires every facade against an already migrated pool
    pub fn with_pool(pool: DbPool, rules: ValidationRules) -> Self {
        let genre_repository = repository::<Genre>(&pool);
        let serie_repository = repository::<Serie>(&pool);
        let season_repository = repository::<Season>(&pool);
        let music_repository = repository::<Music>(&pool);
        let category_repository = repository::<BookCategory>(&pool);

        let episodes = Arc::new(
            Facade::new(repository::<Episode>(&pool), rules)
                .with_parents(existence(&season_repository)),
        );
        let seasons = Arc::new(
            Facade::new(Arc::clone(&season_repository), rules)
                .with_parents(existence(&serie_repository))
                .with_children(episodes.clone()),
        );
        let series = Arc::new(
            Facade::new(serie_repository, rules)
                .with_genres(existence(&genre_repository))
                .with_children(seasons.clone()),
        );
        let movies = Arc::new(
            Facade::new(repository::<Movie>(&pool), rules)
                .with_genres(existence(&genre_repository)),
        );
        let genres = Arc::new(
            Facade::new(genre_repository, rules)
                .with_genre_usage(movies.clone())
                .with_genre_usage(series.clone()),
        );

        let songs = Arc::new(
            Facade::new(repository::<Song>(&pool), rules)
                .with_parents(existence(&music_repository)),
        );
        let music = Arc::new(Facade::new(music_repository, rules).with_children(songs.clone()));

        let books = Arc::new(
            Facade::new(repository::<Book>(&pool), rules)
                .with_parents(existence(&category_repository)),
        );
        let book_categories =
            Arc::new(Facade::new(category_repository, rules).with_children(books.clone()));

        Self {
            games: Arc::new(Facade::new(repository::<Game>(&pool), rules)),
            programs: Arc::new(Facade::new(repository::<Program>(&pool), rules)),
            pool,
            genres,
            movies,
            series,
            seasons,
            episodes,
            music,
            songs,
            book_categories,
            books,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn genres(&self) -> &SqliteFacade<Genre> {
        &self.genres
    }

    pub fn movies(&self) -> &SqliteFacade<Movie> {
        &self.movies
    }

    pub fn series(&self) -> &SqliteFacade<Serie> {
        &self.series
    }

    pub fn seasons(&self) -> &SqliteFacade<Season> {
        &self.seasons
    }

    pub fn episodes(&self) -> &SqliteFacade<Episode> {
        &self.episodes
    }

    pub fn music(&self) -> &SqliteFacade<Music> {
        &self.music
    }

    pub fn songs(&self) -> &SqliteFacade<Song> {
        &self.songs
    }

    pub fn games(&self) -> &SqliteFacade<Game> {
        &self.games
    }

    pub fn programs(&self) -> &SqliteFacade<Program> {
        &self.programs
    }

    pub fn book_categories(&self) -> &SqliteFacade<BookCategory> {
        &self.book_categories
    }

    pub fn books(&self) -> &SqliteFacade<Book> {
        &self.books
    }

    // ===== Movies =====

    pub async fn movies_media_count(&self) -> FacadeResult<u64> {
        let movies = self.movies.list().await?;
        Ok(movies.iter().map(|movie| movie.media_count() as u64).sum())
    }

    pub async fn movies_total_length(&self) -> FacadeResult<Duration> {
        let movies = self.movies.list().await?;
        Ok(movies.iter().map(Movie::total_length).sum())
    }

    // ===== Series =====

    pub async fn serie_seasons_count(&self, serie: EntityId) -> FacadeResult<u64> {
        Ok(self.seasons.list_in(serie).await?.len() as u64)
    }

    pub async fn serie_episodes_count(&self, serie: EntityId) -> FacadeResult<u64> {
        Ok(self.serie_episodes(serie).await?.len() as u64)
    }

    pub async fn serie_length(&self, serie: EntityId) -> FacadeResult<Duration> {
        let episodes = self.serie_episodes(serie).await?;
        Ok(episodes.iter().map(|episode| episode.length).sum())
    }

    pub async fn season_episodes_count(&self, season: EntityId) -> FacadeResult<u64> {
        Ok(self.episodes.list_in(season).await?.len() as u64)
    }

    pub async fn season_length(&self, season: EntityId) -> FacadeResult<Duration> {
        let episodes = self.episodes.list_in(season).await?;
        Ok(episodes.iter().map(|episode| episode.length).sum())
    }

    /// Playing time of every episode of every serie
    pub async fn series_total_length(&self) -> FacadeResult<Duration> {
        let episodes = self.episodes.list().await?;
        Ok(episodes.iter().map(|episode| episode.length).sum())
    }

    async fn serie_episodes(&self, serie: EntityId) -> FacadeResult<Vec<Episode>> {
        let mut episodes = Vec::new();
        for season in self.seasons.list_in(serie).await? {
            if let Some(season_id) = season.id {
                episodes.extend(self.episodes.list_in(season_id).await?);
            }
        }
        Ok(episodes)
    }

    // ===== Music =====

    pub async fn music_songs_count(&self, music: EntityId) -> FacadeResult<u64> {
        Ok(self.songs.list_in(music).await?.len() as u64)
    }

    pub async fn music_length(&self, music: EntityId) -> FacadeResult<Duration> {
        let songs = self.songs.list_in(music).await?;
        Ok(songs.iter().map(|song| song.length).sum())
    }

    pub async fn music_media_count(&self) -> FacadeResult<u64> {
        let music = self.music.list().await?;
        Ok(music.iter().map(|entry| u64::from(entry.media_count)).sum())
    }

    pub async fn music_total_length(&self) -> FacadeResult<Duration> {
        let songs = self.songs.list().await?;
        Ok(songs.iter().map(|song| song.length).sum())
    }

    // ===== Games, programs and books =====

    pub async fn games_media_count(&self) -> FacadeResult<u64> {
        let games = self.games.list().await?;
        Ok(games.iter().map(|game| u64::from(game.media_count)).sum())
    }

    pub async fn programs_media_count(&self) -> FacadeResult<u64> {
        let programs = self.programs.list().await?;
        Ok(programs.iter().map(|program| u64::from(program.media_count)).sum())
    }

    pub async fn category_books_count(&self, category: EntityId) -> FacadeResult<u64> {
        Ok(self.books.list_in(category).await?.len() as u64)
    }

    // ===== Whole catalog =====

    /// Summary of everything catalogued
    pub async fn stats(&self) -> FacadeResult<CatalogStats> {
        Ok(CatalogStats {
            genres_count: self.genres.count().await?,
            movies_count: self.movies.count().await?,
            movies_media_count: self.movies_media_count().await?,
            movies_total_length: self.movies_total_length().await?,
            series_count: self.series.count().await?,
            seasons_count: self.seasons.count().await?,
            episodes_count: self.episodes.count().await?,
            series_total_length: self.series_total_length().await?,
            music_count: self.music.count().await?,
            music_media_count: self.music_media_count().await?,
            songs_count: self.songs.count().await?,
            music_total_length: self.music_total_length().await?,
            games_count: self.games.count().await?,
            games_media_count: self.games_media_count().await?,
            programs_count: self.programs.count().await?,
            programs_media_count: self.programs_media_count().await?,
            book_categories_count: self.book_categories.count().await?,
            books_count: self.books.count().await?,
        })
    }

    /// Empties the catalog, children before their parents
    pub async fn new_data(&self) -> FacadeResult<()> {
        self.episodes.clear().await?;
        self.seasons.clear().await?;
        self.series.clear().await?;
        self.songs.clear().await?;
        self.music.clear().await?;
        self.books.clear().await?;
        self.book_categories.clear().await?;
        self.movies.clear().await?;
        self.games.clear().await?;
        self.programs.clear().await?;
        self.genres.clear().await?;

        info!("Started a new empty catalog");
        Ok(())
    }

    /// Repairs positions of every family; returns how many entities moved
    pub async fn update_positions(&self) -> FacadeResult<usize> {
        let repaired = self.genres.update_positions().await?
            + self.movies.update_positions().await?
            + self.series.update_positions().await?
            + self.seasons.update_positions().await?
            + self.episodes.update_positions().await?
            + self.music.update_positions().await?
            + self.songs.update_positions().await?
            + self.games.update_positions().await?
            + self.programs.update_positions().await?
            + self.book_categories.update_positions().await?
            + self.books.update_positions().await?;

        info!("Position repair finished, {} entities moved", repaired);
        Ok(repaired)
    }
}

fn repository<T: Record>(pool: &DbPool) -> Arc<SqliteRepository<T>> {
    Arc::new(SqliteRepository::new(pool.clone()))
}

fn existence<T: Record>(repository: &Arc<SqliteRepository<T>>) -> Arc<dyn Lookup> {
    Arc::new(Existence::<T, SqliteRepository<T>>::new(Arc::clone(repository)))
}
