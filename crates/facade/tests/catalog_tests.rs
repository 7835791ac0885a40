//! Integration tests for the wired catalog

use catalog_config::Config;
use catalog_core::{
    Book, BookCategory, Duration, EntityId, EntityKind, Episode, Game, Genre, Language, Movie,
    Music, Program, Season, Serie, Song, ValidationRules,
};
use catalog_facade::{Catalog, ErrorKind, FacadeError, FacadeResult};
use tempfile::TempDir;

async fn setup_catalog() -> FacadeResult<Catalog> {
    Catalog::in_memory(ValidationRules::with_max_year(2024)).await
}

fn movie(name: &str, minutes: &[u64]) -> Movie {
    let mut movie = Movie::new(name, name, 1999, Language::Czech);
    movie.media = minutes
        .iter()
        .map(|m| Duration::from_seconds(m * 60))
        .collect();
    movie
}

/// Serie with two seasons of two and three episodes
async fn setup_serie(catalog: &Catalog) -> FacadeResult<(EntityId, Vec<EntityId>)> {
    let serie = catalog.series().add(Serie::new("Přátelé", "Friends")).await?;
    let serie_id = serie.id.unwrap();

    let mut season_ids = Vec::new();
    for (number, episodes) in [(1u32, 2u32), (2, 3)] {
        let season = catalog
            .seasons()
            .add(Season::new(serie_id, number, 1994, 1995, Language::English))
            .await?;
        let season_id = season.id.unwrap();
        for episode in 1..=episodes {
            catalog
                .episodes()
                .add(Episode::new(
                    season_id,
                    episode,
                    format!("S{}E{}", number, episode),
                    Duration::from_seconds(1320),
                ))
                .await?;
        }
        season_ids.push(season_id);
    }
    Ok((serie_id, season_ids))
}

#[tokio::test]
async fn test_child_requires_existing_parent() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;

    let error = catalog
        .songs()
        .add(Song::new(EntityId::new(7), "Song", Duration::from_seconds(200)))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        FacadeError::NotFound {
            entity: EntityKind::Music,
            ..
        }
    ));

    let error = catalog
        .books()
        .add(Book::new(EntityId::new(0), "Author", "Title", vec![Language::Czech]))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);

    let error = catalog.seasons().list_in(EntityId::new(3)).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn test_children_are_ordered_per_parent() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let first = catalog.music().add(Music::new("First", 1)).await?.id.unwrap();
    let second = catalog.music().add(Music::new("Second", 1)).await?.id.unwrap();

    for (music, name) in [(first, "a"), (second, "x"), (first, "b"), (second, "y")] {
        catalog
            .songs()
            .add(Song::new(music, name, Duration::from_seconds(180)))
            .await?;
    }

    let songs = catalog.songs().list_in(first).await?;
    let listed: Vec<(&str, u32)> = songs.iter().map(|s| (s.name.as_str(), s.position)).collect();
    assert_eq!(listed, vec![("a", 0), ("b", 1)]);
    assert_eq!(catalog.music_songs_count(second).await?, 2);
    assert_eq!(catalog.music_length(second).await?, Duration::from_seconds(360));
    Ok(())
}

#[tokio::test]
async fn test_deep_duplicate_copies_children_in_order() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let (serie_id, _) = setup_serie(&catalog).await?;

    let copy = catalog.series().duplicate(serie_id).await?;
    let copy_id = copy.id.unwrap();
    assert_eq!(copy.position, 1);
    assert_eq!(copy.original_name, "Friends");

    let seasons = catalog.seasons().list_in(copy_id).await?;
    let numbers: Vec<(u32, u32)> = seasons.iter().map(|s| (s.number, s.position)).collect();
    assert_eq!(numbers, vec![(1, 0), (2, 1)]);

    let episodes = catalog.episodes().list_in(seasons[1].id.unwrap()).await?;
    let names: Vec<&str> = episodes.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["S2E1", "S2E2", "S2E3"]);

    assert_eq!(catalog.serie_episodes_count(copy_id).await?, 5);
    assert_eq!(catalog.serie_episodes_count(serie_id).await?, 5);
    assert_eq!(catalog.seasons().count().await?, 4);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_category_copies_books() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let category = catalog
        .book_categories()
        .add(BookCategory::new("Sci-fi"))
        .await?
        .id
        .unwrap();
    for title in ["Solaris", "Eden"] {
        catalog
            .books()
            .add(Book::new(category, "Lem", title, vec![Language::Czech]))
            .await?;
    }

    let copy = catalog.book_categories().duplicate(category).await?.id.unwrap();

    assert_eq!(catalog.category_books_count(copy).await?, 2);
    assert_eq!(catalog.books().list_in(copy).await?[0].title, "Solaris");
    Ok(())
}

#[tokio::test]
async fn test_removing_parent_removes_children() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let (serie_id, season_ids) = setup_serie(&catalog).await?;

    catalog.series().remove(serie_id).await?;

    assert_eq!(catalog.seasons().count().await?, 0);
    assert_eq!(catalog.episodes().count().await?, 0);
    assert!(!catalog.seasons().exists(season_ids[0]).await?);
    Ok(())
}

#[tokio::test]
async fn test_removing_season_closes_gap() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let (serie_id, season_ids) = setup_serie(&catalog).await?;

    catalog.seasons().remove(season_ids[0]).await?;

    let remaining = catalog.seasons().list_in(serie_id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].position, 0);
    assert_eq!(catalog.episodes().count().await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_genre_references() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let drama = catalog.genres().add(Genre::new("Drama")).await?.id.unwrap();
    let unused = catalog.genres().add(Genre::new("Western")).await?.id.unwrap();

    let mut unknown = movie("Pelíšky", &[115]);
    unknown.genres = vec![EntityId::new(99)];
    let error = catalog.movies().add(unknown).await.unwrap_err();
    assert!(matches!(
        error,
        FacadeError::NotFound {
            entity: EntityKind::Genre,
            ..
        }
    ));

    let mut known = movie("Pelíšky", &[115]);
    known.genres = vec![drama];
    catalog.movies().add(known).await?;

    let error = catalog.genres().remove(drama).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(catalog.genres().exists(drama).await?);

    catalog.genres().remove(unused).await?;
    assert_eq!(catalog.genres().count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_content_is_rejected() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;

    let error = catalog.movies().add(movie("", &[])).await.unwrap_err();
    match error {
        FacadeError::Validation(messages) => assert!(messages.len() >= 2),
        other => panic!("unexpected error: {}", other),
    }

    let error = catalog
        .movies()
        .add(Movie::new("Old", "Old", 1900, Language::Czech))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(catalog.movies().count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_stats_summarize_catalog() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    assert!(catalog.stats().await?.is_empty());

    catalog.genres().add(Genre::new("Drama")).await?;
    catalog.movies().add(movie("One", &[90, 30])).await?;
    catalog.movies().add(movie("Two", &[60])).await?;
    setup_serie(&catalog).await?;
    let music = catalog.music().add(Music::new("Album", 2)).await?.id.unwrap();
    catalog
        .songs()
        .add(Song::new(music, "Track", Duration::from_seconds(240)))
        .await?;
    catalog.games().add(Game::new("Game", 3)).await?;
    catalog.programs().add(Program::new("Program", 1)).await?;

    let stats = catalog.stats().await?;
    assert_eq!(stats.genres_count, 1);
    assert_eq!(stats.movies_count, 2);
    assert_eq!(stats.movies_media_count, 3);
    assert_eq!(stats.movies_total_length, Duration::from_seconds(180 * 60));
    assert_eq!(stats.series_count, 1);
    assert_eq!(stats.seasons_count, 2);
    assert_eq!(stats.episodes_count, 5);
    assert_eq!(stats.series_total_length, Duration::from_seconds(5 * 1320));
    assert_eq!(stats.music_media_count, 2);
    assert_eq!(stats.songs_count, 1);
    assert_eq!(stats.games_media_count, 3);
    assert_eq!(stats.programs_media_count, 1);
    assert_eq!(stats.total_media_count(), 9);
    Ok(())
}

#[tokio::test]
async fn test_serie_aggregates() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let (serie_id, season_ids) = setup_serie(&catalog).await?;

    assert_eq!(catalog.serie_seasons_count(serie_id).await?, 2);
    assert_eq!(catalog.serie_length(serie_id).await?, Duration::from_seconds(5 * 1320));
    assert_eq!(catalog.season_episodes_count(season_ids[1]).await?, 3);
    assert_eq!(
        catalog.season_length(season_ids[0]).await?,
        Duration::from_seconds(2 * 1320)
    );
    Ok(())
}

#[tokio::test]
async fn test_unstorable_lengths_are_rejected_and_totals_saturate() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    let (serie_id, season_ids) = setup_serie(&catalog).await?;
    let season = season_ids[0];

    let too_long = Episode::new(season, 9, "Forever", Duration::from_millis(u64::MAX));
    let error = catalog.episodes().add(too_long).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);

    let too_long = Song::new(EntityId::new(1), "Drone", Duration::from_millis(u64::MAX));
    let error = catalog.songs().add(too_long).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);

    for number in [10, 11] {
        catalog
            .episodes()
            .add(Episode::new(season, number, "Marathon", Duration::MAX_STORED))
            .await?;
    }
    let stored = catalog.episodes().list_in(season).await?;
    assert_eq!(stored.last().map(|e| e.length), Some(Duration::MAX_STORED));

    let longest = Duration::from_millis(u64::MAX);
    assert_eq!(catalog.season_length(season).await?, longest);
    assert_eq!(catalog.serie_length(serie_id).await?, longest);
    assert_eq!(catalog.stats().await?.series_total_length, longest);
    Ok(())
}

#[tokio::test]
async fn test_update_positions_repairs_gaps() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    for name in ["A", "B", "C"] {
        catalog.genres().add(Genre::new(name)).await?;
    }
    catalog.games().add(Game::new("Game", 1)).await?;

    sqlx::query("UPDATE genres SET position = position * 10")
        .execute(catalog.pool())
        .await
        .unwrap();

    assert_eq!(catalog.update_positions().await?, 2);

    let positions: Vec<(String, u32)> = catalog
        .genres()
        .list()
        .await?
        .into_iter()
        .map(|g| (g.name, g.position))
        .collect();
    assert_eq!(
        positions,
        vec![("A".to_string(), 0), ("B".to_string(), 1), ("C".to_string(), 2)]
    );
    assert_eq!(catalog.update_positions().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_new_data_empties_everything() -> FacadeResult<()> {
    let catalog = setup_catalog().await?;
    setup_serie(&catalog).await?;
    catalog.genres().add(Genre::new("Drama")).await?;
    catalog.programs().add(Program::new("Program", 1)).await?;

    catalog.new_data().await?;

    assert!(catalog.stats().await?.is_empty());
    assert_eq!(catalog.episodes().count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_file_catalog_persists_between_opens() -> FacadeResult<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.db");
    let config = Config::default();

    {
        let catalog = Catalog::open(&config, &path).await?;
        catalog.games().add(Game::new("Doom", 1)).await?;
    }

    let catalog = Catalog::open(&config, &path).await?;
    let games = catalog.games().list().await?;
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].name, "Doom");
    Ok(())
}
