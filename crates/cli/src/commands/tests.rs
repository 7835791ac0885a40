use super::*;
use catalog_core::{CatalogStats, Duration, ValidationRules};

async fn setup_catalog() -> Catalog {
    Catalog::in_memory(ValidationRules::with_max_year(2024))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_list_empty_family() {
    let catalog = setup_catalog().await;
    let lines = list_entries(&catalog, EntityKind::Game, None).await.unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
async fn test_add_from_json() {
    let catalog = setup_catalog().await;

    let summary = add_entry(&catalog, EntityKind::Genre, r#"{"name": "Drama"}"#)
        .await
        .unwrap();
    assert_eq!(summary, "Genre #1 at position 0");

    add_entry(&catalog, EntityKind::Genre, r#"{"name": "Comedy"}"#)
        .await
        .unwrap();
    let lines = list_entries(&catalog, EntityKind::Genre, None).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("[1] #2 "));
    assert!(lines[1].contains("Comedy"));
}

#[tokio::test]
async fn test_add_child_and_list_by_parent() {
    let catalog = setup_catalog().await;
    add_entry(
        &catalog,
        EntityKind::Music,
        r#"{"name": "Album", "media_count": 1}"#,
    )
    .await
    .unwrap();

    add_entry(
        &catalog,
        EntityKind::Song,
        r#"{"music_id": 1, "name": "Intro", "length": 95000}"#,
    )
    .await
    .unwrap();

    let lines = list_entries(&catalog, EntityKind::Song, Some(EntityId::new(1)))
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Intro"));
}

#[tokio::test]
async fn test_add_rejects_malformed_json() {
    let catalog = setup_catalog().await;

    let result = add_entry(&catalog, EntityKind::Game, "{not json").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_add_reports_validation_failure() {
    let catalog = setup_catalog().await;

    let error = add_entry(&catalog, EntityKind::Genre, r#"{"name": " "}"#)
        .await
        .unwrap_err();
    assert!(format!("{:#}", error).contains("Validation failed"));
}

#[tokio::test]
async fn test_duplicate_entry() {
    let catalog = setup_catalog().await;
    add_entry(
        &catalog,
        EntityKind::Program,
        r#"{"name": "Editor", "media_count": 1}"#,
    )
    .await
    .unwrap();

    let summary = duplicate_entry(&catalog, EntityKind::Program, EntityId::new(1))
        .await
        .unwrap();
    assert_eq!(summary, "Program #2 at position 1");
}

#[test]
fn test_stats_lines() {
    let stats = CatalogStats {
        movies_count: 2,
        movies_media_count: 3,
        movies_total_length: Duration::from_seconds(3 * 3600),
        ..CatalogStats::default()
    };

    let lines = stats_lines(&stats);
    assert_eq!(lines[1], "Movies: 2 on 3 media, 3:00:00");
    assert_eq!(lines.last().unwrap(), "Total: 3 media, 3:00:00");
}
