use anyhow::{bail, Context, Result};
use catalog_core::{CatalogEntity, CatalogStats, EntityId, EntityKind, Repository};
use catalog_facade::{Catalog, Facade};
use clap::ArgMatches;
use console::style;

/// Runs `$body` with `$facade` bound to the facade of `$kind`
macro_rules! with_facade {
    ($catalog:expr, $kind:expr, |$facade:ident| $body:expr) => {
        match $kind {
            EntityKind::Genre => {
                let $facade = $catalog.genres();
                $body
            }
            EntityKind::Movie => {
                let $facade = $catalog.movies();
                $body
            }
            EntityKind::Serie => {
                let $facade = $catalog.series();
                $body
            }
            EntityKind::Season => {
                let $facade = $catalog.seasons();
                $body
            }
            EntityKind::Episode => {
                let $facade = $catalog.episodes();
                $body
            }
            EntityKind::Music => {
                let $facade = $catalog.music();
                $body
            }
            EntityKind::Song => {
                let $facade = $catalog.songs();
                $body
            }
            EntityKind::Game => {
                let $facade = $catalog.games();
                $body
            }
            EntityKind::Program => {
                let $facade = $catalog.programs();
                $body
            }
            EntityKind::BookCategory => {
                let $facade = $catalog.book_categories();
                $body
            }
            EntityKind::Book => {
                let $facade = $catalog.books();
                $body
            }
        }
    };
}

/// Show catalog statistics
pub async fn show_stats(catalog: &Catalog) -> Result<()> {
    let stats = catalog
        .stats()
        .await
        .context("Failed to compute statistics")?;

    println!("\n{}", style("Catalog Statistics").bold().cyan());
    println!("{}", "=".repeat(60));
    for line in stats_lines(&stats) {
        println!("{}", line);
    }
    Ok(())
}

/// List entries of one family
pub async fn list(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let kind = kind(matches)?;
    let parent = matches.get_one::<i64>("parent").copied().map(EntityId::new);

    let lines = list_entries(catalog, kind, parent).await?;
    if lines.is_empty() {
        println!("No {} entries. Use 'add' to create one.", kind);
        return Ok(());
    }

    println!("\n{} {} entries", style(lines.len()).bold().cyan(), kind);
    println!("{}", "=".repeat(60));
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// Add an entry described by a JSON document
pub async fn add(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let kind = kind(matches)?;
    let json = json(matches)?;

    let summary = add_entry(catalog, kind, json).await?;
    println!("{} Added {}", style("✓").green().bold(), summary);
    Ok(())
}

/// Replace the content of an entry described by a JSON document
pub async fn update(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let kind = kind(matches)?;
    let json = json(matches)?;

    with_facade!(catalog, kind, |facade| update_in(facade, json).await)?;
    println!("{} Updated {}", style("✓").green().bold(), kind);
    Ok(())
}

pub async fn remove(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let (kind, id) = target(matches)?;

    with_facade!(catalog, kind, |facade| facade.remove(id).await)
        .with_context(|| format!("Failed to remove {} {}", kind, id))?;
    println!("{} Removed {} {}", style("✓").green().bold(), kind, id);
    Ok(())
}

pub async fn duplicate(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let (kind, id) = target(matches)?;

    let summary = duplicate_entry(catalog, kind, id).await?;
    println!("{} Duplicated {} {} as {}", style("✓").green().bold(), kind, id, summary);
    Ok(())
}

pub async fn move_up(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let (kind, id) = target(matches)?;

    with_facade!(catalog, kind, |facade| facade.move_up(id).await)
        .with_context(|| format!("Failed to move {} {} up", kind, id))?;
    println!("{} Moved {} {} up", style("✓").green().bold(), kind, id);
    Ok(())
}

pub async fn move_down(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    let (kind, id) = target(matches)?;

    with_facade!(catalog, kind, |facade| facade.move_down(id).await)
        .with_context(|| format!("Failed to move {} {} down", kind, id))?;
    println!("{} Moved {} {} down", style("✓").green().bold(), kind, id);
    Ok(())
}

/// Repair positions of every family
pub async fn reorder(catalog: &Catalog) -> Result<()> {
    let repaired = catalog
        .update_positions()
        .await
        .context("Failed to repair positions")?;

    println!("{} {} position(s) repaired", style("✓").green().bold(), repaired);
    Ok(())
}

/// Delete the whole catalog
pub async fn clear(catalog: &Catalog, matches: &ArgMatches) -> Result<()> {
    if !matches.get_flag("force") {
        bail!("Refusing to clear the catalog without --force");
    }

    catalog.new_data().await.context("Failed to clear the catalog")?;
    println!("{} Catalog cleared", style("✓").green().bold());
    Ok(())
}

// ===== Typed operations =====

pub(crate) async fn list_entries(
    catalog: &Catalog,
    kind: EntityKind,
    parent: Option<EntityId>,
) -> Result<Vec<String>> {
    with_facade!(catalog, kind, |facade| list_in(facade, parent).await)
}

pub(crate) async fn add_entry(catalog: &Catalog, kind: EntityKind, json: &str) -> Result<String> {
    with_facade!(catalog, kind, |facade| add_to(facade, json).await)
}

pub(crate) async fn duplicate_entry(
    catalog: &Catalog,
    kind: EntityKind,
    id: EntityId,
) -> Result<String> {
    with_facade!(catalog, kind, |facade| {
        let copy = facade
            .duplicate(id)
            .await
            .with_context(|| format!("Failed to duplicate {} {}", kind, id))?;
        Ok(summary(&copy))
    })
}

async fn list_in<T, R>(facade: &Facade<T, R>, parent: Option<EntityId>) -> Result<Vec<String>>
where
    T: CatalogEntity,
    R: Repository<T> + 'static,
{
    let entries = match parent {
        Some(parent) => facade.list_in(parent).await?,
        None => facade.list().await?,
    };

    entries.iter().map(describe).collect()
}

async fn add_to<T, R>(facade: &Facade<T, R>, json: &str) -> Result<String>
where
    T: CatalogEntity,
    R: Repository<T> + 'static,
{
    let entity: T = serde_json::from_str(json)
        .with_context(|| format!("Invalid {} document", T::KIND))?;
    let stored = facade
        .add(entity)
        .await
        .with_context(|| format!("Failed to add {}", T::KIND))?;
    Ok(summary(&stored))
}

async fn update_in<T, R>(facade: &Facade<T, R>, json: &str) -> Result<()>
where
    T: CatalogEntity,
    R: Repository<T> + 'static,
{
    let entity: T = serde_json::from_str(json)
        .with_context(|| format!("Invalid {} document", T::KIND))?;
    facade
        .update(entity)
        .await
        .with_context(|| format!("Failed to update {}", T::KIND))?;
    Ok(())
}

// ===== Formatting =====

fn summary<T: CatalogEntity>(entity: &T) -> String {
    format!(
        "{} #{} at position {}",
        T::KIND,
        entity.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
        entity.position()
    )
}

fn describe<T: CatalogEntity>(entity: &T) -> Result<String> {
    let json = serde_json::to_string(entity).context("Failed to serialize entry")?;
    Ok(format!(
        "[{}] #{} {}",
        entity.position(),
        entity.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
        json
    ))
}

pub(crate) fn stats_lines(stats: &CatalogStats) -> Vec<String> {
    vec![
        format!("Genres: {}", stats.genres_count),
        format!(
            "Movies: {} on {} media, {}",
            stats.movies_count, stats.movies_media_count, stats.movies_total_length
        ),
        format!(
            "Series: {} with {} seasons and {} episodes, {}",
            stats.series_count, stats.seasons_count, stats.episodes_count, stats.series_total_length
        ),
        format!(
            "Music: {} on {} media with {} songs, {}",
            stats.music_count, stats.music_media_count, stats.songs_count, stats.music_total_length
        ),
        format!("Games: {} on {} media", stats.games_count, stats.games_media_count),
        format!(
            "Programs: {} on {} media",
            stats.programs_count, stats.programs_media_count
        ),
        format!(
            "Books: {} in {} categories",
            stats.books_count, stats.book_categories_count
        ),
        format!(
            "Total: {} media, {}",
            stats.total_media_count(),
            stats.total_length()
        ),
    ]
}

// ===== Arguments =====

fn kind(matches: &ArgMatches) -> Result<EntityKind> {
    matches
        .get_one::<EntityKind>("kind")
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Entity kind is required"))
}

fn json(matches: &ArgMatches) -> Result<&str> {
    matches
        .get_one::<String>("json")
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("JSON document is required"))
}

fn target(matches: &ArgMatches) -> Result<(EntityKind, EntityId)> {
    let id = matches
        .get_one::<i64>("id")
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Entity ID is required"))?;
    Ok((kind(matches)?, EntityId::new(id)))
}

#[cfg(test)]
mod tests;
