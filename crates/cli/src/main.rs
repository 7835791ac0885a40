use anyhow::{Context, Result};
use catalog_config::{Config, ConfigManager};
use catalog_core::EntityKind;
use catalog_facade::Catalog;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

mod commands;

fn parse_kind(value: &str) -> Result<EntityKind, String> {
    value.parse()
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .required(true)
        .value_name("KIND")
        .value_parser(parse_kind)
        .help("Entity family, e.g. movie, serie, season, episode, song or book")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_name("ID")
        .value_parser(clap::value_parser!(i64))
        .help("Entity identifier")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .short('j')
        .long("json")
        .required(true)
        .value_name("DOC")
        .help("Entity as a JSON document")
}

fn build_cli() -> Command {
    Command::new("catalog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal catalog of movies, series, music, games, programs and books")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the database file (overrides the configuration)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the configuration and database"))
        .subcommand(Command::new("stats").about("Show catalog statistics"))
        .subcommand(
            Command::new("list")
                .about("List entries of one family in display order")
                .arg(kind_arg())
                .arg(
                    Arg::new("parent")
                        .short('p')
                        .long("parent")
                        .value_name("ID")
                        .value_parser(clap::value_parser!(i64))
                        .help("Only children of this parent"),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Add an entry at the end of its group")
                .arg(kind_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("update")
                .about("Replace the content of an entry")
                .arg(kind_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove an entry and its children")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("duplicate")
                .about("Copy an entry, with its children, to the end of its group")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("move-up")
                .about("Swap an entry with its predecessor")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("move-down")
                .about("Swap an entry with its successor")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(Command::new("reorder").about("Repair positions of every family"))
        .subcommand(
            Command::new("clear")
                .about("Delete the whole catalog")
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Required, the catalog cannot be restored")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<String>("config") {
        Some(dir) => Ok(ConfigManager::in_directory(dir)),
        None => ConfigManager::new().context("Failed to locate the configuration directory"),
    }
}

fn init_logging(config: &Config) {
    // RUST_LOG still wins over the configured level
    env_logger::Builder::new()
        .filter_level(config.app.log_level.to_level_filter())
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    if matches.subcommand_name() == Some("init") {
        manager
            .initialize()
            .context("Failed to write the default configuration")?;
    }

    let loaded = manager.load_with_env_overrides();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config);
    if let Err(e) = &loaded {
        log::warn!("Using default configuration: {}", e);
    }

    let database_path = matches
        .get_one::<String>("database")
        .map(PathBuf::from)
        .unwrap_or_else(|| manager.database_path(&config));
    let catalog = Catalog::open(&config, &database_path)
        .await
        .with_context(|| format!("Failed to open catalog at {}", database_path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Configuration at {}", manager.config_path().display());
            println!("Catalog initialized at {}", database_path.display());
            Ok(())
        }
        Some(("stats", _)) => commands::show_stats(&catalog).await,
        Some(("list", sub)) => commands::list(&catalog, sub).await,
        Some(("add", sub)) => commands::add(&catalog, sub).await,
        Some(("update", sub)) => commands::update(&catalog, sub).await,
        Some(("remove", sub)) => commands::remove(&catalog, sub).await,
        Some(("duplicate", sub)) => commands::duplicate(&catalog, sub).await,
        Some(("move-up", sub)) => commands::move_up(&catalog, sub).await,
        Some(("move-down", sub)) => commands::move_down(&catalog, sub).await,
        Some(("reorder", _)) => commands::reorder(&catalog).await,
        Some(("clear", sub)) => commands::clear(&catalog, sub).await,
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
