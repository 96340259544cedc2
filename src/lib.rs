// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{search, AddLinkOutcome, BookmarkRepository, MigrationOutcome};
use chrono::Utc;
use domain::{CardPatch, LinkPatch};
use infrastructure::{Config, FileKeyValueStore};
use ports::{HtmlPresenter, TextPresenter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::args::{Args, Command};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting linkcards with arguments");

    let config = load_config(args.config.as_deref())?;
    let data_dir = match args.data_dir {
        Some(dir) => {
            debug!(?dir, "Using provided data directory");
            dir
        }
        None => config.storage_dir()?,
    };

    let storage = FileKeyValueStore::new(&data_dir)
        .with_context(|| format!("Failed to open bookmark store at {}", data_dir.display()))?;

    let mut repository = BookmarkRepository::with_options(storage, config.repository_options());
    let migration = repository.migrate()?;
    repository.load()?;
    info!(cards = repository.store().groups.len(), "Loaded bookmark store");

    execute(&mut repository, args.command, &config, migration)
}

fn execute(
    repository: &mut BookmarkRepository<FileKeyValueStore>,
    command: Command,
    config: &Config,
    migration: MigrationOutcome,
) -> Result<()> {
    match command {
        Command::NewCard { title, desc } => {
            let group = repository.create_group(&title, &desc)?;
            println!("Created card {} ({})", group.id, group.title);
        }
        Command::EditCard { card_id, title, desc } => {
            match repository.update_card(&card_id, &CardPatch { title, desc })? {
                Some(group) => println!("Updated card {} ({})", group.id, group.title),
                None => println!("No card {card_id}"),
            }
        }
        Command::DeleteCard { card_id } => match repository.delete_group(&card_id)? {
            Some(group) => println!(
                "Deleted card {} ({}) and {} link(s)",
                group.id,
                group.title,
                group.links.len()
            ),
            None => println!("No card {card_id}"),
        },
        Command::AddLink {
            url,
            card,
            title,
            note,
        } => {
            let url = url.trim();
            let outcome = match card {
                Some(card_id) => repository.add_link(&card_id, url, title.trim(), note.trim())?,
                None => repository.add_link_to_new_card(url, title.trim(), note.trim())?,
            };
            match outcome {
                AddLinkOutcome::Added { link, group } => {
                    println!("Added link {} to card {} ({})", link.id, group.id, group.title)
                }
                AddLinkOutcome::Duplicate => {
                    println!("This exact URL already exists in the destination card.")
                }
            }
        }
        Command::EditLink {
            card_id,
            link_id,
            url,
            title,
            note,
        } => {
            let patch = LinkPatch {
                url: url.map(|u| u.trim().to_string()),
                title,
                note,
            };
            match repository.update_link(&card_id, &link_id, &patch)? {
                Some(link) => println!("Updated link {} ({})", link.id, link.url),
                None => println!("No link {link_id} in card {card_id}"),
            }
        }
        Command::RemoveLink { card_id, link_id } => {
            match repository.remove_link(&card_id, &link_id)? {
                Some(link) => println!("Removed link {} ({})", link.id, link.url),
                None => println!("No link {link_id} in card {card_id}"),
            }
        }
        Command::Tag { card_id, tags } => match repository.add_tags(&card_id, &tags)? {
            Some(added) => println!("Added {added} tag(s) to card {card_id}"),
            None => println!("No card {card_id}"),
        },
        Command::Untag { card_id, tag } => match repository.remove_tag(&card_id, &tag)? {
            Some(true) => println!("Removed tag {tag} from card {card_id}"),
            Some(false) => println!("Card {card_id} has no tag {tag}"),
            None => println!("No card {card_id}"),
        },
        Command::List { query, json, html } => {
            let view = search(repository.store(), query.as_deref().unwrap_or_default());
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if html {
                println!("{}", HtmlPresenter::new().render(&view));
            } else {
                print!("{}", TextPresenter::new().render(&view));
            }
        }
        Command::Export { output } => {
            let path = export_path(output, config);
            let json = repository.export_json()?;
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write backup to {}", path.display()))?;
            println!("Exported backup to {}", path.display());
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read backup {}", file.display()))?;
            let summary = repository
                .import_json(&raw)
                .context("Failed to restore")?;
            println!(
                "Backup restored and merged: {} card(s) created, {} link(s) added, {} tag(s) added",
                summary.groups_created, summary.links_added, summary.tags_added
            );
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("This will remove ALL cards and links. Re-run with --yes to continue.");
            }
            repository.clear_all()?;
            println!("Removed all cards and links");
        }
        Command::Migrate => report_migration(migration),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(path),
            None => Ok(Config::default()),
        },
    }
}

/// A directory (existing, or the configured default) gets a timestamped
/// backup file name; anything else is used as the file path.
fn export_path(output: Option<PathBuf>, config: &Config) -> PathBuf {
    let file_name = application::backup_file_name(Utc::now());
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => config.export_dir().join(file_name),
    }
}

fn report_migration(outcome: MigrationOutcome) {
    match outcome {
        MigrationOutcome::AlreadyCurrent => println!("Store already uses the current schema"),
        MigrationOutcome::NothingToMigrate => println!("No legacy data found"),
        MigrationOutcome::Migrated { from, groups } => {
            println!("Migrated {groups} card(s) from schema {from}")
        }
        MigrationOutcome::Failed { from } => {
            println!("Legacy {from} data could not be parsed; nothing migrated")
        }
    }
}
