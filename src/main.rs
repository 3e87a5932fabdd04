use clap::Parser;
use codex::application::{init::init, open_archive, summarize, Archive, ConfigService};
use codex::cli::{
    format_category_list, format_entry_detail, format_entry_list, format_summary,
    parse_relation_arg, Cli, Commands,
};
use codex::domain::{Category, EntryDraft, EntryPatch};
use codex::error::{CodexError, Result};
use codex::infrastructure::{FileStorage, FileSystemRepository};
use codex::EntryStore;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = codex::logging::init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn parse_category(value: &str) -> Result<Category> {
    Category::from_str(value).map_err(CodexError::InvalidCategory)
}

fn open_current() -> Result<Archive> {
    let repo = FileSystemRepository::discover()?;
    open_archive(&repo)
}

/// Writes are best-effort; a failed save is reported but not fatal.
fn warn_if_unsaved(store: &EntryStore<FileStorage>) {
    if let Some(err) = store.last_write_error() {
        eprintln!("Warning: changes could not be saved: {}", err);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init { path }) => {
            init(&path)?;
            println!("Initialized codex archive at {}", path.display());
            Ok(())
        }
        Some(Commands::List { category }) => {
            let archive = open_current()?;
            let entries = match category {
                Some(c) => archive.store.list_by_category(parse_category(&c)?),
                None => archive.store.list().iter().collect(),
            };
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let archive = open_current()?;
            let entry = archive
                .store
                .get(&id)
                .ok_or_else(|| CodexError::EntryNotFound(id.clone()))?;
            let linked = archive.store.linked_entries(&id);
            print!("{}", format_entry_detail(entry, &linked));
            Ok(())
        }
        Some(Commands::New {
            title,
            content,
            category,
            tags,
            image,
            relations,
        }) => {
            let mut archive = open_current()?;

            let category = match category {
                Some(c) => parse_category(&c)?,
                None => Category::default(),
            };
            let mut draft = EntryDraft::new(
                title.unwrap_or_default(),
                category,
                content.unwrap_or_default(),
            );
            for tag in &tags {
                draft.add_tag(tag);
            }
            draft.image_url = image.filter(|url| !url.trim().is_empty());
            for arg in &relations {
                let (target, label) = parse_relation_arg(arg);
                draft.add_relation(target, label);
            }
            draft.validate()?;

            let entry = archive.store.create(draft);
            warn_if_unsaved(&archive.store);
            println!("Created {} ({})", entry.title, entry.id);
            Ok(())
        }
        Some(Commands::Edit {
            id,
            title,
            content,
            category,
            tags,
            untags,
            clear_tags,
            image,
            clear_image,
            relations,
            unrelations,
            clear_relations,
        }) => {
            let mut archive = open_current()?;
            let existing = archive
                .store
                .get(&id)
                .ok_or_else(|| CodexError::EntryNotFound(id.clone()))?;

            let mut draft = EntryDraft::from(existing);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if let Some(c) = category {
                draft.category = parse_category(&c)?;
            }
            if clear_tags {
                draft.tags.clear();
            }
            for tag in &untags {
                draft.remove_tag(tag);
            }
            for tag in &tags {
                draft.add_tag(tag);
            }
            if clear_image {
                draft.image_url = None;
            } else if let Some(url) = image {
                draft.image_url = Some(url);
            }
            if clear_relations {
                draft.relations.clear();
            }
            for target in &unrelations {
                draft.remove_relation(target);
            }
            for arg in &relations {
                let (target, label) = parse_relation_arg(arg);
                if target != id {
                    draft.add_relation(target, label);
                }
            }
            draft.validate()?;

            let entry = archive
                .store
                .update(&id, EntryPatch::from_draft(draft))
                .ok_or_else(|| CodexError::EntryNotFound(id.clone()))?;
            warn_if_unsaved(&archive.store);
            println!("Updated {} ({})", entry.title, entry.id);
            Ok(())
        }
        Some(Commands::Delete { id }) => {
            let mut archive = open_current()?;
            let removed = archive
                .store
                .delete(&id)
                .ok_or_else(|| CodexError::EntryNotFound(id.clone()))?;
            warn_if_unsaved(&archive.store);
            println!("Deleted {} ({})", removed.title, removed.id);
            Ok(())
        }
        Some(Commands::Search { query }) => {
            let archive = open_current()?;
            let results = archive.store.search(&query);
            println!("{}", format_entry_list(&results).trim_end());
            Ok(())
        }
        Some(Commands::Stats) => {
            let archive = open_current()?;
            let summary = summarize(&archive.store, archive.config.recent_limit);
            print!("{}", format_summary(&summary, chrono::Utc::now()));
            Ok(())
        }
        Some(Commands::Categories) => {
            let archive = open_current()?;
            let summary = summarize(&archive.store, 0);
            print!("{}", format_category_list(&summary.category_counts));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("storage_key = {}", config.storage_key);
                println!("recent_limit = {}", config.recent_limit);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: codex config [--list | <key> [<value>]]");
                println!("Valid keys: storage_key, recent_limit, created");
                Ok(())
            }
        }
        None => {
            println!("codex - Worldbuilding archive");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
