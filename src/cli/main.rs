use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fileref::core::telemetry::logging::init_logging;
use fileref::services::store::{LocalStore, LocalStoreConfig};
use fileref::services::walk::walk_book;
use fileref::{Element, FileRef, ResourceStore};
use serde::Serialize;

/// Print ids and labels for files within a book.
#[derive(Debug, Parser)]
#[command(name = "fileref", version)]
struct Args {
    /// Directory backing the book.
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    root: Option<PathBuf>,

    /// JSON book config with `book` and `base_path` keys.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Book name reported alongside each reference, when using `--root`.
    #[arg(long, default_value = "local", conflicts_with = "config")]
    book: String,

    /// Emit one JSON object per line.
    #[arg(long)]
    json: bool,

    /// Mark every reference as hidden.
    #[arg(long)]
    hidden: bool,

    /// Paths within the book; a trailing '/' marks a directory. Walks the
    /// whole book when omitted.
    paths: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FileRefDto {
    book: String,
    path: String,
    id: String,
    label: String,
    hidden: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = match (&args.config, &args.root) {
        (Some(config_path), _) => LocalStoreConfig::load(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?,
        (None, Some(root)) => LocalStoreConfig {
            book: args.book.clone(),
            base_path: root.clone(),
        },
        (None, None) => anyhow::bail!("either --root or --config is required"),
    };
    let book = config.book.clone();
    let paths = if args.paths.is_empty() {
        walk_book(&config.base_path)?
    } else {
        args.paths.clone()
    };
    let store: Arc<dyn ResourceStore> = Arc::new(LocalStore::create(config));
    tracing::info!(book = %book, count = paths.len(), "describing file references");

    for path in paths {
        let file = FileRef::new();
        file.set_locator(Some(store.clone()), Some(path.as_str()))
            .with_context(|| format!("invalid reference {path:?}"))?;
        file.set_hidden(args.hidden)?;
        let file = file.into_frozen();

        let dto = FileRefDto {
            book: book.clone(),
            id: file.default_id()?,
            label: file.label()?,
            hidden: file.is_hidden(),
            path,
        };
        if args.json {
            println!("{}", serde_json::to_string(&dto)?);
        } else {
            let marker = if dto.hidden { " [hidden]" } else { "" };
            println!("{}\t{}{}", dto.id, dto.label, marker);
        }
    }
    Ok(())
}
