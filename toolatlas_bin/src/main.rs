use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use toolatlas::{
    MergeConfig, OutputLayout, ToolAtlasError, ToolPage,
    catalog,
    favorites::{FavoritesStore, FileFavorites},
    filter::{self, SortKey},
    merge, query,
    view::ViewState,
};

#[derive(Parser)]
#[command(
    name = "toolatlas",
    about = "Merge and browse the bioinformatics tool catalog",
    version
)]
struct Cli {
    /// Where the local favorites set is persisted.
    #[arg(long, global = true, default_value = ".toolatlas/favorites.json")]
    favorites_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge per-tool metadata files into the catalog artifacts.
    Merge {
        /// Root holding one subdirectory per tool.
        #[arg(long, default_value = "content/data")]
        content_root: PathBuf,
        /// Where the artifacts are written.
        #[arg(long, default_value = "public/metadata")]
        output_root: PathBuf,
    },
    /// Search, filter and sort the merged catalog.
    Search {
        /// Search string, e.g. "alignment tag:'Genomics'".
        query: Option<String>,
        #[arg(long, default_value = "public/metadata")]
        output_root: PathBuf,
        /// Start from a shareable view string, e.g. "q=bwa&galaxy=1".
        #[arg(long)]
        view: Option<String>,
        /// Only tools with a bioconda package.
        #[arg(long)]
        bioconda: bool,
        /// Only tools with a biocontainers image.
        #[arg(long)]
        biocontainers: bool,
        /// Only tools available in Galaxy.
        #[arg(long)]
        galaxy: bool,
        /// Only tools under this license.
        #[arg(long)]
        license: Option<String>,
        /// Only favorited tools.
        #[arg(long)]
        favorites: bool,
        /// Sort order: name, created or updated.
        #[arg(long)]
        sort: Option<String>,
        /// Print at most this many tools.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one tool's full page record.
    Show {
        tool_name: String,
        #[arg(long, default_value = "public/metadata")]
        output_root: PathBuf,
    },
    /// Manage the local favorites set.
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
}

#[derive(Subcommand)]
enum FavAction {
    Add { tool_name: String },
    Remove { tool_name: String },
    List,
}

fn main() -> ExitCode {
    toolatlas::init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            tracing::error!(error = %why, "command failed");
            eprintln!("Error: {why}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ToolAtlasError> {
    match cli.command {
        Command::Merge {
            content_root,
            output_root,
        } => {
            let report = merge::run(&MergeConfig {
                content_root,
                output_root,
            })?;
            println!(
                "merged {} tools ({} folders skipped, {} files unreadable)",
                report.tools_merged, report.tools_skipped, report.files_failed
            );
            Ok(())
        }
        Command::Search {
            query,
            output_root,
            view,
            bioconda,
            biocontainers,
            galaxy,
            license,
            favorites,
            sort,
            limit,
        } => {
            let layout = OutputLayout::new(output_root);
            let summaries = catalog::load_summaries(&layout.combined_path())?;
            let store = FileFavorites::load(&cli.favorites_file)?;

            let mut state = view
                .map(|raw| ViewState::from_query_string(&raw))
                .unwrap_or_default();
            if let Some(query) = query {
                state.query = query;
            }
            state.filters.bioconda |= bioconda;
            state.filters.biocontainers |= biocontainers;
            state.filters.galaxy |= galaxy;
            if license.is_some() {
                state.filters.license = license;
            }
            state.filters.favorites_only |= favorites;
            if let Some(sort) = sort {
                state.sort = SortKey::parse(&sort).ok_or_else(|| {
                    ToolAtlasError::InvalidState(format!("unknown sort key '{sort}'"))
                })?;
            }

            let matched = query::search(&summaries, &state.query, state.sort);
            let mut tools = filter::apply(&matched, &state.filters, &store);
            if let Some(limit) = limit {
                tools.truncate(limit);
            }

            for tool in &tools {
                println!(
                    "{}\t{}\t{}",
                    tool.tool_name,
                    tool.license().unwrap_or("-"),
                    tool.description().unwrap_or("-")
                );
            }
            println!("{} tools", tools.len());
            println!("view: {}", state.to_query_string());
            Ok(())
        }
        Command::Show {
            tool_name,
            output_root,
        } => {
            let layout = OutputLayout::new(output_root);
            let page = catalog::load_page(&layout, &tool_name)?;
            print_page(&page);
            Ok(())
        }
        Command::Fav { action } => {
            let mut store = FileFavorites::load(&cli.favorites_file)?;
            match action {
                FavAction::Add { tool_name } => {
                    store.add(&tool_name)?;
                    println!("added '{tool_name}'");
                }
                FavAction::Remove { tool_name } => {
                    store.remove(&tool_name)?;
                    println!("removed '{tool_name}'");
                }
                FavAction::List => {
                    for name in store.names() {
                        println!("{name}");
                    }
                }
            }
            Ok(())
        }
    }
}

/// Missing fields render as placeholders, never as an error.
fn print_page(page: &ToolPage) {
    let headline = [
        ("name", &["bioconda__name", "biotools__name", "biocontainers__name", "bioschemas__name"][..]),
        ("summary", &["bioconda__summary", "biotools__summary", "biocontainers__summary", "galaxy__summary"][..]),
        ("home", &["bioconda__home", "biotools__home", "bioschemas__home"][..]),
        ("license", &["bioconda__license", "biotools__license", "biocontainers__license", "bioschemas__license"][..]),
        ("version", &["bioconda__version", "biotools__version", "bioschemas__version"][..]),
    ];

    println!("{}", page.tool_name);
    for (label, keys) in headline {
        println!("  {label}: {}", page.first_str(keys).unwrap_or("-"));
    }

    let sources: Vec<&str> = page.contents.iter().map(|s| s.as_str()).collect();
    println!("  sources: {}", if sources.is_empty() { "-".to_string() } else { sources.join(", ") });

    println!("  metadata:");
    for (key, value) in &page.page_metadata {
        println!("    {key}: {}", render_value(value));
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
