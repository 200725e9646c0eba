use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use omnibar::{
    search_items, ControllerOptions, EngineConfig, Error, ItemRegistry, JsonQueryStore,
    MatchOptions, Navigator, QueryContext, QueryController, QueryPhase, Result, SearchSnapshot,
    SearchableItem, Suggestion, SuggestionAction, SuggestionEngine, SuggestionKind,
    SuggestionSource,
};

mod cli;
use cli::display::{self, colors};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            catalog,
            query,
            limit,
            config,
        } => run_search(&catalog, &query, limit, config.as_deref()),
        Commands::Suggest {
            catalog,
            query,
            filters,
            config,
            state_dir,
        } => run_suggest(&catalog, &query, filters, config.as_deref(), state_dir.as_deref()),
        Commands::Repl {
            catalog,
            config,
            state_dir,
        } => run_repl(&catalog, config.as_deref(), state_dir.as_deref()).await,
        Commands::Inspect { catalog } => run_inspect(&catalog),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Shared loading
// ─────────────────────────────────────────────────────────────────────────

fn load_catalog(path: &Path) -> Result<Vec<SearchableItem>> {
    let raw = fs::read_to_string(path).map_err(|source| Error::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::CatalogParse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn build_engine(
    catalog: &Path,
    config: EngineConfig,
    state_dir: Option<&Path>,
) -> Result<SuggestionEngine> {
    let items = load_catalog(catalog)?;
    let engine = match state_dir {
        Some(dir) => SuggestionEngine::new(
            config,
            Box::new(JsonQueryStore::new(dir.join("recent-queries.json"))),
        ),
        None => SuggestionEngine::in_memory(config),
    };
    Ok(engine.with_items(items))
}

fn print_suggestions(label: &str, suggestions: &[Suggestion]) {
    display::section_top(label);
    if suggestions.is_empty() {
        display::row(" nothing to suggest");
    }
    for (position, suggestion) in suggestions.iter().enumerate() {
        display::row(&format!(
            " {:>2}. {} {}",
            position + 1,
            display::kind_badge(suggestion.kind),
            suggestion.text,
        ));
        if let Some(description) = &suggestion.description {
            display::row(&format!("               {}", display::dim(description)));
        }
    }
    display::section_bot();
}

// ─────────────────────────────────────────────────────────────────────────
// Subcommands
// ─────────────────────────────────────────────────────────────────────────

fn run_search(catalog: &Path, query: &str, limit: usize, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let registry = ItemRegistry::from_items(load_catalog(catalog)?);
    let options = MatchOptions {
        limit,
        max_edit_distance: config.max_edit_distance,
        kinds: None,
    };
    let matches = search_items(&registry, query, &options);

    if matches.is_empty() {
        println!("no matches for {:?}", query);
        return Ok(());
    }

    display::section_top(&format!("MATCHES: {}", query));
    for (position, matched) in matches.iter().enumerate() {
        display::row(&format!(
            " {:>2}. {} {} {}",
            position + 1,
            display::score_value(matched.score),
            display::field_label(matched.field),
            matched.item.title,
        ));
        display::row(&format!(
            "      {}",
            display::dim(&matched.item.resolved_href()),
        ));
    }
    display::section_bot();
    Ok(())
}

fn run_suggest(
    catalog: &Path,
    query: &str,
    filters: Vec<String>,
    config: Option<&Path>,
    state_dir: Option<&Path>,
) -> Result<()> {
    let engine = build_engine(catalog, load_config(config)?, state_dir)?;
    let context = QueryContext {
        max_results: None,
        active_filters: filters,
    };
    let suggestions = engine.suggest(query, &context)?;

    let label = if query.trim().is_empty() {
        "DEFAULTS".to_string()
    } else {
        format!("SUGGESTIONS: {}", query)
    };
    print_suggestions(&label, &suggestions);

    if engine.history_degraded() {
        eprintln!("note: query history is not being persisted this session");
    }
    Ok(())
}

fn run_inspect(catalog: &Path) -> Result<()> {
    let registry = ItemRegistry::from_items(load_catalog(catalog)?);

    let mut by_kind: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut tagged = 0usize;
    let mut described = 0usize;
    let mut linked = 0usize;
    for item in registry.items() {
        *by_kind.entry(item.kind.as_str()).or_default() += 1;
        if !item.tags.is_empty() {
            tagged += 1;
        }
        if item.description.is_some() {
            described += 1;
        }
        if item.href().is_some() {
            linked += 1;
        }
    }

    display::section_top("CATALOG");
    display::row(&format!(" items       {:>5}", registry.len()));
    for (kind, count) in &by_kind {
        display::row(&format!(" {:<11} {:>5}", kind, count));
    }
    display::section_mid("COVERAGE");
    display::row(&format!(" tagged      {:>5}", tagged));
    display::row(&format!(" described   {:>5}", described));
    display::row(&format!(" linked      {:>5}", linked));
    display::section_bot();
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// REPL
// ─────────────────────────────────────────────────────────────────────────

/// Navigator that prints where activation would have taken the user.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, href: &str) {
        println!("→ {}", href);
    }
}

async fn run_repl(catalog: &Path, config: Option<&Path>, state_dir: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let options = ControllerOptions::from_config(&config);
    let engine = Arc::new(build_engine(catalog, config, state_dir)?);
    let source: Arc<dyn SuggestionSource> = engine.clone();
    let controller = QueryController::spawn(source, Arc::new(PrintNavigator), options);
    let mut state = controller.watch();

    println!("omnibar repl");
    println!("  <text>        submit a query (empty line shows the defaults view)");
    println!("  <number>      activate that suggestion");
    println!("  :filter <id>  toggle a filter");
    println!("  :quit         leave");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        let input = line.trim();

        if input == ":quit" || input == ":q" {
            break;
        }
        if let Some(id) = input.strip_prefix(":filter ") {
            let Some(filter) = engine.config().filter(id.trim()) else {
                println!("unknown filter {:?}", id.trim());
                continue;
            };
            controller.activate(Suggestion {
                id: format!("filter-{}", filter.id),
                kind: SuggestionKind::Filter,
                text: filter.label.clone(),
                description: None,
                category: None,
                action: SuggestionAction::ToggleFilter {
                    filter_id: filter.id.clone(),
                },
            });
            render_next(&mut state).await;
            continue;
        }
        if let Ok(position) = input.parse::<usize>() {
            let snapshot = controller.snapshot();
            let Some(suggestion) = position
                .checked_sub(1)
                .and_then(|index| snapshot.suggestions.get(index))
                .cloned()
            else {
                println!("no suggestion #{}", position);
                continue;
            };
            let navigates = matches!(suggestion.action, SuggestionAction::Navigate { .. });
            controller.activate(suggestion);
            if navigates {
                // Give the task a beat to run the navigator print.
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            } else {
                render_next(&mut state).await;
            }
            continue;
        }

        controller.submit(input);
        render_next(&mut state).await;
    }

    let degraded = engine.history_degraded();
    controller.shutdown().await;
    if degraded {
        eprintln!("note: query history was not persisted this session");
    }
    Ok(())
}

/// Wait for the next settled snapshot and render it.
async fn render_next(state: &mut watch::Receiver<SearchSnapshot>) {
    while state.changed().await.is_ok() {
        let snapshot = state.borrow_and_update().clone();
        match snapshot.phase {
            QueryPhase::Ready => {
                let label = if snapshot.query.trim().is_empty() {
                    "DEFAULTS".to_string()
                } else {
                    let mut label = format!("SUGGESTIONS: {}", snapshot.query);
                    if !snapshot.active_filters.is_empty() {
                        label.push_str(&format!(" [{}]", snapshot.active_filters.join(", ")));
                    }
                    label
                };
                print_suggestions(&label, &snapshot.suggestions);
                return;
            }
            QueryPhase::Failed => {
                let message = snapshot.error.as_deref().unwrap_or("search failed");
                println!("{}", display::paint(colors::RED, message));
                return;
            }
            _ => {}
        }
    }
}
