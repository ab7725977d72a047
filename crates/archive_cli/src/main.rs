use anyhow::{Context, Result};
use archive_core::catalog::{self, CatalogQuery};
use archive_core::navigation::{Page, ViewState, ViewStore, ViewUpdate};
use archive_core::{find_shortest_paths, summarize, CreatureRecord, PathElement, PathResult};
use archive_data::load_records;
use clap::{Parser, Subcommand};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "archive_cli", about = "Digimon archive and digivolution planner")]
struct Cli {
    /// Creature dataset (JSON array of records).
    #[arg(long, global = true, default_value = "./content/digimon.json")]
    data: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the archive.
    List {
        #[arg(long = "gen", default_value = catalog::ALL)]
        generation: String,
        #[arg(long = "attr", default_value = catalog::ALL)]
        attribute: String,
        /// Case-insensitive name search.
        #[arg(long, default_value = "")]
        q: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one creature with its evolution links.
    Show { name: String },
    /// Suggest creature names containing TERM.
    Suggest { term: String },
    /// List the available generation and attribute filters.
    Filters,
    /// Find every shortest digivolution path between two creatures.
    Plan {
        start: String,
        target: String,
        /// Print the formatted paths as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Open a view from a location fragment, e.g. "#page=archive&gen=Rookie".
    Open { fragment: String },
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn describe(record: &CreatureRecord) -> String {
    format!(
        "{:<20} {:<16} {:<8} {}",
        record.id.as_str(),
        record.generation.as_deref().unwrap_or("-"),
        record.attribute.as_deref().unwrap_or("-"),
        record.kind.as_deref().unwrap_or("-"),
    )
}

/// Joins rendered lines into command output, one per line.
fn to_output(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_list(records: &[CreatureRecord], query: &CatalogQuery) -> String {
    let page = catalog::browse(records, query);
    let mut lines: Vec<String> = page.items.iter().copied().map(describe).collect();
    lines.push(format!(
        "page {}/{}  ({} matching)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    ));
    to_output(&lines)
}

const STAT_ORDER: [&str; 6] = ["hp", "sp", "atk", "def", "int", "spi"];

/// `hp 287, sp 256, ...` with the usual stats first and any others after.
fn render_stats(stats: &serde_json::Map<String, serde_json::Value>) -> String {
    let known = STAT_ORDER
        .iter()
        .filter_map(|key| stats.get(*key).map(|value| (*key, value)));
    let others = stats
        .iter()
        .filter(|(key, _)| !STAT_ORDER.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value));
    known
        .chain(others)
        .map(|(key, value)| format!("{key} {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_detail(record: &CreatureRecord) -> String {
    let join = |refs: &[archive_core::EvolutionRef]| {
        if refs.is_empty() {
            "-".to_string()
        } else {
            refs.iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    };
    let mut lines = vec![
        record.id.to_string(),
        format!("  generation:    {}", record.generation.as_deref().unwrap_or("-")),
        format!("  attribute:     {}", record.attribute.as_deref().unwrap_or("-")),
        format!("  type:          {}", record.kind.as_deref().unwrap_or("-")),
    ];
    if let Some(image) = record.image_ref() {
        lines.push(format!("  image:         {image}"));
    }
    if let Some(description) = &record.description {
        lines.push(format!("  description:   {description}"));
    }
    if let Some(stats) = record
        .extra
        .get("base_stats")
        .and_then(serde_json::Value::as_object)
        .filter(|stats| !stats.is_empty())
    {
        lines.push(format!("  base stats:    {}", render_stats(stats)));
    }
    lines.push(format!("  evolves from:  {}", join(&record.evolves_from)));
    lines.push(format!("  evolves to:    {}", join(&record.evolves_to)));
    to_output(&lines)
}

fn render_path(path: &[PathElement]) -> String {
    path.iter()
        .map(|element| match element {
            PathElement::Node(node) => format!("{} [{}]", node.record.id, node.generation_label),
            PathElement::Step(step) => format!("-({})->", step.step),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_plan(start: &str, target: &str, paths: &[PathResult]) -> String {
    let summary = summarize(paths);
    let Some(steps) = summary.step_count else {
        return format!("No digivolution path found between {start} and {target}.\n");
    };
    let header = format!(
        "{} shortest path(s) from {start} to {target}, {steps} step(s) each:",
        summary.path_count
    );
    let lines: Vec<String> = std::iter::once(header)
        .chain(
            paths
                .iter()
                .enumerate()
                .map(|(i, path)| format!("  {}. {}", i + 1, render_path(path))),
        )
        .collect();
    to_output(&lines)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn show(records: &[CreatureRecord], name: &str) -> String {
    match catalog::find_record(records, &name.into()) {
        Some(record) => render_detail(record),
        None => format!("No creature named {name}.\n"),
    }
}

fn plan(records: &[CreatureRecord], start: &str, target: &str, json: bool) -> Result<String> {
    let paths = find_shortest_paths(start, target, records);
    tracing::info!(start, target, paths = paths.len(), "plan computed");
    if json {
        let mut body = serde_json::to_string_pretty(&paths).context("serializing paths")?;
        body.push('\n');
        return Ok(body);
    }
    Ok(render_plan(start, target, &paths))
}

fn open(records: &[CreatureRecord], fragment: &str) -> String {
    let mut store = ViewStore::default();
    let listener = store.on_change(|state| {
        tracing::debug!(fragment = %state.to_fragment(), "view changed");
    });
    store.navigate(ViewUpdate::from(ViewState::from_fragment(fragment)));
    store.remove_listener(listener);

    let view = store.current_view();
    match view.page {
        Page::Landing => format!(
            "Digimon archive: {} creatures. Try `list`, `show <NAME>` or `plan <START> <TARGET>`.\n",
            records.len()
        ),
        Page::Archive => render_list(
            records,
            &CatalogQuery {
                generation: view.generation.clone(),
                attribute: view.attribute.clone(),
                search: view.search.clone(),
                page: view.page_number,
            },
        ),
        Page::Detail => match &view.name {
            Some(name) => show(records, name),
            None => "No creature selected.\n".to_string(),
        },
        Page::Planner => "Digivolution planner: run `plan <START> <TARGET>`.\n".to_string(),
    }
}

fn run(cli: Cli) -> Result<String> {
    let records = load_records(&cli.data)?;
    let output = match cli.command {
        Commands::List {
            generation,
            attribute,
            q,
            page,
        } => render_list(
            &records,
            &CatalogQuery {
                generation,
                attribute,
                search: q,
                page,
            },
        ),
        Commands::Show { name } => show(&records, &name),
        Commands::Suggest { term } => {
            let lines: Vec<String> = catalog::suggest(&records, &term)
                .into_iter()
                .map(describe)
                .collect();
            if lines.is_empty() {
                String::new()
            } else {
                to_output(&lines)
            }
        }
        Commands::Filters => format!(
            "generations: {}\nattributes:  {}\n",
            catalog::generations(&records).join(", "),
            catalog::attributes(&records).join(", ")
        ),
        Commands::Plan {
            start,
            target,
            json,
        } => plan(&records, &start, &target, json)?,
        Commands::Open { fragment } => open(&records, &fragment),
    };
    Ok(output)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    print!("{}", run(cli)?);
    Ok(())
}
