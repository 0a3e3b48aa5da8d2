use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tool_builder::config::BuilderConfig;
use tool_builder::store::{ToolCatalog, ToolStore};
use tool_builder::types::{Level, OutcomeMessage};
use tool_builder::{collect, evaluate, EditSession, ToolRows};

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "tool-builder",
    about = "Author and run small decision-support tools"
)]
struct Cli {
    /// Directory holding tool-builder.toml; store paths resolve against it
    #[arg(long, env = "TOOL_BUILDER_ROOT", default_value = ".", global = true)]
    root: PathBuf,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List stored tools
    List,
    /// Create a tool from the template
    New {
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a tool
    Delete { id: String },
    /// Print a tool definition as JSON (defaults to the first stored tool)
    Show { id: Option<String> },
    /// Change a tool's name, description or fallback
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        fallback_level: Option<Level>,
        #[arg(long)]
        fallback_message: Option<String>,
    },
    /// Write the editor rows (inputs, scoring rules, rules) of a tool as JSON
    ExportRows {
        id: String,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Replace a tool's inputs, scoring rules and rules from an editor rows file
    ImportRows { id: String, file: PathBuf },
    /// Evaluate a tool (defaults to the first stored tool); unset inputs take their defaults
    Run {
        id: Option<String>,
        /// Input value as `input_id=value` (repeatable)
        #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = BuilderConfig::load(&cli.root)
        .with_context(|| format!("loading configuration from {}", cli.root.display()))?;
    init_tracing(&cfg.logging.level);

    let store = ToolStore::new(&cfg.store.path);
    match cli.cmd {
        Cmd::List => list(&store),
        Cmd::New { name } => {
            let name = name.unwrap_or_else(|| cfg.template.name.clone());
            create(&store, &name)
        }
        Cmd::Delete { id } => delete(&store, &id),
        Cmd::Show { id } => show(&store, id.as_deref()),
        Cmd::Edit {
            id,
            name,
            description,
            fallback_level,
            fallback_message,
        } => edit(
            &store,
            &id,
            name,
            description,
            fallback_level,
            fallback_message,
        ),
        Cmd::ExportRows { id, out } => export_rows(&store, &id, out.as_deref()),
        Cmd::ImportRows { id, file } => import_rows(&store, &id, &file),
        Cmd::Run { id, set, json } => run(&store, id.as_deref(), &set, json),
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got `{s}`"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing input id in `{s}`"));
    }
    Ok((id.to_string(), value.to_string()))
}

fn load(store: &ToolStore) -> Result<ToolCatalog> {
    store
        .load()
        .with_context(|| format!("loading tools from {}", store.path().display()))
}

fn save(store: &ToolStore, catalog: &ToolCatalog) -> Result<()> {
    store
        .save(catalog)
        .with_context(|| format!("saving tools to {}", store.path().display()))
}

/// The named tool, else the first one in the catalog.
fn select_tool<'a>(catalog: &'a ToolCatalog, id: Option<&'a str>) -> Result<&'a str> {
    match id {
        Some(id) => Ok(id),
        None => catalog
            .first_id()
            .map(String::as_str)
            .context("no tools yet; create one with `tool-builder new`"),
    }
}

fn list(store: &ToolStore) -> Result<()> {
    let catalog = load(store)?;
    if catalog.is_empty() {
        println!("No tools yet. Create one with `tool-builder new`.");
        return Ok(());
    }
    for (id, tool) in &catalog.tools {
        println!("{id}\t{}", tool.name);
    }
    Ok(())
}

fn create(store: &ToolStore, name: &str) -> Result<()> {
    let mut catalog = load(store)?;
    let id = catalog.create_tool(name);
    save(store, &catalog)?;
    println!("{id}");
    Ok(())
}

fn delete(store: &ToolStore, id: &str) -> Result<()> {
    let mut catalog = load(store)?;
    let removed = catalog.remove(id)?;
    save(store, &catalog)?;
    println!("deleted {id} ({})", removed.name);
    Ok(())
}

fn show(store: &ToolStore, id: Option<&str>) -> Result<()> {
    let catalog = load(store)?;
    let tool = catalog.get(select_tool(&catalog, id)?)?;
    println!("{}", serde_json::to_string_pretty(tool)?);
    Ok(())
}

fn edit(
    store: &ToolStore,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    fallback_level: Option<Level>,
    fallback_message: Option<String>,
) -> Result<()> {
    let mut catalog = load(store)?;
    let mut session = EditSession::open(&catalog, id)?;
    if let Some(name) = name {
        session.set_name(name);
    }
    if let Some(description) = description {
        session.set_description(description);
    }
    if fallback_level.is_some() || fallback_message.is_some() {
        let current = session
            .draft()
            .fallback
            .clone()
            .unwrap_or_else(OutcomeMessage::no_match);
        session.set_fallback(OutcomeMessage {
            level: fallback_level.unwrap_or(current.level),
            message: fallback_message.unwrap_or(current.message),
        });
    }
    session.commit(&mut catalog);
    save(store, &catalog)?;
    println!("saved {id}");
    Ok(())
}

fn export_rows(store: &ToolStore, id: &str, out: Option<&Path>) -> Result<()> {
    let catalog = load(store)?;
    let rows = ToolRows::from_tool(catalog.get(id)?);
    let text = serde_json::to_string_pretty(&rows)?;
    match out {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("writing rows to {}", path.display()))?;
            println!("wrote rows for {id} to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn import_rows(store: &ToolStore, id: &str, file: &Path) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading rows {}", file.display()))?;
    let rows: ToolRows =
        serde_json::from_str(&text).with_context(|| format!("parsing rows {}", file.display()))?;

    let mut catalog = load(store)?;
    let mut session = EditSession::open(&catalog, id)?;
    session.apply_rows(&rows);
    let draft = session.draft();
    println!(
        "{id}: {} inputs, {} scoring rules, {} rules",
        draft.inputs.len(),
        draft.scoring_rules.len(),
        draft.rules.len()
    );
    session.commit(&mut catalog);
    save(store, &catalog)
}

fn run(store: &ToolStore, id: Option<&str>, set: &[(String, String)], json: bool) -> Result<()> {
    let catalog = load(store)?;
    let id = select_tool(&catalog, id)?;
    let tool = catalog.get(id)?;
    let values = collect(tool, set.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    tracing::debug!(
        tool_id = id,
        inputs = values.len(),
        overrides = set.len(),
        "collected input values"
    );
    let eval = evaluate(tool, &values);
    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        if !tool.description.is_empty() {
            println!("{}\n{}\n", tool.name, tool.description);
        }
        println!("{}", render::evaluation_report(&eval));
    }
    Ok(())
}
