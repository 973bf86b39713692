//! acyclic command-line tool.
//!
//! Loads a JSON graph document (see [`acyclic_cli::GraphDocument`]), builds
//! it through the acyclic core so every edge is cycle-checked, and renders
//! the result or a subgraph of it.
//!
//! Exit codes: 0 = success, 1 = graph error (cycle or invalid endpoint),
//! 2 = bad input document or options, 3 = I/O error.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use acyclic_cli::{
    check_document, load_document, load_style, render_document, CliError, RenderOptions,
};
use acyclic_render::{DotStyle, RenderFormat};

/// Build, check, and render directed acyclic graphs.
#[derive(Parser)]
#[command(name = "acyclic", about = "Build, check, and render directed acyclic graphs")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render a graph document as DOT or JSON.
    Render {
        /// Path to the graph document, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output format: dot, json.
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Extract these vertices and all their ancestors.
        #[arg(long, value_delimiter = ',')]
        ancestors_of: Vec<usize>,

        /// Extract these vertices and all their descendants.
        #[arg(long, value_delimiter = ',')]
        descendants_of: Vec<usize>,

        /// Payload key to use as the node label (DOT only).
        #[arg(long)]
        label_key: Option<String>,

        /// JSON file with a DOT style (graph_name, vertex_attrs, edge_attrs).
        #[arg(long)]
        style: Option<PathBuf>,

        /// Name of the DOT digraph (overrides the style file).
        #[arg(long)]
        graph_name: Option<String>,
    },

    /// Validate a graph document and print a summary as JSON.
    Check {
        /// Path to the graph document, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            input,
            format,
            ancestors_of,
            descendants_of,
            label_key,
            style,
            graph_name,
        } => run_render(
            &input,
            &format,
            ancestors_of,
            descendants_of,
            label_key,
            style,
            graph_name,
        ),
        Commands::Check { input } => run_check(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Execute the render subcommand.
fn run_render(
    input: &str,
    format: &str,
    ancestors_of: Vec<usize>,
    descendants_of: Vec<usize>,
    label_key: Option<String>,
    style_path: Option<PathBuf>,
    graph_name: Option<String>,
) -> Result<(), CliError> {
    let format: RenderFormat = format.parse()?;

    let mut style = match style_path {
        Some(path) => load_style(&path)?,
        None => DotStyle::default(),
    };
    if let Some(name) = graph_name {
        style.graph_name = name;
    }

    let options = RenderOptions {
        format,
        ancestors_of,
        descendants_of,
        label_key,
        style,
    };

    let doc = load_document(input)?;
    print!("{}", render_document(&doc, &options)?);
    Ok(())
}

/// Execute the check subcommand.
fn run_check(input: &str) -> Result<(), CliError> {
    let doc = load_document(input)?;
    let report = check_document(&doc)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
