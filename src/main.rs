//! dossier-nav CLI - renders the navigation of a documentation site
//!
//! Usage: dossier-nav [OPTIONS] <REGISTRY>
//!
//! Reads a type registry (JSON or `var TYPES = {...};` script) and prints the
//! navigation lists as HTML, or the collapsed trees as text with `--tree`.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dossier_nav::model::{NavTree, TypeRegistry};
use dossier_nav::render::html::write_html_file;
use dossier_nav::render::{Element, HtmlTarget, NavListBuilder, create_mask};
use dossier_nav::load_registry;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// dossier-nav - navigation tree builder for generated documentation
#[derive(Parser, Debug)]
#[command(name = "dossier-nav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Type registry file (JSON or page script)
    registry: PathBuf,

    /// Prefix for every link, e.g. `..` for nested pages
    #[arg(short, long, default_value = "")]
    base_path: String,

    /// Link target of the page the navigation is shown on
    #[arg(short, long, default_value = "")]
    current: String,

    /// Only render the module list
    #[arg(long, conflicts_with = "types_only")]
    modules_only: bool,

    /// Only render the type list
    #[arg(long)]
    types_only: bool,

    /// Print the collapsed trees as text instead of HTML
    #[arg(long)]
    tree: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

/// Loads the registry and writes the requested output.
fn run(cli: &Cli) -> Result<()> {
    let registry = load_registry(&cli.registry)
        .with_context(|| format!("failed to load registry {}", cli.registry.display()))?;
    info!(
        types = registry.types.len(),
        modules = registry.modules.len(),
        descriptors = registry.num_descriptors(),
        "Loaded type registry"
    );

    if cli.tree {
        return emit(cli, &format_trees(cli, &registry));
    }

    let elements = render_html(cli, &registry);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let refs: Vec<_> = elements.iter().collect();
            write_html_file(file, &refs)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote navigation");
            Ok(())
        }
        None => {
            for element in &elements {
                println!("{}", element.to_html());
            }
            Ok(())
        }
    }
}

/// Text dump of the selected trees, each under a header line.
fn format_trees(cli: &Cli, registry: &TypeRegistry) -> String {
    let mut sections = Vec::new();
    if !cli.modules_only {
        let tree = NavTree::build(&registry.types, false);
        sections.push(format!("types ({}):\n{}", tree.num_values(), tree.format_tree()));
    }
    if !cli.types_only {
        let tree = NavTree::build(&registry.modules, true);
        sections.push(format!("modules ({}):\n{}", tree.num_values(), tree.format_tree()));
    }
    sections.join("\n")
}

/// Selected navigation lists followed by the mask.
fn render_html(cli: &Cli, registry: &TypeRegistry) -> Vec<Element> {
    let builder = NavListBuilder::new()
        .with_base_path(cli.base_path.as_str())
        .with_current_path(cli.current.as_str());
    let mut target = HtmlTarget::new();

    let mut elements = Vec::new();
    if !cli.modules_only {
        elements.push(builder.clone().types().build(&registry.types, &mut target));
    }
    if !cli.types_only {
        elements.push(builder.modules().build(&registry.modules, &mut target));
    }
    elements.push(create_mask());
    elements
}

/// Writes text output to the configured file or stdout.
fn emit(cli: &Cli, text: &str) -> Result<()> {
    match &cli.output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Installs the log subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dossier_nav={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
