use anyhow::{Context, Result};
use clap::Parser;
use diagrammer::Config;
use diagrammer::config::RenderOrder;
use diagrammer::draw::{Diagram, Session, render_document};
use diagrammer::script;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DIAGRAMMER_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "diagrammer")]
#[command(version = VERSION, about = "Render diagram scripts as SVG")]
struct Cli {
    /// Diagram script to execute
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Write the SVG to FILE instead of standard output
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Shape output order (overrides the config file)
    #[arg(long, value_enum, value_name = "ORDER")]
    order: Option<RenderOrder>,

    /// Read settings from FILE instead of ~/.config/diagrammer/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(order) = cli.order {
        config.render.order = order;
    }

    let source = fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;

    let mut session = Session::from_config(&config);
    let namespace = script::run(&source, &mut session)
        .with_context(|| format!("Script {} failed", cli.script.display()))?;

    let diagram = Diagram::from_bindings(namespace.into_shapes());
    log::info!("Rendering {} shape(s)", diagram.len());
    let svg = render_document(&diagram, &config.document, &config.render);

    match &cli.output {
        Some(path) => {
            fs::write(path, &svg)
                .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(svg.as_bytes())
                .context("Failed to write SVG to stdout")?;
        }
    }

    Ok(())
}
