use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use circuitpainter::{init_logging, load_config, run_demo, BUILD_DATE, DEMOS, VERSION};

/// Build CircuitPainter demo boards and report what they contain
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Demos to build (all of them when none are given)
    #[arg(value_name = "DEMO")]
    demos: Vec<String>,

    /// Painter config file (TOML or JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List the available demos and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for demo in DEMOS {
            println!("{:<16} {}", demo.name, demo.description);
        }
        return Ok(());
    }

    init_logging()?;
    tracing::info!("CircuitPainter {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;

    if cli.demos.is_empty() {
        for demo in DEMOS {
            run_demo(demo.name, &config)?;
        }
    } else {
        for name in &cli.demos {
            run_demo(name, &config)?;
        }
    }

    Ok(())
}
