use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use panel_vision::{check_panel, collect_layout, colors};

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "panel-check",
    about = "Color block presence and position checks for photographed panels"
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a panel photo against a reference document
    Check {
        /// Photo to verify; overwritten with the annotated frame
        #[arg(long)]
        image: PathBuf,
        /// Reference JSON with the frame size and per-color specs
        #[arg(long)]
        reference: PathBuf,
    },
    /// Measure block positions in a close-up photo of isolated patches
    Layout {
        /// Photo to measure; overwritten with the annotated crop
        #[arg(long)]
        image: PathBuf,
        /// Ranges JSON; defaults to the built-in color catalog
        #[arg(long)]
        ranges: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = Args::parse();

    match args.command {
        Commands::Check { image, reference } => {
            log::info!("checking panel {}", image.display());
            let doc = config::load_reference(&reference)?;
            let (results, _) = check_panel(path_str(&image)?, &doc.size, &doc.colors)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Layout { image, ranges } => {
            log::info!("collecting layout of {}", image.display());
            let range_map = match ranges {
                Some(path) => config::load_ranges(&path)?,
                None => colors::all(),
            };
            let (layout, _) = collect_layout(path_str(&image)?, &range_map)?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
    }

    Ok(())
}

fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("image path is not valid utf-8"))
}

fn setup_logging() {
    simple_log::quick!();
}
