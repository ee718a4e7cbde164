//! curapackager CLI - Cura plugin package builder
//!
//! Commands:
//! - `curapackager pack` - Build .curapackage archives from a plugin source tree
//! - `curapackager list` - Inspect a produced archive
//!
//! The pack command doubles as a GitHub Actions step: its inputs can be
//! supplied through the runner's `INPUT_*` environment variables, and the
//! produced package names are recorded as a step output.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod list;
mod output;
mod pack;

#[derive(Parser)]
#[command(name = "curapackager")]
#[command(author, version, about = "Package builder for Cura plugins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one .curapackage per supported major SDK version
    Pack {
        /// Plugin source directory (must contain plugin.json)
        #[arg(short, long, env = "INPUT_SOURCE_FOLDER")]
        source: PathBuf,

        /// Package identifier override
        #[arg(short, long, env = "INPUT_PLUGIN_ID")]
        plugin_id: Option<String>,

        /// Path to a custom package metadata template
        #[arg(long, env = "INPUT_PACKAGE_INFO_PATH")]
        package_info: Option<PathBuf>,

        /// Directory to write archives into (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Override the bundled static resource directory
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show the metadata and contents of an existing package
    List {
        /// Path to a .curapackage file
        package: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            source,
            plugin_id,
            package_info,
            output_dir,
            static_dir,
        } => {
            pack::run(source, plugin_id, package_info, output_dir, static_dir)?;
        }
        Commands::List { package } => {
            list::run(&package)?;
        }
    }

    Ok(())
}
