//! # Imprint CLI
//!
//! ## Usage
//!
//! ```bash
//! imprint create --text "Hello, world!" --output hello.png
//! imprint create --input notes.txt --output notes.png --password secret --drawers crystal,core,flow
//! imprint parse --input notes.png --password secret
//! imprint fingerprint --text "Hello, world!"
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::PathBuf;

use imprint::analysis::incremental_hash;
use imprint::common::config::ImprintConfig;
use imprint::logging::init_logger;
use imprint::render::{DrawerConfig, DrawerKind};
use imprint::ImprintService;

/// Turn text into a fingerprint image that carries the text itself
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a text into an imprint PNG
    Create {
        /// Text to imprint
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Encrypt the hidden text with this password
        #[arg(short, long)]
        password: Option<String>,

        /// Comma-separated drawers, e.g. crystal,core,flow
        #[arg(short, long, value_delimiter = ',')]
        drawers: Vec<DrawerKind>,
    },

    /// Recover the text hidden in an imprint PNG
    Parse {
        /// Imprint PNG to read
        #[arg(short, long)]
        input: PathBuf,

        /// Password, if the text was encrypted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Print the fingerprint and incremental hash of a text as JSON
    Fingerprint {
        #[arg(short, long)]
        text: String,
    },
}

fn main() -> Result<()> {
    init_logger();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ImprintConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ImprintConfig::default(),
    };
    let service = ImprintService::from_config(&config);

    match args.command {
        Command::Create {
            text,
            input,
            output,
            password,
            drawers,
        } => {
            let text = match (text, input) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => bail!("Either --text or --input is required"),
            };

            let drawers: Vec<DrawerConfig> = drawers.into_iter().map(DrawerConfig::new).collect();
            let png = service.create_png(&text, password.as_deref(), Some(&drawers))?;

            fs::write(&output, &png)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("💾 Saved imprint to {} ({} bytes)", output.display(), png.len());
        }
        Command::Parse { input, password } => {
            let bytes = fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let text = service.parse_png(&bytes, password.as_deref())?;
            println!("{}", text);
        }
        Command::Fingerprint { text } => {
            let report = serde_json::json!({
                "fingerprint": service.fingerprint(&text),
                "incremental_hash": incremental_hash(&text),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
