//! cot2525 - Cursor-on-Target symbol CLI
//!
//! ## Commands
//!
//! - `decode`: print the SIDC for one or more CoT types
//! - `lookup`: resolve a CoT type against an image directory
//! - `compose`: build an atom CoT type from named fields
//! - `serve`: run the HTTP symbol server in the foreground

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cot2525_core::{decode, Affiliation, CotType, Dimension, Sidc};
use cot2525_store::{resolve_cot, FsSymbolStore, Symbol, SymbolStore};
use cot2525d::{init_tracing, level_for, ServerConfig};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "cot2525")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cursor-on-Target to MIL-STD-2525B symbol tool", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output and JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode CoT types into SIDCs
    Decode {
        /// CoT event types, e.g. a-f-A-M-F-Q
        #[arg(required = true)]
        cot: Vec<String>,
    },

    /// Resolve the symbol image for a CoT type
    Lookup {
        /// CoT event type
        cot: String,

        /// Directory holding `<SIDC>.png` symbol images
        #[arg(long, env = "COT2525_IMAGES")]
        images: PathBuf,

        /// Write the image here instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only accept an exact match
        #[arg(long)]
        no_fallback: bool,
    },

    /// Compose an atom CoT type from named fields
    Compose {
        /// Affiliation name or code (friendly, hostile, h, ...)
        #[arg(short, long)]
        affiliation: Option<Affiliation>,

        /// Battle dimension name or code (air, ground, G, ...)
        #[arg(short, long)]
        dimension: Option<Dimension>,

        /// Function-ID characters, one per flag, in order
        #[arg(short, long = "function")]
        functions: Vec<char>,
    },

    /// Run the HTTP symbol server
    Serve {
        #[command(flatten)]
        server: ServerConfig,
    },
}

/// One decoded CoT type.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct DecodeRow {
    cot: String,
    sidc: Sidc,
    unknown: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json, level_for(cli.verbose));

    match cli.command {
        Commands::Decode { cot } => cmd_decode(&cot, cli.json),
        Commands::Lookup {
            cot,
            images,
            output,
            no_fallback,
        } => cmd_lookup(&cot, &images, output.as_deref(), !no_fallback, cli.json).await,
        Commands::Compose {
            affiliation,
            dimension,
            functions,
        } => cmd_compose(affiliation, dimension, &functions, cli.json),
        Commands::Serve { server } => cot2525d::run(&server)
            .await
            .context("symbol server stopped with an error"),
    }
}

fn decode_rows(cots: &[String]) -> Vec<DecodeRow> {
    cots.iter()
        .map(|cot| {
            let sidc = decode(cot);
            DecodeRow {
                cot: cot.clone(),
                sidc,
                unknown: sidc.is_unknown(),
            }
        })
        .collect()
}

fn cmd_decode(cots: &[String], json: bool) -> Result<()> {
    let rows = decode_rows(cots);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{}", row.sidc);
        }
    }
    Ok(())
}

async fn find_symbol(store: &dyn SymbolStore, cot: &str, fallback: bool) -> Result<Symbol> {
    match resolve_cot(store, cot, fallback)
        .await
        .with_context(|| format!("failed to look up {cot}"))?
    {
        Some(symbol) => Ok(symbol),
        None => bail!("no symbol image for {cot} (sidc {})", decode(cot)),
    }
}

async fn cmd_lookup(
    cot: &str,
    images: &Path,
    output: Option<&Path>,
    fallback: bool,
    json: bool,
) -> Result<()> {
    let store = FsSymbolStore::new(images)
        .with_context(|| format!("failed to open image directory {}", images.display()))?;
    let symbol = find_symbol(&store, cot, fallback).await?;

    if let Some(path) = output {
        std::fs::write(path, &symbol.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = symbol.len(), "symbol image written");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&symbol)?);
    } else if output.is_none() {
        println!("key:   {}", symbol.key);
        println!("sidc:  {}", symbol.sidc);
        if let Some(matched) = symbol.cot.as_deref().filter(|m| *m != cot) {
            println!("match: {matched}");
        }
        println!("bytes: {}", symbol.len());
        println!("etag:  {}", symbol.etag);
    }
    Ok(())
}

fn compose(
    affiliation: Option<Affiliation>,
    dimension: Option<Dimension>,
    functions: &[char],
) -> CotType {
    let mut cot = CotType::atom();
    if let Some(a) = affiliation {
        cot = cot.affiliation(a);
    }
    if let Some(d) = dimension {
        cot = cot.dimension(d);
    }
    functions.iter().fold(cot, |cot, &code| cot.function(code))
}

fn cmd_compose(
    affiliation: Option<Affiliation>,
    dimension: Option<Dimension>,
    functions: &[char],
    json: bool,
) -> Result<()> {
    let cot = compose(affiliation, dimension, functions).to_string();
    let row = decode_rows(std::slice::from_ref(&cot)).remove(0);
    if json {
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        println!("{}\t{}", row.cot, row.sidc);
    }
    Ok(())
}
