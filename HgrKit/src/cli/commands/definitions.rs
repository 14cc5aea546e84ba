//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

use crate::converter::ImageFileType;

/// HGR scene commands
#[derive(Subcommand)]
pub enum HgrCommands {
    /// Inspect an HGR file and display its structure
    Inspect {
        /// HGR file to inspect
        path: PathBuf,

        /// Output to JSON file (prints to CLI if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip node cycle and index range checks
        #[arg(long)]
        lenient: bool,
    },

    /// Decode every .hgr file under a directory and report failures
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

/// NTX texture commands
#[derive(Subcommand)]
pub enum NtxCommands {
    /// Show info about an NTX texture
    Info {
        /// NTX file
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert NTX textures to images
    Convert {
        /// Source NTX file(s) or directory
        #[arg(required = true)]
        source: Vec<PathBuf>,

        /// Output file (single source) or directory (multiple sources)
        destination: PathBuf,

        /// Output image format
        #[arg(short = 'f', long, value_enum, default_value_t = ImageFileType::Png)]
        format: ImageFileType,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}
