//! Command execution implementations

use super::Commands;
use super::definitions::{HgrCommands, NtxCommands};
use super::{formats, hgr, ntx};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Hgr { command } => command.execute(),
            Commands::Ntx { command } => command.execute(),
            Commands::Formats => formats::list(),
        }
    }
}

impl HgrCommands {
    /// Execute the selected HGR command.
    ///
    /// # Errors
    /// Returns an error if the file cannot be decoded.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            HgrCommands::Inspect {
                path,
                output,
                lenient,
            } => hgr::inspect(path, output.as_deref(), *lenient),
            HgrCommands::Batch { dir, quiet } => hgr::batch(dir, *quiet),
        }
    }
}

impl NtxCommands {
    /// Execute the selected NTX command.
    ///
    /// # Errors
    /// Returns an error if the texture cannot be decoded or written.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            NtxCommands::Info { path, json } => ntx::info(path, *json),
            NtxCommands::Convert {
                source,
                destination,
                format,
                quiet,
            } => ntx::convert(source, destination, *format, *quiet),
        }
    }
}
