use clap::Subcommand;

pub mod definitions;
mod execute;
pub mod formats;
pub mod hgr;
pub mod ntx;

pub use definitions::{HgrCommands, NtxCommands};

#[derive(Subcommand)]
pub enum Commands {
    /// HGR scene operations
    Hgr {
        #[command(subcommand)]
        command: HgrCommands,
    },

    /// NTX texture operations
    Ntx {
        #[command(subcommand)]
        command: NtxCommands,
    },

    /// List the surface pixel formats
    Formats,
}
