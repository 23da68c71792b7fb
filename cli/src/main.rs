//! pocketgb CLI
//!
//! Headless front-end for the pocketgb core: runs a ROM for a fixed
//! number of frames or dumps its cartridge header.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pocketgb_core::cartridge::Header;
use pocketgb_core::Emulator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (per-frame diagnostics)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Game Boy ROM headlessly for a fixed number of frames
    Run {
        /// Path to the ROM file
        #[arg(value_name = "ROM_PATH")]
        rom_path: PathBuf,
        /// Number of frames to run before exiting
        #[arg(long, default_value_t = 60)]
        frames: u32,
    },
    /// Parse a ROM's cartridge header and print it
    Info {
        /// Path to the ROM file
        #[arg(value_name = "ROM_PATH")]
        rom_path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match &cli.command {
        Commands::Run { rom_path, frames } => run_rom(rom_path, *frames),
        Commands::Info { rom_path } => print_info(rom_path),
    }
}

/// Routes the core's `log` records into the tracing subscriber and
/// filters on `RUST_LOG` when it is set.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    tracing_log::LogTracer::init().context("Failed to install the log bridge")?;

    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the tracing subscriber")?;
    Ok(())
}

fn read_image(rom_path: &Path) -> anyhow::Result<Vec<u8>> {
    if !rom_path.exists() {
        anyhow::bail!("ROM file not found: {}", rom_path.display());
    }
    std::fs::read(rom_path)
        .with_context(|| format!("Failed to read ROM from {}", rom_path.display()))
}

fn run_rom(rom_path: &Path, frames: u32) -> anyhow::Result<()> {
    let image = read_image(rom_path)?;

    let mut emulator = Emulator::new();
    let header = emulator
        .load_rom(&image)
        .with_context(|| format!("Failed to load {}", rom_path.display()))?;
    info!(title = %header.title, kind = ?header.kind, "cartridge loaded");

    for frame in 0..frames {
        emulator
            .update()
            .with_context(|| format!("Execution stopped during frame {frame}"))?;
    }

    info!(
        frames,
        cycles = emulator.cpu.clock.t_cycles(),
        pc = format_args!("{:#06x}", emulator.cpu.regs.pc),
        "run complete"
    );
    Ok(())
}

fn print_info(rom_path: &Path) -> anyhow::Result<()> {
    let image = read_image(rom_path)?;
    let header = Header::parse(&image)
        .with_context(|| format!("Failed to parse the header of {}", rom_path.display()))?;

    println!("title:    {}", header.title);
    println!("kind:     {:?}", header.kind);
    println!("rom size: {} bytes", header.rom_size);
    println!("ram size: {} bytes", header.ram_size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
