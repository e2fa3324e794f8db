//! Entry point for the fullflash tool.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Resolve the declared components (missing optional ones are skipped).
//! 3. Compose the image: erased fill, components, optional boot signature.
//! 4. Write the image and print a summary.
//!
//! Error handling is done via `anyhow`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use fullflash::composer::Composer;
use fullflash::config::Config;
use fullflash::writer::write_image;

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;

    let mut composer = Composer::new();
    composer.set_header(config.add_header);
    for source in config.sources() {
        composer.add_source(&source)?;
    }

    let image = composer.compose()?;

    let out = &config.out;
    println!("Creating {}", out.display());
    println!("Components:");
    for placement in composer.report() {
        println!(
            " - {} -> {:#x} size {}",
            placement.name, placement.offset, placement.size
        );
    }

    write_image(out, &image).with_context(|| format!("failed to write {}", out.display()))?;

    println!("Wrote {} size {}", out.display(), image.len());
    println!();
    println!("To flash with esptool (example):");
    println!(
        "  python -m esptool --chip {} --port <PORT> write_flash 0x0 {}",
        config.chip,
        out.display()
    );
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
    Ok(())
}
