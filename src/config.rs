//! Configuration module.
//!
//! This module defines the command-line interface (CLI) using `clap`.
//! It handles parsing component paths, their flash offsets and the output path.

use clap::Parser;
use std::path::PathBuf;

use crate::blob::BlobSource;
use crate::utils::parse_offset;

/// Create a single full flash image.
///
/// Places the bootloader, partition table and application binary at their
/// flash offsets, padding every gap with 0xFF (erased flash), so the result
/// can be written to the chip in one go starting at 0x0.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to bootloader.bin
    #[arg(long)]
    pub boot: Option<PathBuf>,

    /// Path to partition-table.bin
    #[arg(long)]
    pub partition: Option<PathBuf>,

    /// Path to the raw application binary
    #[arg(long)]
    pub app: PathBuf,

    /// Output path
    #[arg(long, default_value = "full_flash.bin")]
    pub out: PathBuf,

    /// Write the boot signature words at offset 0x0
    #[arg(long)]
    pub add_header: bool,

    /// Bootloader flash offset
    #[arg(long, value_parser = parse_offset, default_value = "0x1000")]
    pub boot_off: u64,

    /// Partition table flash offset
    #[arg(long, value_parser = parse_offset, default_value = "0x8000")]
    pub part_off: u64,

    /// Application flash offset
    #[arg(long, value_parser = parse_offset, default_value = "0x10000")]
    pub app_off: u64,

    /// Chip name used in the suggested flashing command
    #[arg(long, default_value = "esp32c3")]
    pub chip: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,
}

impl Config {
    /// Declared components in apply order: boot, partition, app.
    pub fn sources(&self) -> Vec<BlobSource> {
        let mut sources = Vec::new();
        if let Some(boot) = &self.boot {
            sources.push(BlobSource::optional("boot", boot, self.boot_off));
        }
        if let Some(partition) = &self.partition {
            sources.push(BlobSource::optional("partition", partition, self.part_off));
        }
        sources.push(BlobSource::required("app", &self.app, self.app_off));
        sources
    }
}
