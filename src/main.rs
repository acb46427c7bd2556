use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::{Config as LogConfig, SimpleLogger};

use dmx_tir::consts::{DEFAULT_DEVICE, DEFAULT_FLASHES};
use dmx_tir::session::Session;
use dmx_tir::types::DmxAddress;

/// Program the dmx start address of a TIR commercial led flood.
///
/// Without --serial no programming frame is sent; the tool only blinks the
/// fixture at the given address green against an all-red universe, which is
/// how you check which address a flood currently answers to.
#[derive(Parser)]
#[command(about, long_about)]
struct Cli {
    /// Serial number of the TIR you're programming.
    #[arg(short, long)]
    serial: Option<u32>,

    /// New dmx address to set.
    #[arg(short, long)]
    address: u16,

    /// Dmx device name.
    #[arg(short, long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Number of flashes of dmx data.
    #[arg(short, long, default_value_t = DEFAULT_FLASHES)]
    flashes: u32,

    /// Print debug output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::init(log_level, LogConfig::default())?;

    let address = DmxAddress::new(args.address)?;

    let session = Session {
        device: args.device,
        address,
        serial_number: args.serial,
        flashes: args.flashes,
    };

    session
        .run()
        .with_context(|| format!("dmx transaction on {} failed", session.device))?;

    Ok(())
}
