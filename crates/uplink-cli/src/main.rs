use anyhow::Result;
use clap::Parser;

mod app;

/// Internet connectivity monitor for the terminal
#[derive(Parser)]
#[command(name = "uplink", version, about)]
struct Cli {
    /// Print probe and state-change diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    uplink_core::verbose::init_from_env();
    if cli.verbose {
        uplink_core::set_verbose(true);
    }

    app::run()
}
