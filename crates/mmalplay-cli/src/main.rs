// SPDX-License-Identifier: MIT

mod error;
mod modes;
mod play;
mod power;
mod preferred;
mod status;
mod utils;

use clap::{Parser, Subcommand};
use error::result_to_exit_code;
use std::process::ExitCode;

/// mmalplay CLI - Raspberry Pi media playback and display control tool
#[derive(Parser)]
#[command(name = "mmalplay")]
#[command(version)]
#[command(about = "mmalplay CLI - Raspberry Pi media playback and display control tool")]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=debug for more)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a media file through the hardware pipeline
    Play(play::Args),

    /// List display modes supported by the attached display
    Modes(modes::Args),

    /// Show the display's preferred mode
    Preferred(preferred::Args),

    /// Show the current display state
    Status(status::Args),

    /// Power the display on (preferred or explicit mode)
    PowerOn(power::OnArgs),

    /// Power the display off
    PowerOff(power::OffArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Execute the subcommand and convert result to exit code
    let result = match cli.command {
        Commands::Play(args) => play::execute(args, cli.json),
        Commands::Modes(args) => modes::execute(args, cli.json),
        Commands::Preferred(args) => preferred::execute(args, cli.json),
        Commands::Status(args) => status::execute(args, cli.json),
        Commands::PowerOn(args) => power::execute_on(args, cli.json),
        Commands::PowerOff(args) => power::execute_off(args, cli.json),
    };

    result_to_exit_code(result)
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    // Determine log level from flags or RUST_LOG environment variable
    let env = env_logger::Env::default();

    let env = if quiet {
        // Quiet mode: only show errors
        env.default_filter_or("error")
    } else if verbose {
        // Verbose mode: show debug messages
        env.default_filter_or("debug")
    } else {
        // Default: show info and above
        env.default_filter_or("info")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None) // Disable timestamps for cleaner CLI output
        .format_target(false) // Disable target (module path) for cleaner output
        .init();

    log::debug!("Logging initialized");
}
