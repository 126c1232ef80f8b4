// SPDX-License-Identifier: MIT

//! Media playback through the hardware pipeline.

use crate::error::CliError;
use crate::utils::parse_display;
use clap::Args as ClapArgs;
use mmalplay::graph::MmalGraph;
use serde::Serialize;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{thread, time::Duration};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Media file or URI to play
    uri: String,

    /// Target display: hdmi, lcd, or a raw display number
    #[arg(short, long, default_value = "hdmi")]
    display: String,

    /// Stop playback after this many seconds (default: run until Ctrl-C)
    #[arg(short = 't', long)]
    duration: Option<u64>,
}

#[derive(Debug, Serialize)]
struct PlayOutput {
    uri: String,
    display: u32,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing play command: {:?}", args);

    let display = parse_display(&args.display)?;

    let mut graph = MmalGraph::new();
    graph.set_display(display);
    graph.open(&args.uri)?;

    if json {
        let output = PlayOutput {
            uri: args.uri.clone(),
            display,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        println!("Playing {} on display {}", args.uri, display);
    }

    // Playback runs inside the hardware pipeline; we just wait for a stop
    // condition before tearing it down.
    match args.duration {
        Some(secs) => thread::sleep(Duration::from_secs(secs)),
        None => {
            let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(|e| {
                CliError::General(format!("Failed to install signal handler: {}", e))
            })?;
            log::info!("Press Ctrl-C to stop playback");
            signals.forever().next();
        }
    }

    graph.close();
    Ok(())
}
