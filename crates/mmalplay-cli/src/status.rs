// SPDX-License-Identifier: MIT

//! Current display state query.

use crate::error::CliError;
use clap::Args as ClapArgs;
use mmalplay::tv::TvService;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {}

#[derive(Debug, Serialize)]
struct StatusOutput {
    group: String,
    mode: u32,
    rate: f32,
    res: String,
    scan_mode: String,
    ratio: String,
}

pub fn execute(_args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing status command");

    let mut tv = TvService::new();
    tv.start()?;
    let state = tv.status()?;
    tv.stop();

    if json {
        let output = StatusOutput {
            group: state.group_name().to_string(),
            mode: state.mode,
            rate: state.frame_rate,
            res: format!("{}x{}", state.width, state.height),
            scan_mode: state.scan_mode.to_string(),
            ratio: state.aspect.to_string(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        println!("{}", state);
    }

    Ok(())
}
