// SPDX-License-Identifier: MIT

//! Preferred display mode query.

use crate::error::CliError;
use clap::Args as ClapArgs;
use mmalplay::tv::TvService;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {}

#[derive(Debug, Serialize)]
struct PreferredOutput {
    group: String,
    mode: u32,
}

pub fn execute(_args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing preferred command");

    let mut tv = TvService::new();
    tv.start()?;
    let preferred = tv.preferred_mode()?;
    tv.stop();

    match preferred {
        Some((group, mode)) => {
            if json {
                let output = PreferredOutput {
                    group: group.name().to_string(),
                    mode,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).map_err(|e| CliError::General(
                        format!("JSON serialization failed: {}", e)
                    ))?
                );
            } else {
                println!("{} mode {}", group.name(), mode);
            }
            Ok(())
        }
        None => Err(CliError::General(
            "display did not report a preferred mode".to_string(),
        )),
    }
}
