// SPDX-License-Identifier: MIT

//! HDMI power transitions.

use crate::error::CliError;
use crate::utils::parse_group;
use clap::Args as ClapArgs;
use mmalplay::tv::TvService;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct OnArgs {
    /// Explicit mode group (CEA or DMT); requires --mode
    #[arg(short, long)]
    group: Option<String>,

    /// Explicit mode code within --group
    #[arg(short, long)]
    mode: Option<u32>,
}

#[derive(ClapArgs, Debug)]
pub struct OffArgs {}

#[derive(Debug, Serialize)]
struct PowerOutput {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<u32>,
}

pub fn execute_on(args: OnArgs, json: bool) -> Result<(), CliError> {
    log::debug!("Executing power-on command: {:?}", args);

    // Argument pairing is validated before any hardware call.
    let explicit = match (&args.group, args.mode) {
        (Some(group), Some(mode)) => Some((parse_group(group)?, mode)),
        (None, None) => None,
        _ => {
            return Err(CliError::InvalidArgs(
                "--group and --mode must be given together".to_string(),
            ))
        }
    };

    let mut tv = TvService::new();
    tv.start()?;
    match explicit {
        Some((group, mode)) => tv.power_on_explicit(group, mode)?,
        None => tv.power_on_preferred()?,
    }
    tv.stop();

    let (group, mode) = match explicit {
        Some((group, mode)) => (Some(group.name().to_string()), Some(mode)),
        None => (None, None),
    };
    report(json, PowerOutput {
        state: "on",
        group,
        mode,
    })
}

pub fn execute_off(_args: OffArgs, json: bool) -> Result<(), CliError> {
    log::debug!("Executing power-off command");

    let mut tv = TvService::new();
    tv.start()?;
    tv.power_off()?;
    tv.stop();

    report(json, PowerOutput {
        state: "off",
        group: None,
        mode: None,
    })
}

fn report(json: bool, output: PowerOutput) -> Result<(), CliError> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        match (&output.group, output.mode) {
            (Some(group), Some(mode)) => {
                println!("Display powered {} ({} mode {})", output.state, group, mode)
            }
            _ => println!("Display powered {}", output.state),
        }
    }
    Ok(())
}
