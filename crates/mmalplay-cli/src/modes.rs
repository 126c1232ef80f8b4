// SPDX-License-Identifier: MIT

//! Supported display mode listing.

use crate::error::CliError;
use crate::utils::parse_group;
use clap::Args as ClapArgs;
use mmalplay::{mode::DisplayMode, tv::TvService};
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Mode group to list: CEA (TV timings) or DMT (monitor timings)
    #[arg(default_value = "CEA")]
    group: String,
}

#[derive(Debug, Serialize)]
struct ModeEntry {
    group: String,
    mode: u32,
    rate: u32,
    clock: u32,
    res: String,
    scan_mode: String,
    ratio: String,
}

impl From<&DisplayMode> for ModeEntry {
    fn from(mode: &DisplayMode) -> Self {
        ModeEntry {
            group: mode.group.name().to_string(),
            mode: mode.code,
            rate: mode.frame_rate,
            clock: mode.clock_mhz,
            res: format!("{}x{}", mode.width, mode.height),
            scan_mode: mode.scan_mode.to_string(),
            ratio: mode.aspect.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ModesOutput {
    group: String,
    modes: Vec<ModeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_mode: Option<u32>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing modes command: {:?}", args);

    let group = parse_group(&args.group)?;

    let mut tv = TvService::new();
    tv.start()?;
    let modes = tv.modes(group)?;
    let preferred = tv.preferred();
    tv.stop();

    if json {
        let output = ModesOutput {
            group: group.name().to_string(),
            modes: modes.iter().map(ModeEntry::from).collect(),
            preferred_mode: preferred
                .filter(|(preferred_group, _)| *preferred_group == group)
                .map(|(_, mode)| mode),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        if modes.is_empty() {
            println!("No {} modes reported by the display", group.name());
            return Ok(());
        }
        for mode in &modes {
            let marker = match preferred {
                Some((preferred_group, code))
                    if preferred_group == mode.group && code == mode.code =>
                {
                    " (preferred)"
                }
                _ => "",
            };
            println!("{}{}", mode, marker);
        }
    }

    Ok(())
}
