// SPDX-License-Identifier: MIT

//! Shared helpers for the CLI subcommands.

use crate::error::CliError;
use mmalplay::mode::ModeGroup;

/// Parse a display selector: "hdmi", "lcd", or a raw display number.
pub fn parse_display(name: &str) -> Result<u32, CliError> {
    match name.to_ascii_lowercase().as_str() {
        "hdmi" => Ok(mmalplay::HDMI),
        "lcd" => Ok(mmalplay::LCD),
        other => other.parse().map_err(|_| {
            CliError::InvalidArgs(format!(
                "unknown display '{}' (expected hdmi, lcd, or a display number)",
                name
            ))
        }),
    }
}

/// Parse a mode group name, rejecting anything but CEA/DMT before any
/// hardware is touched.
pub fn parse_group(name: &str) -> Result<ModeGroup, CliError> {
    name.parse::<ModeGroup>().map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_names() {
        assert_eq!(parse_display("hdmi").unwrap(), mmalplay::HDMI);
        assert_eq!(parse_display("HDMI").unwrap(), mmalplay::HDMI);
        assert_eq!(parse_display("lcd").unwrap(), mmalplay::LCD);
        assert_eq!(parse_display("4").unwrap(), 4);
        assert_eq!(parse_display("7").unwrap(), 7);
    }

    #[test]
    fn test_parse_display_rejects_garbage() {
        assert!(matches!(
            parse_display("composite"),
            Err(CliError::InvalidArgs(_))
        ));
        assert!(matches!(parse_display(""), Err(CliError::InvalidArgs(_))));
        assert!(matches!(parse_display("-1"), Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn test_parse_group() {
        assert_eq!(parse_group("cea").unwrap(), ModeGroup::Cea);
        assert_eq!(parse_group("DMT").unwrap(), ModeGroup::Dmt);
        assert!(matches!(parse_group("3232"), Err(CliError::InvalidArgs(_))));
    }
}
