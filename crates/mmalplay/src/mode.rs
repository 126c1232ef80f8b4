// SPDX-License-Identifier: MIT

//! Display mode and display state value types.
//!
//! These are plain data carried between the tvservice session and its
//! callers; descriptors are transient query results and nothing here holds
//! hardware resources.

use crate::Error;
use std::{fmt, str::FromStr};

/// HDMI resolution group: a named family of display timing standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeGroup {
    /// Consumer Electronics Association timings (TV formats).
    Cea,
    /// Display Monitor Timings (computer monitor formats).
    Dmt,
}

impl ModeGroup {
    /// Canonical group name as used by the firmware.
    pub fn name(&self) -> &'static str {
        match self {
            ModeGroup::Cea => "CEA",
            ModeGroup::Dmt => "DMT",
        }
    }
}

impl fmt::Display for ModeGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeGroup {
    type Err = Error;

    /// Case-insensitive match against the canonical group names.
    fn from_str(name: &str) -> Result<Self, Error> {
        if name.eq_ignore_ascii_case("CEA") {
            Ok(ModeGroup::Cea)
        } else if name.eq_ignore_ascii_case("DMT") {
            Ok(ModeGroup::Dmt)
        } else {
            Err(Error::UnknownGroup(name.to_string()))
        }
    }
}

/// Scan mode of a display timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Progressive,
    Interlaced,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanMode::Progressive => f.write_str("p"),
            ScanMode::Interlaced => f.write_str("i"),
        }
    }
}

/// Picture aspect ratio advertised with a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Unknown,
    Ratio4x3,
    Ratio14x9,
    Ratio16x9,
    Ratio5x4,
    Ratio16x10,
    Ratio15x9,
    Ratio64x27,
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            AspectRatio::Ratio4x3 => "4:3",
            AspectRatio::Ratio14x9 => "14:9",
            AspectRatio::Ratio16x9 => "16:9",
            AspectRatio::Ratio5x4 => "5:4",
            AspectRatio::Ratio16x10 => "16:10",
            AspectRatio::Ratio15x9 => "15:9",
            AspectRatio::Ratio64x27 => "64:27 (21:9)",
            AspectRatio::Unknown => "unknown AR",
        };
        f.write_str(s)
    }
}

/// HDMI pixel clock type.
///
/// NTSC-type clocks run at the 1000/1001 broadcast rate, which the status
/// report corrects for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClockType {
    Pal,
    Ntsc,
}

/// One hardware-advertised display mode within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    /// Mode group this descriptor belongs to.
    pub group: ModeGroup,

    /// Mode code, unique within the group.
    pub code: u32,

    /// Frame rate in Hz.
    pub frame_rate: u32,

    /// Pixel clock in MHz (raw pixel frequency divided by 1,000,000).
    pub clock_mhz: u32,

    /// Active width in pixels.
    pub width: u32,

    /// Active height in pixels.
    pub height: u32,

    /// Progressive or interlaced scan.
    pub scan_mode: ScanMode,

    /// Advertised aspect ratio.
    pub aspect: AspectRatio,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} mode {}: {}x{}{} @ {}Hz {} ({} MHz)",
            self.group,
            self.code,
            self.width,
            self.height,
            self.scan_mode,
            self.frame_rate,
            self.aspect,
            self.clock_mhz
        )
    }
}

/// Current display state as reported by the tvservice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayState {
    /// Frame rate in Hz, corrected for NTSC-type pixel clocks.
    pub frame_rate: f32,

    /// Active mode code.
    pub mode: u32,

    /// Progressive or interlaced scan.
    pub scan_mode: ScanMode,

    /// Mode group of the active mode, if the hardware reported a known one.
    pub group: Option<ModeGroup>,

    /// Aspect ratio of the active mode.
    pub aspect: AspectRatio,

    /// Active width in pixels.
    pub width: u32,

    /// Active height in pixels.
    pub height: u32,
}

impl DisplayState {
    /// Group name, rendering an unrecognized group the way the firmware
    /// name table does.
    pub fn group_name(&self) -> &'static str {
        match self.group {
            Some(group) => group.name(),
            None => "Invalid",
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} mode {}: {}x{}{} @ {:.2}Hz {}",
            self.group_name(),
            self.mode,
            self.width,
            self.height,
            self.scan_mode,
            self.frame_rate,
            self.aspect
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_parse_case_insensitive() {
        assert_eq!("CEA".parse::<ModeGroup>().unwrap(), ModeGroup::Cea);
        assert_eq!("cea".parse::<ModeGroup>().unwrap(), ModeGroup::Cea);
        assert_eq!("Dmt".parse::<ModeGroup>().unwrap(), ModeGroup::Dmt);
    }

    #[test]
    fn test_group_parse_rejects_unknown() {
        for name in ["", "3232", "CEA_3D_SBS", "hdmi"] {
            match name.parse::<ModeGroup>() {
                Err(Error::UnknownGroup(bad)) => assert_eq!(bad, name),
                other => panic!("expected UnknownGroup for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_aspect_ratio_strings() {
        assert_eq!(format!("{}", AspectRatio::Ratio16x9), "16:9");
        assert_eq!(format!("{}", AspectRatio::Ratio64x27), "64:27 (21:9)");
        assert_eq!(format!("{}", AspectRatio::Unknown), "unknown AR");
    }

    #[test]
    fn test_display_mode_format() {
        let mode = DisplayMode {
            group: ModeGroup::Cea,
            code: 16,
            frame_rate: 60,
            clock_mhz: 148,
            width: 1920,
            height: 1080,
            scan_mode: ScanMode::Progressive,
            aspect: AspectRatio::Ratio16x9,
        };
        assert_eq!(
            format!("{}", mode),
            "CEA mode 16: 1920x1080p @ 60Hz 16:9 (148 MHz)"
        );
    }

    #[test]
    fn test_display_state_group_name() {
        let state = DisplayState {
            frame_rate: 50.0,
            mode: 19,
            scan_mode: ScanMode::Progressive,
            group: None,
            aspect: AspectRatio::Ratio16x9,
            width: 1280,
            height: 720,
        };
        assert_eq!(state.group_name(), "Invalid");
    }
}
