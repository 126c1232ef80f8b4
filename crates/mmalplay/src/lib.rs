// SPDX-License-Identifier: MIT

//! MMAL playback and display control for Raspberry Pi
//!
//! Safe Rust bindings for the VideoCore userland, covering two control
//! surfaces: a hardware-accelerated playback graph (container reader →
//! image decoder → video renderer) and the tvservice session used to query
//! display modes and drive HDMI power states.
//!
//! # Quick Start
//!
//! ## Playing a media file
//!
//! ```no_run
//! use mmalplay::graph::MmalGraph;
//!
//! let mut graph = MmalGraph::new();
//! graph.open("/home/pi/clip.mp4")?;
//! // Playback now runs inside the hardware pipeline; close() or drop
//! // tears it down.
//! graph.close();
//! # Ok::<(), mmalplay::Error>(())
//! ```
//!
//! ## Querying display modes
//!
//! ```no_run
//! use mmalplay::tv::TvService;
//! use mmalplay::mode::ModeGroup;
//!
//! let mut tv = TvService::new();
//! tv.start()?;
//! for mode in tv.modes(ModeGroup::Cea)? {
//!     println!("{}", mode);
//! }
//! tv.stop();
//! # Ok::<(), mmalplay::Error>(())
//! ```
//!
//! # Features
//!
//! - Leak-free pipeline teardown on every open failure path
//! - HDMI mode catalog queries for the CEA and DMT timing groups
//! - Explicit and preferred-mode HDMI power control
//! - Runtime library loading; builds on hosts without the VideoCore stack

use std::{error, ffi::NulError, fmt};

use mmalplay_sys as ffi;

pub use crate::graph::{Link, StageKind};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display number of the panel-attached (DPI/DSI) output.
pub const LCD: u32 = 4;

/// Display number of the connector-attached (HDMI) output.
pub const HDMI: u32 = 5;

/// Raw status code returned by a VideoCore call.
///
/// MMAL calls return `MMAL_STATUS_T`; the tvservice calls return plain
/// negative-on-failure integers. Both are carried here for error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub i64);

impl From<u32> for Status {
    fn from(status: u32) -> Self {
        Status(status as i64)
    }
}

impl From<i32> for Status {
    fn from(status: i32) -> Self {
        Status(status as i64)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let known = match self.0 {
            s if s == ffi::MMAL_ENOMEM as i64 => Some("out of memory"),
            s if s == ffi::MMAL_ENOSPC as i64 => Some("out of resources"),
            s if s == ffi::MMAL_EINVAL as i64 => Some("argument is invalid"),
            s if s == ffi::MMAL_ENOSYS as i64 => Some("function not implemented"),
            s if s == ffi::MMAL_ENOENT as i64 => Some("no such file or directory"),
            s if s == ffi::MMAL_ENXIO as i64 => Some("no such device or address"),
            s if s == ffi::MMAL_EIO as i64 => Some("i/o error"),
            s if s == ffi::MMAL_ECORRUPT as i64 => Some("data is corrupt"),
            s if s == ffi::MMAL_ENOTREADY as i64 => Some("component is not ready"),
            s if s == ffi::MMAL_ECONFIG as i64 => Some("component is not configured"),
            s if s == ffi::MMAL_EISCONN as i64 => Some("port is already connected"),
            s if s == ffi::MMAL_ENOTCONN as i64 => Some("port is disconnected"),
            s if s == ffi::MMAL_EAGAIN as i64 => Some("resource temporarily unavailable"),
            s if s == ffi::MMAL_EFAULT as i64 => Some("bad address"),
            _ => None,
        };
        match known {
            Some(msg) => write!(f, "{} (status {})", msg, self.0),
            None => write!(f, "status {}", self.0),
        }
    }
}

/// Error type for mmalplay operations.
///
/// Each fatal step of the two state machines reports a distinct kind, so
/// callers can tell an argument error from a resource-creation failure
/// from a hardware transition failure.
#[derive(Debug)]
pub enum Error {
    /// A VideoCore library (libmmal.so / libbcm_host.so) could not be loaded
    LibraryNotLoaded(ffi::libloading::Error),

    /// The loaded library does not export a required symbol
    SymbolNotFound(&'static str),

    /// Null pointer returned where a valid handle was expected
    NullPointer,

    /// CString creation error (null byte found in string)
    CString(NulError),

    /// Malformed or empty playback URI, rejected before any hardware call
    InvalidUri(String),

    /// Unrecognized display mode group name (expected CEA or DMT)
    UnknownGroup(String),

    /// Display session operation attempted before start()
    NotStarted,

    /// Failed to create the pipeline graph container
    GraphCreate(Status),

    /// Failed to create one of the pipeline stages
    StageCreate(StageKind, Status),

    /// Failed to connect two pipeline stages
    Connect(Link, Status),

    /// Failed to apply the display-region parameter to the renderer
    DisplayRegion(Status),

    /// Failed to point the reader at the playback URI
    SetUri(Status),

    /// Failed to enable the pipeline graph
    GraphEnable(Status),

    /// Failed to initialize the VCHI control-channel subsystem
    ChannelInit(i32),

    /// Failed to connect the VCHI control channel
    ChannelConnect(i32),

    /// Failed to initialize the tvservice on the control channel
    ServiceInit(i32),

    /// Failed to set an HDMI property
    SetProperty(i32),

    /// Failed to power the display on
    PowerOn(i32),

    /// Failed to power the display off
    PowerOff(i32),

    /// Failed to query the supported display modes
    ModeQuery(i32),

    /// Failed to query the current display state
    DisplayState(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::LibraryNotLoaded(err) => {
                write!(f, "VideoCore library could not be loaded: {}", err)
            }
            Error::SymbolNotFound(sym) => write!(f, "symbol not found: {}", sym),
            Error::NullPointer => write!(f, "null pointer returned from VideoCore library"),
            Error::CString(err) => write!(f, "CString creation error: {}", err),
            Error::InvalidUri(uri) => write!(f, "invalid playback uri {:?}", uri),
            Error::UnknownGroup(name) => {
                write!(f, "invalid group '{}' (DMT, CEA)", name)
            }
            Error::NotStarted => write!(f, "display session is not started"),
            Error::GraphCreate(status) => write!(f, "failed to create graph: {}", status),
            Error::StageCreate(kind, status) => {
                write!(f, "failed to create {}: {}", kind, status)
            }
            Error::Connect(link, status) => {
                write!(f, "failed to connect {}: {}", link, status)
            }
            Error::DisplayRegion(status) => {
                write!(f, "failed to set display region: {}", status)
            }
            Error::SetUri(status) => write!(f, "failed to set uri: {}", status),
            Error::GraphEnable(status) => write!(f, "failed to enable graph: {}", status),
            Error::ChannelInit(ret) => write!(f, "failed to initialize VCHI (ret {})", ret),
            Error::ChannelConnect(ret) => {
                write!(f, "failed to create VCHI connection (ret {})", ret)
            }
            Error::ServiceInit(ret) => {
                write!(f, "failed to initialize tvservice (ret {})", ret)
            }
            Error::SetProperty(ret) => write!(f, "failed to set property (ret {})", ret),
            Error::PowerOn(ret) => write!(f, "failed to power on display (ret {})", ret),
            Error::PowerOff(ret) => write!(f, "failed to power off display (ret {})", ret),
            Error::ModeQuery(ret) => {
                write!(f, "cannot get supported modes (ret {})", ret)
            }
            Error::DisplayState(ret) => {
                write!(f, "failed to get current display state (ret {})", ret)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::LibraryNotLoaded(err) => Some(err),
            Error::CString(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ffi::libloading::Error> for Error {
    fn from(err: ffi::libloading::Error) -> Self {
        Error::LibraryNotLoaded(err)
    }
}

impl From<NulError> for Error {
    fn from(err: NulError) -> Self {
        Error::CString(err)
    }
}

/// The graph module provides the playback pipeline state machine.
pub mod graph;

/// The mode module provides the display mode and state value types.
pub mod mode;

/// The tv module provides the tvservice display session.
pub mod tv;

/// The videocore module provides the real hardware backend.
pub mod videocore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numbers() {
        assert_eq!(LCD, 4);
        assert_eq!(HDMI, 5);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", Status(3)), "argument is invalid (status 3)");
        assert_eq!(format!("{}", Status(-1)), "status -1");
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnknownGroup("3232".to_string());
        assert_eq!(format!("{}", err), "invalid group '3232' (DMT, CEA)");

        let err = Error::StageCreate(StageKind::Decoder, Status(1));
        assert_eq!(
            format!("{}", err),
            "failed to create decoder: out of memory (status 1)"
        );
    }
}
