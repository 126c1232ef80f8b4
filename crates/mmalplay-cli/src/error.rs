// SPDX-License-Identifier: MIT

use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments
    InvalidArgs(String),
    /// VideoCore firmware libraries not available (not a Raspberry Pi,
    /// or missing userland install)
    HardwareUnavailable(String),
    /// Display power transition failed
    PowerFailed(String),
    /// General error from the mmalplay library
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::HardwareUnavailable(msg) => {
                write!(f, "VideoCore unavailable: {}", msg)
            }
            CliError::PowerFailed(msg) => write!(f, "Power transition failed: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidArgs(_) => ExitCode::from(2),
            CliError::HardwareUnavailable(_) => ExitCode::from(3),
            CliError::PowerFailed(_) => ExitCode::from(4),
            CliError::General(_) => ExitCode::from(1),
        }
    }
}

/// Map mmalplay::Error to CliError with appropriate exit codes
impl From<mmalplay::Error> for CliError {
    fn from(err: mmalplay::Error) -> Self {
        use mmalplay::Error;

        match err {
            // Argument problems caught before any hardware call
            Error::InvalidUri(uri) => CliError::InvalidArgs(format!("invalid uri {:?}", uri)),
            Error::UnknownGroup(name) => {
                CliError::InvalidArgs(format!("invalid group '{}' (DMT, CEA)", name))
            }

            // Firmware stack not present on this host
            Error::LibraryNotLoaded(lib_err) => CliError::HardwareUnavailable(format!(
                "failed to load VideoCore library: {}",
                lib_err
            )),
            Error::SymbolNotFound(sym) => {
                CliError::HardwareUnavailable(format!("symbol not found: {}", sym))
            }

            // Power transitions have their own exit code
            Error::PowerOn(ret) => CliError::PowerFailed(format!("power on (ret {})", ret)),
            Error::PowerOff(ret) => CliError::PowerFailed(format!("power off (ret {})", ret)),

            other => CliError::General(other.to_string()),
        }
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}
