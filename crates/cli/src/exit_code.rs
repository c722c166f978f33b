//! Exit code definitions for s3-sync
//!
//! Scripts rely on these: 0 is success, 1 is a failure detected by s3-sync
//! itself, and any other status is handed through from the external command
//! that failed first.

use sync_core::Error;

/// Exit codes for the s3-sync binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Operation completed successfully
    Success,

    /// Configuration, traversal, or other locally detected error
    GeneralError,

    /// Status of a failed external command
    Command(i32),
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::GeneralError => 1,
            Self::Command(code) => code,
        }
    }

    /// Create exit code from i32 value
    pub const fn from_i32(code: i32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::GeneralError,
            code => Self::Command(code),
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::Command(_) => "External command failed",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        Self::from_i32(err.exit_code())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
