/// Exit codes for apilint
///
/// These exit codes allow users and CI/CD systems to distinguish between
/// "the linter reported problems" and "apilint could not run the linter".
/// Success - The linter ran and reported nothing
pub const SUCCESS: i32 = 0;

/// Diagnostics found - The linter reported one or more problems
pub const DIAGNOSTICS_FOUND: i32 = 1;

/// Tool error - Linter not installed, malformed linter output, or bad settings
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{DIAGNOSTICS_FOUND, SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with diagnostics found code (1)
    pub fn diagnostics_found() -> ! {
        std::process::exit(DIAGNOSTICS_FOUND);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
