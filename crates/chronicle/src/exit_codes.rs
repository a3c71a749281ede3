//! Exit codes for the CLI

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error, including an unsatisfiable version selection
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Changelog could not be written
pub const OUTPUT_ERROR: u8 = 4;

/// Validation found errors
pub const VALIDATION_ERROR: u8 = 5;
