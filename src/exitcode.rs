//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Any failure reported by a command
pub const FAILURE: i32 = 1;
