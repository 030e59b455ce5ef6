//! Bitcoin blockchain explorer CLI
//!
//! Layers, innermost first:
//! - `domain`: value formatting and query parameters (no I/O)
//! - `application`: the API client and the config store
//! - `infrastructure`: filesystem/HTTP implementations and service wiring
//! - `cli`: argument parsing, dispatch and rendering

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
