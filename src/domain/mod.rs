//! Domain layer: value formatting and request parameters
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod format;
pub mod query;

pub use format::{
    array_len, block_height, format_btc, format_grouped, format_timestamp, satoshis_to_btc,
    value_text, SATOSHIS_PER_BTC,
};
pub use query::{Page, QueryParams, DEFAULT_POOLS_TIMESPAN};
