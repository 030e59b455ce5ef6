//! Plain-text summaries of API responses
//!
//! Each function picks a fixed set of fields out of the raw JSON and returns
//! the lines to print. Absent fields render empty; nothing here fails.

use colored::Colorize;
use serde_json::Value;

use crate::cli::output::checkmark;
use crate::domain::{
    array_len, block_height, format_btc, format_grouped, format_timestamp, satoshis_to_btc,
    value_text,
};

/// Transactions listed by `transactions` and `unconfirmed`.
pub const MAX_LISTED_TRANSACTIONS: usize = 10;

fn bold(text: &str) -> String {
    text.bold().to_string()
}

fn grouped(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_f64)
        .map(format_grouped)
        .unwrap_or_default()
}

fn grouped_btc(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_f64)
        .map(|s| format_grouped(satoshis_to_btc(s)))
        .unwrap_or_default()
}

fn entries(data: &Value) -> impl Iterator<Item = (&String, &Value)> {
    data.as_object().into_iter().flat_map(|map| map.iter())
}

fn list<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `balance`: the response is keyed by address. `None` when the address is missing.
pub fn balance(address: &str, data: &Value) -> Option<Vec<String>> {
    let entry = data.get(address)?;
    Some(vec![
        checkmark("Balance information:"),
        format!("  Final Balance: {} BTC", format_btc(entry.get("final_balance"))),
        format!("  Total Received: {} BTC", format_btc(entry.get("total_received"))),
        format!("  Total Sent: {} BTC", format_btc(entry.get("total_sent"))),
        format!("  Transactions: {}", value_text(entry.get("n_tx"))),
    ])
}

pub fn address(data: &Value) -> Vec<String> {
    vec![
        checkmark("Address information:"),
        format!("  Address: {}", value_text(data.get("address"))),
        format!("  Hash160: {}", value_text(data.get("hash160"))),
        format!("  Total Received: {} BTC", format_btc(data.get("total_received"))),
        format!("  Total Sent: {} BTC", format_btc(data.get("total_sent"))),
        format!("  Final Balance: {} BTC", format_btc(data.get("final_balance"))),
        format!("  Transactions: {}", value_text(data.get("n_tx"))),
    ]
}

/// `transactions`: total count, then the first few transactions.
pub fn transactions(data: &Value) -> Vec<String> {
    let mut lines = vec![checkmark(&format!(
        "Found {} transactions",
        value_text(data.get("n_tx"))
    ))];
    for tx in list(data, "txs").iter().take(MAX_LISTED_TRANSACTIONS) {
        lines.push(String::new());
        lines.push(bold(&value_text(tx.get("hash"))));
        lines.push(format!("  Time: {}", format_timestamp(tx.get("time"))));
        lines.push(format!("  Size: {} bytes", value_text(tx.get("size"))));
        lines.push(format!("  Block Height: {}", block_height(tx.get("block_height"))));
    }
    lines
}

pub fn transaction(data: &Value) -> Vec<String> {
    vec![
        String::new(),
        format!("{}: {}", bold("Transaction"), value_text(data.get("hash"))),
        format!("  Time: {}", format_timestamp(data.get("time"))),
        format!("  Size: {} bytes", value_text(data.get("size"))),
        format!("  Block Height: {}", block_height(data.get("block_height"))),
        format!("  Inputs: {}", array_len(data.get("inputs"))),
        format!("  Outputs: {}", array_len(data.get("out"))),
    ]
}

pub fn block(data: &Value) -> Vec<String> {
    vec![
        String::new(),
        format!("{}: {}", bold("Block"), value_text(data.get("hash"))),
        format!("  Height: {}", value_text(data.get("height"))),
        format!("  Time: {}", format_timestamp(data.get("time"))),
        format!("  Transactions: {}", value_text(data.get("n_tx"))),
        format!("  Size: {} bytes", value_text(data.get("size"))),
        format!("  Version: {}", value_text(data.get("ver"))),
    ]
}

/// `block-height`: several blocks can share a height while a fork is unresolved.
pub fn blocks_at_height(height: u64, data: &Value) -> Vec<String> {
    let blocks = list(data, "blocks");
    let mut lines = vec![checkmark(&format!(
        "Found {} block(s) at height {}",
        blocks.len(),
        height
    ))];
    for block in blocks {
        lines.push(String::new());
        lines.push(format!("{}: {}", bold("Block Hash"), value_text(block.get("hash"))));
        lines.push(format!("  Time: {}", format_timestamp(block.get("time"))));
        lines.push(format!("  Transactions: {}", value_text(block.get("n_tx"))));
    }
    lines
}

pub fn latest_block(data: &Value) -> Vec<String> {
    vec![
        String::new(),
        bold("Latest Block"),
        format!("  Hash: {}", value_text(data.get("hash"))),
        format!("  Height: {}", value_text(data.get("height"))),
        format!("  Time: {}", format_timestamp(data.get("time"))),
        format!("  Block Index: {}", value_text(data.get("block_index"))),
    ]
}

pub fn unconfirmed(data: &Value) -> Vec<String> {
    let txs = list(data, "txs");
    let mut lines = vec![checkmark(&format!(
        "Found {} unconfirmed transactions",
        txs.len()
    ))];
    lines.extend(txs.iter().take(MAX_LISTED_TRANSACTIONS).map(|tx| {
        format!(
            "  {} - {} bytes",
            value_text(tx.get("hash")),
            value_text(tx.get("size"))
        )
    }));
    lines
}

/// `rates`: one line per currency, `USD: $64,123.45`.
pub fn rates(data: &Value) -> Vec<String> {
    let mut lines = vec![checkmark("Exchange rates:")];
    lines.extend(entries(data).map(|(currency, info)| {
        format!(
            "  {}: {}{}",
            currency,
            value_text(info.get("symbol")),
            grouped(info.get("last"))
        )
    }));
    lines
}

pub fn conversion(currency: &str, value: &str, data: &Value) -> Vec<String> {
    vec![checkmark(&format!(
        "{} {} = {} BTC",
        value,
        currency.to_uppercase(),
        value_text(Some(data))
    ))]
}

/// `stats`: satoshi totals are shown in BTC.
pub fn stats(data: &Value) -> Vec<String> {
    vec![
        checkmark("Blockchain statistics:"),
        format!("  Market Price (USD): ${}", grouped(data.get("market_price_usd"))),
        format!("  Hash Rate: {}", grouped(data.get("hash_rate"))),
        format!("  Total BTC Sent: {} BTC", grouped_btc(data.get("total_btc_sent"))),
        format!("  Blocks Count: {}", grouped(data.get("n_blocks_total"))),
        format!("  Total Fees: {} BTC", grouped(data.get("total_fees_btc"))),
    ]
}

pub fn pools(data: &Value) -> Vec<String> {
    let mut lines = vec![checkmark("Mining pools:")];
    lines.extend(
        entries(data).map(|(pool, count)| format!("  {}: {} blocks", pool, value_text(Some(count)))),
    );
    lines
}
