//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::domain::{Page, DEFAULT_POOLS_TIMESPAN};

/// Blockchain.info CLI - Bitcoin blockchain explorer
#[derive(Parser, Debug)]
#[command(name = "blockchain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: user config dir)
    #[arg(long, global = true, env = "BLOCKCHAIN_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output selection shared by all query commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Pagination flags for address listings.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Limit number of transactions
    #[arg(long, value_name = "NUMBER")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[arg(long, value_name = "NUMBER")]
    pub offset: Option<u32>,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page::new(args.limit, args.offset)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Get balance for a Bitcoin address
    Balance {
        address: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get detailed address information
    Address {
        address: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List transactions for an address
    Transactions {
        address: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get transaction details
    Transaction {
        hash: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get block information by hash
    Block {
        hash: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get block information by height
    BlockHeight {
        height: u64,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get the latest block
    LatestBlock {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get unconfirmed transactions
    Unconfirmed {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get current Bitcoin exchange rates
    Rates {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert currency to BTC
    Convert {
        /// Currency code, e.g. USD
        currency: String,
        /// Amount in that currency
        value: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get blockchain statistics
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get mining pool information
    Pools {
        /// Timespan (5days, 10days)
        #[arg(long, value_name = "PERIOD", default_value = DEFAULT_POOLS_TIMESPAN)]
        timespan: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set configuration values
    Set {
        /// API key (optional)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// API base URL
        #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
        base_url: Option<String>,
    },

    /// Show current configuration
    Show,

    /// Show config file path
    Path,
}
