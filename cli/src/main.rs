//! ChainTx CLI: classify EVM transactions stored as JSON.
//!
//! # Commands
//! ```text
//! chaintx decode     --file <tx.json> --wallet <addr> [--chain-id 1] [--tokens <tokens.json>] [--json]
//! chaintx interfaces
//! chaintx tokens     [--tokens <tokens.json>]
//! ```
//!
//! A transaction file holds one transaction object, an array of them, or a
//! fixture object with a `transaction` field.

use anyhow::{bail, Context, Result};
use chaintx_core::{
    Action, RawTransaction, StaticTokenRegistry, TokenRegistry, Transaction, TransactionContext,
};
use chaintx_evm::{fingerprint, TransactionDecoder};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

mod logging;

#[derive(Parser)]
#[command(
    name = "chaintx",
    about = "Classify raw EVM transactions into human-readable records",
    long_about = "
ChainTx CLI: decode receipt logs against the known interfaces (ERC-20,
ERC-721, Uniswap V2) and classify a transaction from a wallet's point of view.

ENVIRONMENT VARIABLES:
  RUST_LOG           Tracing filter directive (overrides --log-level)
  CHAINTX_WALLET     Default observing wallet for `decode`
",
    version
)]
struct Cli {
    /// Log level or filter directive
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and classify the transaction(s) in a JSON file
    Decode {
        /// Path to the transaction JSON
        #[arg(short, long)]
        file: PathBuf,
        /// Observing wallet address
        #[arg(short, long, env = "CHAINTX_WALLET")]
        wallet: String,
        /// EVM chain ID (default: 1 = Ethereum mainnet)
        #[arg(long, default_value_t = 1)]
        chain_id: u64,
        /// Extra token list (JSON array) added after the bundled tokens
        #[arg(long)]
        tokens: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the known interfaces and their events
    Interfaces,

    /// List the token registry
    Tokens {
        /// Extra token list (JSON array) added after the bundled tokens
        #[arg(long)]
        tokens: Option<PathBuf>,
    },
}

/// Accepted shapes of a transaction file.
#[derive(Deserialize)]
#[serde(untagged)]
enum TransactionFile {
    Many(Vec<RawTransaction>),
    One(RawTransaction),
    Fixture { transaction: RawTransaction },
}

impl TransactionFile {
    fn into_vec(self) -> Vec<RawTransaction> {
        match self {
            TransactionFile::Many(txs) => txs,
            TransactionFile::One(tx) | TransactionFile::Fixture { transaction: tx } => vec![tx],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(&logging::LogConfig {
        level: cli.log_level.clone(),
        json: cli.log_json,
    });

    match cli.command {
        Commands::Decode {
            file,
            wallet,
            chain_id,
            tokens,
            json,
        } => cmd_decode(&file, &wallet, chain_id, tokens.as_deref(), json),

        Commands::Interfaces => cmd_interfaces(),

        Commands::Tokens { tokens } => cmd_tokens(tokens.as_deref()),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn load_tokens(path: Option<&Path>) -> Result<StaticTokenRegistry> {
    let bundled = StaticTokenRegistry::bundled();
    let Some(path) = path else {
        return Ok(bundled);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading token list {}", path.display()))?;
    let extra = StaticTokenRegistry::from_json(&json)
        .with_context(|| format!("parsing token list {}", path.display()))?;
    info!(path = %path.display(), tokens = extra.len(), "loaded extra tokens");
    Ok(bundled.extended(extra))
}

fn cmd_decode(
    file: &Path,
    wallet: &str,
    chain_id: u64,
    tokens: Option<&Path>,
    as_json: bool,
) -> Result<()> {
    if chaintx_core::normalize_address(wallet).is_none() {
        bail!("'{wallet}' is not a valid EVM address");
    }

    let json = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let raw: Vec<RawTransaction> = serde_json::from_str::<TransactionFile>(&json)
        .with_context(|| format!("parsing transactions in {}", file.display()))?
        .into_vec();

    let decoder = TransactionDecoder::builder()
        .tokens(Arc::new(load_tokens(tokens)?))
        .build();
    let ctx = TransactionContext::new(chain_id, wallet);

    // Order of the output matches the input file.
    let decoded: Vec<Transaction> = raw
        .par_iter()
        .map(|tx| decoder.decode_transaction(tx, &ctx))
        .collect();
    info!(count = decoded.len(), "decoded transactions");

    if as_json {
        let out = if decoded.len() == 1 {
            serde_json::to_string_pretty(&decoded[0])?
        } else {
            serde_json::to_string_pretty(&decoded)?
        };
        println!("{out}");
    } else {
        for tx in &decoded {
            print_transaction(tx);
        }
    }
    Ok(())
}

fn print_transaction(tx: &Transaction) {
    println!("{}", tx.hash);
    println!("  Type:      {}", tx.kind);
    println!("  Status:    {:?}", tx.status);
    println!("  Direction: {:?}", tx.direction);
    println!("  From:      {}", tx.from_address.as_deref().unwrap_or("-"));
    println!("  To:        {}", tx.to_address.as_deref().unwrap_or("-"));
    println!("  Value:     {}", tx.value);
    println!("  Fee:       {}", tx.fee);
    if !tx.executed.is_empty() {
        println!("  Executed:  {}", tx.executed);
    }
    if tx.transaction_actions.is_empty() {
        return;
    }
    println!("  Actions:");
    for action in &tx.transaction_actions {
        match action {
            Action::Transfer(t) => println!(
                "    TRANSFER {:?} {} {} ({}) {} -> {}",
                t.direction,
                t.amount,
                t.token.symbol(),
                t.token.token().name,
                t.from.address.as_deref().unwrap_or("?"),
                t.to.address.as_deref().unwrap_or("?"),
            ),
            Action::Swap(s) => println!(
                "    SWAP by {} via {}",
                s.trader.address.as_deref().unwrap_or("?"),
                s.application.address.as_deref().unwrap_or("?"),
            ),
        }
    }
}

fn cmd_interfaces() -> Result<()> {
    let decoder = TransactionDecoder::new();
    for interface in decoder.interfaces().iter() {
        println!("{}", interface.name());
        for event in interface.events() {
            let topics = event.inputs.iter().filter(|p| p.indexed).count() + 1;
            let selector = fingerprint::keccak256_signature(&event.signature());
            println!("  {selector}  {}  ({topics} topics)", event.signature());
        }
    }
    println!("\nRules (in priority order): {}", decoder.rules().names().join(", "));
    Ok(())
}

fn cmd_tokens(tokens: Option<&Path>) -> Result<()> {
    let registry = load_tokens(tokens)?;
    println!("{} tokens", registry.len());
    for token in registry.tokens() {
        println!(
            "  {:8} {:8} {:>2}  chain {:<6} {}",
            token.symbol,
            token.standard.to_string(),
            token.decimals,
            token.chain_id,
            token.address.as_deref().unwrap_or("(native)"),
        );
    }
    Ok(())
}
