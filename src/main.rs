//! Mini-Ledger CLI Application
//!
//! A thin driver around the ledger library: generates keys and runs the
//! end-to-end demonstration scenario.

use clap::{Parser, Subcommand};
use mini_ledger::core::{Ledger, DEFAULT_DIFFICULTY};
use mini_ledger::wallet::Wallet;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "A single-process proof-of-work ledger simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the end-to-end demo: sign, mine, query balances, tamper, validate
    Demo {
        /// Mining difficulty (number of leading zero hex digits)
        #[arg(short, long, default_value_t = DEFAULT_DIFFICULTY)]
        difficulty: usize,

        /// Print the final chain as JSON
        #[arg(long)]
        dump_chain: bool,
    },

    /// Generate a fresh key pair for a new wallet
    Keygen,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            difficulty,
            dump_chain,
        } => cmd_demo(difficulty, dump_chain),
        Commands::Keygen => cmd_keygen(),
    }
}

/// End-to-end demonstration: one signed transfer, one mined block,
/// balance queries, then in-place tampering caught by validation.
fn cmd_demo(difficulty: usize, dump_chain: bool) -> CliResult<()> {
    let mut ledger = Ledger::with_difficulty(difficulty);
    let alice = Wallet::new();
    let bob = Wallet::new();

    println!("Alice: {}", alice.address());
    println!("Bob:   {}", bob.address());

    let tx = alice.send(&bob.address(), 10)?;
    ledger.add_transaction(tx)?;

    println!("Starting the miner...");
    let block = ledger.mine_pending_transactions(&alice.address());
    println!("Block successfully mined: {}", block.hash);

    println!("Balance of Alice: {}", alice.balance(&ledger));
    println!("Balance of Bob:   {}", bob.balance(&ledger));
    println!("Is the chain valid? {}", ledger.is_chain_valid());

    // Tamper with the recorded transfer without re-signing or re-mining
    ledger.chain[1].transactions[0].amount = 1;
    println!(
        "After tampering, is the chain valid? {}",
        ledger.is_chain_valid()
    );

    if dump_chain {
        println!("{}", serde_json::to_string_pretty(&ledger.chain)?);
    }

    Ok(())
}

fn cmd_keygen() -> CliResult<()> {
    let wallet = Wallet::new();
    println!("Private key: {}", wallet.private_key());
    println!("Address:     {}", wallet.address());
    Ok(())
}
