use anyhow::Result;
use batch_sender::console;
use batch_sender::keys::DEFAULT_KEY_ENV_VAR;
use batch_sender::network::ensure_network;
use batch_sender::units::parse_amount;
use batch_sender::{
    connect_with_retry, load_recipients, AlloyEndpoint, Dispatcher, RetryConfig, RpcEndpoint,
    SenderConfig, SigningKey,
};
use clap::Parser;
use dotenv::dotenv;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "batch-sender")]
#[command(about = "Send the same native-currency amount to every address in a list")]
struct Args {
    /// Built-in network key
    #[arg(long, default_value = "holesky")]
    network: String,

    /// TOML config file; replaces the built-in network table entry
    #[arg(long)]
    config: Option<String>,

    /// File with one recipient address per line
    #[arg(long, default_value = "address.txt")]
    addresses: PathBuf,

    /// Amount in currency units (e.g. 0.01); prompted for when omitted
    #[arg(long)]
    amount: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,

    /// Stop after the confirmation summary without sending anything
    #[arg(long)]
    dry_run: bool,

    /// Environment variable holding the hex private key
    #[arg(long, default_value = DEFAULT_KEY_ENV_VAR)]
    key_env: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => SenderConfig::load(path)?,
        None => SenderConfig::for_network(&args.network)?,
    };
    let network = &config.network;

    println!("{}", console::banner(network));

    let retry = RetryConfig::from(&config.retry);
    let endpoint = connect_with_retry(
        || AlloyEndpoint::connect(&network.rpc_url),
        &retry,
        config.retry.attempt_timeout(),
    )
    .await?;
    let endpoint: Arc<dyn RpcEndpoint> = Arc::new(endpoint);

    let chain_id = ensure_network(endpoint.as_ref(), network).await?;
    println!("✅ Connected to {} (Chain ID: {})", network.name, chain_id);

    let recipients = load_recipients(&args.addresses)?;
    println!("📋 Loaded {} recipient addresses", recipients.len());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let amount = match &args.amount {
        Some(text) => parse_amount(text, network.decimals)?,
        None => console::prompt_amount(&mut input, &mut output, network)?,
    };

    let key = SigningKey::from_env(&args.key_env)?;
    println!("✅ Private key validated (sender {})", key.address());

    if !args.yes && !console::confirm(&mut input, &mut output, network, amount, recipients.len())? {
        println!("🛑 Operation cancelled");
        return Ok(());
    }

    if args.dry_run {
        println!("✅ DRY RUN: Would send to {} addresses", recipients.len());
        return Ok(());
    }

    println!("\n🚀 Processing transactions...");
    let total = recipients.len();
    let dispatcher = Dispatcher::new(endpoint, &config, key);
    let summary = dispatcher
        .dispatch_with_progress(&recipients, amount, |index, outcome| {
            println!("\nTransaction {}/{}", index + 1, total);
            for line in console::outcome_lines(outcome, network) {
                println!("{}", line);
            }
        })
        .await?;

    info!(succeeded = summary.success_count(), total = summary.total(), "run complete");
    println!("\n{}", console::summary_block(&summary));
    Ok(())
}
