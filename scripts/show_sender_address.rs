use anyhow::Result;
use batch_sender::keys::{SigningKey, DEFAULT_KEY_ENV_VAR};

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let var = args.get(1).map(String::as_str).unwrap_or(DEFAULT_KEY_ENV_VAR);
    if args.len() > 2 {
        eprintln!("Usage: {} [KEY_ENV_VAR]", args[0]);
        std::process::exit(1);
    }

    println!("🔐 Deriving sender address from ${}", var);
    let key = SigningKey::from_env(var)?;

    println!("✅ Sender address: {}", key.address());
    println!("💰 Fund this address before running a batch");
    Ok(())
}
