mod cli;

use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = cli::Args::parse();
    cli::setup_logging(args.log_level);

    let output = cli::run(&args).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
