use anyhow::Result;
use clap::Parser;
use client_core::DigestConsole;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: String,
    /// Value to digest after the initial fetch.
    #[arg(long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let console = DigestConsole::connect(&args.server_url)?;
    console.initialize().await?;

    for thing in console.awesome_things() {
        println!("* {thing}");
    }
    println!(
        "raw={} digest={}",
        console.raw().await.unwrap_or_default(),
        console.digest().await.unwrap_or_default()
    );

    if let Some(target) = args.target {
        console.set_raw(target).await;
        console.get_digest().await?;
        println!(
            "raw={} digest={}",
            console.raw().await.unwrap_or_default(),
            console.digest().await.unwrap_or_default()
        );
    }

    Ok(())
}
