use clap::{Parser, Subcommand};
use serde_json::Value;

use translate_dispatch::TranslateRequest;

#[derive(Parser)]
#[command(name = "translate-cli")]
#[command(about = "Talk to a running translate-dispatch server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:1188")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a piece of text
    Translate {
        text: String,
        #[arg(short, long, default_value = "auto")]
        source: String,
        #[arg(short, long, default_value = "EN")]
        target: String,
    },
    /// Show backend weights and latencies
    Backends,
    /// Check that the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Translate { text, source, target } => {
            let request = TranslateRequest::new(text, source, target);
            client.post(format!("{}/translate", cli.url)).json(&request).send().await?
        }
        Commands::Backends => client.get(format!("{}/backends", cli.url)).send().await?,
        Commands::Health => client.get(format!("{}/health", cli.url)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
