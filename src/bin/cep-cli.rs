use clap::{Parser, Subcommand};
use serde_json::Value;

use cep_weather::domain::LookupRequest;

#[derive(Parser)]
#[command(name = "cep-cli")]
#[command(about = "Client for the postal-code weather pipeline", long_about = None)]
struct Cli {
    /// Base URL of the stage to talk to.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the weather for a postal code via the gateway
    Lookup {
        cep: String,
        /// Post to the enrichment stage's /weather route instead of the gateway
        #[arg(long)]
        direct: bool,
    },
    /// Check the stage's health endpoint
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Lookup { cep, direct } => {
            let path = if direct { "/weather" } else { "/" };
            client
                .post(format!("{base}{path}"))
                .json(&LookupRequest::new(cep))
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{base}/health")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    if !status.is_success() {
        eprintln!("Error: stage returned status {}", status);
        std::process::exit(1);
    }
    Ok(())
}
