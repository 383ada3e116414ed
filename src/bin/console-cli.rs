use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "console-cli")]
#[command(about = "Command-line client for the story console API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured routes
    Routes,
    /// Show which view a location path activates
    Resolve { path: String },
    /// Load a composite by fully-qualified class name
    Fetch { identifier: String },
    /// List composite classes known upstream
    List,
    /// Check a Given/When/Then step text
    Validate { text: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Routes => client.get(format!("{}/api/routes", base)).send().await?,
        Commands::Resolve { path } => {
            client
                .get(format!("{}/api/resolve", base))
                .query(&[("path", path)])
                .send()
                .await?
        }
        Commands::Fetch { identifier } => {
            client
                .get(format!("{}/api/composites/{}", base, identifier))
                .send()
                .await?
        }
        Commands::List => client.get(format!("{}/api/composites", base)).send().await?,
        Commands::Validate { text } => {
            client
                .post(format!("{}/api/steps/validate", base))
                .json(&json!({ "stepText": text }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: console API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
