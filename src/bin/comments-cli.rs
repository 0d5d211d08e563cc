use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "comments-cli")]
#[command(about = "Command-line client for the comments API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// List all comments, newest first
    List,
    /// Show one comment
    Get { id: String },
    /// Post a new comment
    Create {
        #[arg(short, long)]
        author: String,
        #[arg(short, long)]
        content: String,
    },
    /// Delete a comment
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{base}/health")).send().await?,
        Commands::List => client.get(format!("{base}/api/comments")).send().await?,
        Commands::Get { id } => {
            client
                .get(format!("{base}/api/comments/{id}"))
                .send()
                .await?
        }
        Commands::Create { author, content } => {
            client
                .post(format!("{base}/api/comments"))
                .json(&json!({ "author": author, "content": content }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{base}/api/comments/{id}"))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if status.is_success() {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        eprintln!("Error: API returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }
    Ok(())
}
