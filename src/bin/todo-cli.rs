use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "todo-cli")]
#[command(about = "Command-line client for the todo gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all todos
    List,
    /// Create a todo
    Create {
        text: String,
        #[arg(long)]
        done: bool,
    },
    /// Show a single todo
    Get { id: String },
    /// Replace a todo's text and state
    Update {
        id: String,
        text: String,
        #[arg(long)]
        done: bool,
    },
    /// Delete a todo
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::List => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_lines(res).await?;
        }
        Commands::Create { text, done } => {
            let res = client
                .post(format!("{}/", base))
                .json(&json!({ "text": text, "done": done }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/{}", base, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Update { id, text, done } => {
            let res = client
                .put(format!("{}/{}", base, id))
                .json(&json!({ "text": text, "done": done }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Delete { id } => {
            let res = client.delete(format!("{}/{}", base, id)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// The list endpoint answers with one JSON document per line.
async fn print_lines(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        return print_response(res).await;
    }

    let text = res.text().await?;
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let json: Value = serde_json::from_str(line)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
