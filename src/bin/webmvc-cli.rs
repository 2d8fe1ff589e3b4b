use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "webmvc-cli")]
#[command(about = "Inspect a running webmvc server through its admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "WEBMVC_ADMIN_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server status
    Status,
    /// List the routing table
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let endpoint = match cli.command {
        Commands::Status => "status",
        Commands::Routes => "routes",
    };
    let res = client
        .get(format!("{}/admin/{}", cli.url.trim_end_matches('/'), endpoint))
        .headers(headers)
        .send()
        .await?;

    match cli.command {
        Commands::Routes => print_routes(res).await,
        Commands::Status => print_response(res).await,
    }
}

async fn print_routes(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let Some(json) = read_json(res).await? else {
        return Ok(());
    };

    for route in json.as_array().map(Vec::as_slice).unwrap_or_default() {
        println!(
            "{:<8} {:<30} {}::{}",
            route["method"].as_str().unwrap_or("?"),
            route["path"].as_str().unwrap_or("?"),
            route["controller"].as_str().unwrap_or("?"),
            route["operation"].as_str().unwrap_or("?"),
        );
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(json) = read_json(res).await? {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

async fn read_json(res: reqwest::Response) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(None);
    }

    Ok(Some(res.json().await?))
}
