//! Converter CLI
//!
//! Command-line interface for the Currency Converter API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use converter_client::ConverterClient;

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency Converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Currency Converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Show the latest rates
    Latest {
        /// Base currency (defaults to USD)
        #[arg(long)]
        base: Option<String>,
        /// Currencies to quote, comma-separated (defaults to all)
        #[arg(long, value_delimiter = ',')]
        currencies: Vec<String>,
    },
    /// Show the rates on a past date
    Historical {
        /// Valuation date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Base currency (defaults to USD)
        #[arg(long)]
        base: Option<String>,
        /// Currencies to quote, comma-separated (defaults to all)
        #[arg(long, value_delimiter = ',')]
        currencies: Vec<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Amount of the source currency
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
        /// Use the rates of a past date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the most recent conversions
    History,
}

fn as_strs(codes: &[String]) -> Vec<&str> {
    codes.iter().map(String::as_str).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ConverterClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Latest { base, currencies } => {
            let quotes = client
                .latest(base.as_deref(), &as_strs(&currencies))
                .await?;
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }

        Commands::Historical {
            date,
            base,
            currencies,
        } => {
            let quotes = client
                .historical(&date, base.as_deref(), &as_strs(&currencies))
                .await?;
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }

        Commands::Convert {
            amount,
            from,
            to,
            date,
        } => {
            let outcome = client
                .convert(amount, &from, &to, date.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }

        Commands::History => {
            let records = client.history().await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
