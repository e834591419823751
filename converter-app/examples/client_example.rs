//! Client example demonstrating conversion flows against a running server.
//!
//! The upstream rate service is replaced by a local stub, so no API key is needed.
//!
//! Run with: cargo run -p converter-app --example client_example

use std::net::SocketAddr;

use converter_client::{ClientError, ConverterClient};
use converter_hex::{ConversionService, inbound::HttpServer};
use converter_repo::build_repo;
use rate_gateway::{FreeCurrencyApi, GatewayConfig};
use serde_json::json;
use tempfile::tempdir;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Stub freecurrencyapi.com with a fixed USD table
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"EUR": 0.92, "GBP": 0.79, "JPY": 151.3, "INR": 83.1}
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/historical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"2023-01-02": {"EUR": 0.94, "GBP": 0.83, "JPY": 130.9, "INR": 82.7}}
        })))
        .mount(&upstream)
        .await;

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("currency_db.sqlite");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");
    println!("   Upstream: {}", upstream.uri());

    let repo = build_repo(&db_url).await?;
    let gateway = FreeCurrencyApi::new(GatewayConfig::default().with_base_url(upstream.uri()))?;
    let server = HttpServer::new(ConversionService::new(repo, gateway));

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        if let Err(err) = server.run(&server_addr).await {
            eprintln!("server stopped: {err}");
        }
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let client = ConverterClient::new(format!("http://127.0.0.1:{port}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: rates, conversions and history
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let latest = client.latest(None, &["EUR", "GBP"]).await?;
    println!("✅ Latest USD rates: {:?}", latest.rates);

    let historical = client.historical("2023-01-02", Some("USD"), &[]).await?;
    println!("✅ Rates on {}: {:?}", historical.as_of, historical.rates);

    let cross = client.convert(100.0, "EUR", "GBP", None).await?;
    println!("✅ 100 EUR = {:.2} GBP (rate {:.6})", cross.result, cross.rate);

    let past = client
        .convert(5000.0, "JPY", "INR", Some("2023-01-02"))
        .await?;
    println!("✅ 5000 JPY = {:.2} INR on 2023-01-02", past.result);

    let trivial = client.convert(42.0, "USD", "USD", None).await?;
    println!(
        "✅ 42 USD = {} USD, recorded: {}",
        trivial.result,
        trivial.history.is_some()
    );

    match client.convert(1.0, "EUR", "XAU", None).await {
        Err(ClientError::Api { status, message }) => {
            println!("✅ Unknown currency rejected: {status} {message}")
        }
        other => println!("⚠️  Unexpected outcome: {other:?}"),
    }

    let history = client.history().await?;
    println!("✅ History ({} entries, newest first):", history.len());
    for record in &history {
        println!(
            "   {} {} → {:.2} {} @ {}",
            record.amount,
            record.source_currency,
            record.converted_amount,
            record.target_currency,
            record.date
        );
    }

    Ok(())
}
