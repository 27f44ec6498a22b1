//! Console entry point: signs in and drives the page controllers.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (RUST_LOG respected)
//! 2. Load configuration (env > config.toml > defaults)
//! 3. Build the API client and session
//! 4. Resume a saved session, else sign in with KIRANA_USERNAME / KIRANA_PASSWORD
//! 5. Dispatch the subcommand and print its report
//!
//! ## Usage
//! ```text
//! kirana-admin [report | dashboard | inventory [SEARCH] | low-stock | dues]
//! ```

use kirana_admin::config::AdminConfig;
use kirana_admin::error::AdminResult;
use kirana_admin::pages::{CustomersPage, DashboardPage, InventoryPage, SalesHistoryPage};
use kirana_admin::session::Session;
use kirana_client::{ApiClient, TokenStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AdminConfig::load()?;
    info!(backend = %config.backend_url, "Configuration loaded");

    let tokens = TokenStore::open_default().unwrap_or_else(|_| TokenStore::in_memory());
    let client = ApiClient::new(&config.backend_url, tokens)?;
    let mut session = Session::new(client.clone());

    if !session.resume().await? {
        let username = std::env::var("KIRANA_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("KIRANA_PASSWORD").unwrap_or_default();
        session.sign_in(&username, &password).await?;
    }
    let user = session.current_user()?;
    println!("Signed in as {} ({})", user.username, user.role);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("report");

    match command {
        "dashboard" => show_dashboard(&client).await?,
        "inventory" => show_inventory(&client, &config, args.get(1).map(String::as_str)).await?,
        "low-stock" => show_low_stock(&client, &config).await?,
        "dues" => show_dues(&client, &config).await?,
        "report" => {
            show_dashboard(&client).await?;
            show_low_stock(&client, &config).await?;
            show_dues(&client, &config).await?;
            show_recent_sales(&client, &config).await?;
        }
        other => {
            eprintln!("Unknown command '{}'", other);
            eprintln!("Usage: kirana-admin [report | dashboard | inventory [SEARCH] | low-stock | dues]");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn show_dashboard(client: &ApiClient) -> AdminResult<()> {
    let mut dashboard = DashboardPage::new(client.clone());
    dashboard.refresh().await?;
    let stats = dashboard.stats();
    println!();
    println!("=== Last 30 Days ===");
    println!("Sales:        {}", stats.total_sales_count);
    println!("Revenue:      {}", stats.total_revenue);
    println!("Profit:       {}", stats.total_profit);
    println!("Stock value:  {}", stats.current_stock_value);
    if let Some(best) = dashboard.best_day() {
        println!("Best day:     {} ({})", best.date, best.amount);
    }
    Ok(())
}

async fn show_inventory(
    client: &ApiClient,
    config: &AdminConfig,
    search: Option<&str>,
) -> AdminResult<()> {
    let mut inventory = InventoryPage::new(client.clone(), config.search_debounce_ms);
    if let Some(term) = search {
        inventory.search = term.to_string();
    }
    inventory.refresh().await?;
    println!();
    println!("=== Inventory ({} items) ===", inventory.visible().len());
    for item in inventory.visible() {
        println!(
            "{:<30} {:<12} {:>5} @ {}",
            item.name, item.sku, item.quantity, item.selling_price
        );
    }
    Ok(())
}

async fn show_low_stock(client: &ApiClient, config: &AdminConfig) -> AdminResult<()> {
    let mut inventory = InventoryPage::new(client.clone(), config.search_debounce_ms);
    inventory.refresh().await?;
    inventory.low_stock_only = true;
    println!();
    println!("=== Low Stock ({}) ===", inventory.low_stock_count());
    for item in inventory.visible() {
        println!(
            "{:<30} {:>5} on hand (reorder at {})",
            item.name, item.quantity, item.min_stock_level
        );
    }
    Ok(())
}

async fn show_dues(client: &ApiClient, config: &AdminConfig) -> AdminResult<()> {
    let mut customers = CustomersPage::new(client.clone(), config.search_debounce_ms);
    customers.refresh().await?;
    customers.dues_only = true;
    println!();
    println!("=== Receivables: {} ===", customers.total_dues());
    for customer in customers.visible() {
        println!("{:<30} {}", customer.name, customer.current_balance.abs());
    }
    Ok(())
}

async fn show_recent_sales(client: &ApiClient, config: &AdminConfig) -> AdminResult<()> {
    let mut sales = SalesHistoryPage::new(client.clone(), config.search_debounce_ms);
    sales.refresh().await?;
    println!();
    println!(
        "=== Recent Sales: {} totalling {} ({} outstanding) ===",
        sales.sales().len(),
        sales.total_amount(),
        sales.total_outstanding()
    );
    Ok(())
}
