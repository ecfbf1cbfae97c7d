// siga-core/examples/inventory_cli.rs
// Log in against a real backend, reload the inventory, and print it.

use siga_client::{ApiClient, ClientConfig, IndicatorClient};
use siga_core::{AuthCoordinator, CatalogRepository, GlobalState, InventoryEngine, SessionStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <base_url> <email> <password>", args[0]);
        println!(
            "  Example: {} http://localhost:3000 admin@siga.cl secreta",
            args[0]
        );
        return Ok(());
    }

    let base_url = &args[1];
    let email = &args[2];
    let password = &args[3];

    let session_dir = std::env::var("SIGA_SESSION_DIR").unwrap_or_else(|_| "./.siga".to_string());
    let session = Arc::new(SessionStore::load(std::path::Path::new(&session_dir))?);

    let config = ClientConfig::new(base_url);
    let client = Arc::new(ApiClient::new(&config)?);
    let indicators = IndicatorClient::new(&config)?;

    let auth = AuthCoordinator::new(
        Arc::clone(&client) as Arc<dyn siga_core::AuthApi>,
        Arc::clone(&session),
    );
    auth.login(email, password).await?;
    tracing::info!(
        company = ?session.company_name(),
        role = ?auth.user_role(),
        "Logged in"
    );

    let repo: Arc<dyn siga_core::CatalogApi> = Arc::new(CatalogRepository::new(
        Arc::clone(&client),
        indicators,
        Arc::clone(&session),
    ));

    let global = GlobalState::new(Arc::clone(&repo));
    global.load_locales().await;
    global.refresh_all().await;
    if let Some(local) = global.selected_local() {
        tracing::info!(local = %local.nombre, "Active local");
    }
    let dollar = global.dollar();
    tracing::info!(value = dollar.value, unit = %dollar.unit, "Dólar");
    let metrics = global.sales_metrics();
    tracing::info!(
        total = metrics.total_today,
        count = metrics.count_today,
        "Ventas de hoy"
    );

    let engine = InventoryEngine::new(repo);
    engine.reload().await;
    if let Some(error) = engine.error() {
        tracing::error!(%error, "Inventory reload failed");
        return Ok(());
    }

    for item in engine.stock_items() {
        let nombre = item
            .producto
            .as_ref()
            .map(|p| p.nombre.as_str())
            .unwrap_or("?");
        let precio = item
            .producto
            .as_ref()
            .map(|p| p.price_display())
            .unwrap_or_default();
        let marker = if item.is_low_stock() { " [STOCK BAJO]" } else { "" };
        println!(
            "{:<30} {:>10} x{:<5} local {}{}",
            nombre, precio, item.cantidad, item.local_id, marker
        );
    }

    Ok(())
}
