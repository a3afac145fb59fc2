use anyhow::Context;
use dotenvy::dotenv;
use tenantry::router::init_router;
use tenantry::state::init_app_state;
use tenantry_observability::init_console_logging;
use tenantry_rbac::ensure_catalog;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_console_logging();

    let summary = ensure_catalog()
        .context("refusing to start with an inconsistent permission catalog")?;
    info!(
        permissions = summary.permissions,
        roles = summary.roles,
        manage_aliases = summary.manage_aliases,
        "Permission catalog loaded"
    );

    let state = init_app_state();
    let address = state.server_config.address();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(address = %address, "Server listening");
    println!("🚀 Server running on http://{address}");
    println!("📚 Swagger UI available at http://{address}/swagger-ui");
    axum::serve(listener, app).await?;

    Ok(())
}
