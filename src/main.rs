use std::path::PathBuf;

use axum::{Router, routing::get};
use clap::Parser;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use automeal_server::catalog::Catalog;
use automeal_server::handlers::{
    ApiDoc, AppState, dish_router, health, order_router, restaurant_router,
};
use automeal_server::rpc;

#[derive(Parser, Debug)]
#[command(name = "automeal-server", about = "Food ordering backend with an agent-facing RPC channel")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    listen: String,
    /// Directory containing dishes.csv and restaurants.csv
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // The catalog must exist before the server accepts traffic.
    let catalog = Catalog::load(&args.data_dir)?;
    info!(
        dishes = catalog.dishes().len(),
        restaurants = catalog.restaurants().len(),
        "catalog loaded"
    );

    let state = AppState::new(catalog);

    let app = Router::new()
        .merge(dish_router())
        .merge(restaurant_router())
        .merge(order_router())
        .route("/health", get(health))
        .route("/rpc", get(rpc::rpc_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!("AutoMeal server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
