#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use bookstall_api::{construct_router, state::State};

mod config;
mod metrics;

async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let is_sale = method == "POST" && path.ends_with("/sales");

    let response = next.run(request).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    metrics::record_http_request(&method, &path, status, duration);

    if is_sale {
        let sale_status = if (200..300).contains(&status) {
            "committed"
        } else {
            "rejected"
        };
        metrics::record_sale(sale_status);
    }

    response
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    metrics::init_telemetry();

    tracing::info!("Starting Bookstall server");

    let config = config::Config::from_env()?;

    let state = Arc::new(State::new().await);
    let app = construct_router(state)
        .route("/metrics", get(metrics::handler))
        .layer(middleware::from_fn(metrics_middleware));

    let addr = format!("{}:{}", config.bind_address, config.port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
