use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use video_service::config::{Config, LogFormat};
use video_service::{handlers, middleware, VideoStore};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.app.log_format);

    tracing::info!("Starting video-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = if config.videos.seed_sample {
        tracing::info!("Seeding store with sample video");
        VideoStore::seeded()
    } else {
        VideoStore::new()
    };
    let store = web::Data::new(store);
    let video_config = web::Data::new(config.videos.clone());

    tracing::info!(
        age_restriction_check = ?config.videos.age_restriction_check,
        "Video validation configured"
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(video_config.clone())
            .wrap(middleware::RequestLogging)
            .wrap(actix_middleware::NormalizePath::trim())
            .configure(handlers::configure_routes)
    });
    if let Some(workers) = config.app.workers {
        server = server.workers(workers);
    }

    let (host, port) = config.bind_address();
    tracing::info!("HTTP server listening on {}:{}", host, port);

    server
        .bind((host, port))
        .context("Failed to bind HTTP listener")?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    tracing::info!("video-service shutting down");
    Ok(())
}
