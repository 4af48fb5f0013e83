use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use skinshop_backend::{
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config));

    // Identity handshake runs in the background; order intake fails fast
    // with a not-ready error until the gate opens.
    if config.discord_configured() {
        let discord = app_state.discord.clone();
        tokio::spawn(async move {
            if let Err(e) = discord.connect().await {
                tracing::error!("Discord identity handshake failed: {e}");
            }
        });
    }

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let static_dir = config.static_dir.clone();
    let cors_origins = config.cors_origins();

    let server = HttpServer::new(move || {
        let cors = if cors_origins.iter().any(|o| o == "*") {
            Cors::permissive()
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .configure(|cfg| configure_routes(cfg, &static_dir))
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
