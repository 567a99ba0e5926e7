use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskit::auth::AuthMiddleware;
use taskit::config::Config;
use taskit::id::UuidGenerator;
use taskit::repository::postgres::MIGRATOR;
use taskit::routes;
use taskit::state::{AppServices, Repositories};

fn cors(allowed_origin: &str) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    if allowed_origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(allowed_origin)
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("failed to connect to database: {}", e);
            io::Error::new(io::ErrorKind::Other, e.to_string())
        })?;

    if config.auto_migrate {
        MIGRATOR.run(&pool).await.map_err(|e| {
            log::error!("failed to run migrations: {}", e);
            io::Error::new(io::ErrorKind::Other, e.to_string())
        })?;
        log::info!("database migrations applied");
    }

    let services = AppServices::from_config(
        &config,
        Repositories::postgres(pool, Arc::new(UuidGenerator)),
    );
    let allowed_origin = config.allowed_origin.clone();

    log::info!("starting taskit server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origin))
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(services.tokens.clone()))
                    .configure(|cfg| routes::config(cfg, &services)),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
