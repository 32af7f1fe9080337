/// Social API Main Entry Point
///
/// Starts the HTTP server with:
/// - PostgreSQL connection pool (migrations applied at boot)
/// - GraphQL endpoint with WebSocket subscriptions
/// - New-post event bus scoped to the server process
use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpRequest, HttpServer};
use anyhow::{Context as _, Result};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

use social_api::config::Settings;
use social_api::events::PostEvents;
use social_api::schema::{build_schema, AppSchema, AuthHeader};

async fn graphql_handler(
    schema: web::Data<AppSchema>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    // Hand the raw Authorization header to the per-operation auth guard.
    // Absence is not an error here; only guarded operations care.
    if let Some(value) = http_req.headers().get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            request = request.data(AuthHeader(value.to_string()));
        }
    }

    schema.execute(request).await.into()
}

async fn graphql_subscription_handler(
    schema: web::Data<AppSchema>,
    req: HttpRequest,
    payload: web::Payload,
) -> actix_web::Result<actix_web::HttpResponse> {
    GraphQLSubscription::new(schema.as_ref().clone()).start(&req, payload)
}

/// SDL endpoint for schema introspection and client code generation
async fn schema_handler(schema: web::Data<AppSchema>) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(schema.sdl())
}

async fn playground_handler() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(
            GraphQLPlaygroundConfig::new("/graphql").subscription_endpoint("/graphql"),
        ))
}

async fn health_handler() -> &'static str {
    "ok"
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "social_api=info,info".into()))
        .with_target(false)
        .json()
        .init();

    info!("Starting Social API");

    let settings = Settings::load().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout_secs))
        .connect(&settings.database.url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    info!(
        "Database pool initialized with {} max connections",
        settings.database.max_connections
    );

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    // Event bus lives for the duration of the server process; dropping it
    // at shutdown ends every open subscription stream.
    let events = PostEvents::default();

    let schema = build_schema(pool, events, settings.jwt.clone());
    info!("GraphQL schema built");

    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Social API listening on http://{}", bind_addr);

    let cors_settings = settings.cors.clone();
    HttpServer::new(move || {
        let cors = if cors_settings.allows_any() {
            Cors::permissive()
        } else {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST"])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .max_age(3600);
            for origin in cors_settings.origins() {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(schema.clone()))
            .route("/graphql", web::post().to(graphql_handler))
            .route("/graphql", web::get().to(graphql_subscription_handler))
            .route("/graphql/schema", web::get().to(schema_handler))
            .route("/playground", web::get().to(playground_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("Server error")
}
