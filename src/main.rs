mod adapters;
mod application;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use adapters::{
    controllers::{
        auth_controller::AuthController, cart_controller::CartController,
        health_controller::HealthController, product_controller::ProductController,
    },
    middleware::{admin_route, protect_route},
    repositories::{PgProductRepository, PgUserRepository, RedisCacheRepository},
    state::AppState,
};
use application::{
    repositories::{
        cache_repository::CacheRepository, product_repository::ProductRepository,
        user_repository::UserRepository,
    },
    services::ImageStorage,
};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use domain::config::{environment::Environment, secrets::Secrets};
use services::{CloudinaryStorageService, GoogleOAuthService, TokenService};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // TLS provider for the rustls-backed redis and reqwest clients.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let database_url = std::env::var("DATABASE_URL")
        .expect("ERROR: DATABASE_URL environment variable must be set");

    let redis_url =
        std::env::var("REDIS_URL").expect("ERROR: REDIS_URL environment variable must be set");

    let client_url =
        std::env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    let environment = Environment::from_env();
    let secrets = Secrets::from_env();

    tracing::info!("Starting shop-service in {:?} mode", environment);

    // The session rides on cookies, so CORS is pinned to the storefront
    // origin with credentials enabled.
    let cors = CorsLayer::new()
        .allow_origin(
            client_url
                .parse::<HeaderValue>()
                .expect("Invalid CLIENT_URL origin"),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    // Connect to PostgreSQL and Redis in parallel for faster startup
    tracing::info!("Connecting to databases...");
    let (pool, redis_conn_manager) = tokio::join!(
        async {
            sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(&database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.")
        },
        async {
            let redis_client = redis::Client::open(redis_url.as_str())
                .expect("ERROR: Failed to create Redis client. Check REDIS_URL format.");
            redis::aio::ConnectionManager::new(redis_client)
                .await
                .expect(
                    "ERROR: Failed to connect to Redis. Check REDIS_URL and network connectivity.",
                )
        }
    );
    tracing::info!("Database connections established");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let cache_repository =
        Arc::new(RedisCacheRepository::new(redis_conn_manager)) as Arc<dyn CacheRepository>;
    let token_service = Arc::new(TokenService::new(
        secrets.access_token_secret.clone(),
        secrets.refresh_token_secret.clone(),
        cache_repository.clone(),
    ));

    let app_state = AppState {
        environment,
        client_url,
        user_repository: Arc::new(PgUserRepository::new(pool.clone())) as Arc<dyn UserRepository>,
        product_repository: Arc::new(PgProductRepository::new(pool.clone()))
            as Arc<dyn ProductRepository>,
        cache_repository,
        token_service,
        image_storage: Arc::new(CloudinaryStorageService::new(secrets.cloudinary.clone()))
            as Arc<dyn ImageStorage>,
        google_oauth: Arc::new(GoogleOAuthService::new(secrets.google_oauth.clone())),
    };

    // Session endpoints and the federated-identity flow
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(AuthController::signup))
        .route("/api/auth/login", post(AuthController::login))
        .route("/api/auth/logout", post(AuthController::logout))
        .route("/api/auth/refresh-token", post(AuthController::refresh_token))
        .route("/api/auth/google", get(AuthController::google_auth))
        .route(
            "/api/auth/google/callback",
            get(AuthController::google_callback),
        )
        .route(
            "/api/auth/google/failure",
            get(AuthController::google_auth_failure),
        );

    // Public catalog reads
    let catalog_routes = Router::new()
        .route(
            "/api/products/featured",
            get(ProductController::get_featured_products),
        )
        .route(
            "/api/products/recommendations",
            get(ProductController::get_recommended_products),
        )
        .route(
            "/api/products/category/{category}",
            get(ProductController::get_products_by_category),
        )
        .route("/api/health", get(HealthController::health_check));

    // Routes that require a valid access-token cookie
    let protected_routes = Router::new()
        .route("/api/auth/profile", get(AuthController::get_profile))
        .route(
            "/api/cart",
            get(CartController::get_cart_products)
                .post(CartController::add_to_cart)
                .delete(CartController::remove_all_from_cart),
        )
        .route("/api/cart/{product_id}", put(CartController::update_quantity))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            protect_route,
        ));

    // Catalog mutation requires the admin role on top of authentication
    let admin_routes = Router::new()
        .route(
            "/api/products",
            get(ProductController::get_all_products).post(ProductController::create_product),
        )
        .route(
            "/api/products/{id}",
            patch(ProductController::toggle_featured_product)
                .delete(ProductController::delete_product),
        )
        .route_layer(middleware::from_fn(admin_route))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            protect_route,
        ));

    let router = Router::new()
        .merge(auth_routes)
        .merge(catalog_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(cors)
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    // Explicit lifecycle: drain the connection pool before exiting.
    pool.close().await;
    tracing::info!("Shutdown complete");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("Shutdown signal received");
}
