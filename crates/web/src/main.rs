use anyhow::Context;
use storage::Database;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{auth, categories, clubs, competitors, health, users};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        clubs::handlers::list_clubs,
        clubs::handlers::list_pending_clubs,
        clubs::handlers::list_active_clubs,
        clubs::handlers::get_club,
        clubs::handlers::register_club,
        clubs::handlers::update_club,
        clubs::handlers::approve_club,
        clubs::handlers::reject_club,
        clubs::handlers::delete_club,
        categories::handlers::list_categories,
        categories::handlers::list_active_categories,
        categories::handlers::get_category,
        categories::handlers::create_category,
        categories::handlers::update_category,
        categories::handlers::set_category_status,
        categories::handlers::delete_category,
        competitors::handlers::list_competitors,
        competitors::handlers::list_active_competitors,
        competitors::handlers::list_competitors_by_club,
        competitors::handlers::list_competitors_by_category,
        competitors::handlers::get_competitor,
        competitors::handlers::enroll_competitor,
        competitors::handlers::update_competitor,
        competitors::handlers::set_competitor_status,
        competitors::handlers::delete_competitor,
        users::handlers::list_users,
        users::handlers::list_active_users,
        users::handlers::list_users_by_role,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::assign_user_role,
        users::handlers::set_user_status,
        users::handlers::list_roles,
        users::handlers::get_role_by_name,
        users::handlers::create_role,
        auth::handlers::login,
        health::ping,
    ),
    components(
        schemas(
            storage::dto::club::RegisterClubRequest,
            storage::dto::club::UpdateClubRequest,
            storage::dto::club::ApproveClubRequest,
            storage::dto::club::RejectClubRequest,
            storage::dto::category::CategoryRequest,
            storage::dto::competitor::EnrollCompetitorRequest,
            storage::dto::competitor::UpdateCompetitorRequest,
            storage::dto::user::CreateUserRequest,
            storage::dto::user::AssignRoleRequest,
            storage::dto::user::CreateRoleRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::auth::LoginResponse,
            storage::dto::common::SetActiveRequest,
            storage::models::Club,
            storage::models::ClubStatus,
            storage::models::Category,
            storage::models::Competitor,
            storage::models::CompetitorDetail,
            storage::models::User,
            storage::models::Role,
            health::PingResponse,
        )
    ),
    tags(
        (name = "clubs", description = "Club registration and validation"),
        (name = "categories", description = "Competition categories"),
        (name = "competitors", description = "Competitor enrollment"),
        (name = "users", description = "Platform users"),
        (name = "roles", description = "User roles"),
        (name = "auth", description = "Login"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting robotics registry API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = match &config.database_url {
        Some(url) => {
            tracing::info!(
                "Connecting to database at: {}",
                url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(url)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage; data will not persist");
            Database::in_memory()
        }
    };

    if db.is_persistent() {
        tracing::info!("Running database migrations");
        db.run_migrations()
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Database migrations completed successfully");
    }

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty; every mutating endpoint will answer 401");
    }

    if config.strict_age_bounds {
        tracing::info!("Strict category age bounds enabled");
    }

    let state = AppState::new(db, config.strict_age_bounds);

    let app = routes::router(state, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
