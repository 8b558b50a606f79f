pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{
    admin, agents, auth, buyers, contracts, documents, inquiries, notifications, properties, sos,
    users,
};
use crate::middleware::auth_middleware;

pub fn create_app(config: AppConfig) -> Router {
    let cors = cors_layer(&config.cors_origins);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/profile",
            get(auth::get_profile)
                .put(auth::update_profile)
                .layer(axum_middleware::from_fn_with_state(
                    config.clone(),
                    auth_middleware,
                )),
        );

    let user_routes = Router::new()
        .route("/me", get(users::me))
        .route("/", get(users::list_users))
        .route("/:id", get(users::get_user).put(users::update_user))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let property_routes = Router::new()
        .route(
            "/",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/estimate", post(properties::estimate_property))
        .route(
            "/:id",
            get(properties::get_property)
                .put(properties::update_property)
                .delete(properties::delete_property),
        )
        .route("/:id/inquire", post(inquiries::create_inquiry))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let inquiry_routes = Router::new()
        .route("/agent", get(inquiries::agent_inbox))
        .route("/buyer", get(inquiries::buyer_inbox))
        .route(
            "/:id/messages",
            get(inquiries::get_messages).post(inquiries::post_message),
        )
        .route("/:id/mark-read", post(inquiries::mark_read))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route(
            "/",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route("/unread-count", get(notifications::unread_count))
        .route("/mark-read", post(notifications::mark_all_read))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let agent_routes = Router::new()
        .route("/", get(agents::list_agents))
        .route(
            "/profile",
            get(agents::get_own_profile).put(agents::update_own_profile),
        )
        .route("/upload-document", post(documents::upload_agent_document))
        .route("/:id", get(agents::get_agent))
        .route("/:id/properties", get(agents::agent_properties))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let buyer_routes = Router::new()
        .route("/", get(buyers::list_buyers))
        .route(
            "/profile",
            get(buyers::get_own_profile).put(buyers::update_own_profile),
        )
        .route("/upload-document", post(documents::upload_buyer_document))
        .route("/:id", get(buyers::get_buyer))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/pending-agents", get(admin::pending_agents))
        .route("/pending-buyers", get(admin::pending_buyers))
        .route("/pending-properties", get(admin::pending_properties))
        .route("/files", get(admin::list_files))
        .route("/verify-agent/:id", put(admin::verify_agent))
        .route("/verify-buyer/:id", put(admin::verify_buyer))
        .route("/verify-property/:id", put(admin::verify_property))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let contract_routes = Router::new()
        .route(
            "/",
            get(contracts::list_contracts).post(contracts::create_contract),
        )
        .route("/upload-pdf", post(contracts::upload_pdf))
        .route("/buyer/:id", get(contracts::contracts_for_buyer))
        .route("/agent/:id", get(contracts::contracts_for_agent))
        .route(
            "/:id",
            get(contracts::get_contract)
                .put(contracts::update_contract)
                .delete(contracts::delete_contract),
        )
        .route("/:id/pdf", get(contracts::download_pdf))
        .route("/:id/analyze", post(contracts::analyze_contract))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    let sos_routes = Router::new()
        .route("/analyze", post(sos::analyze_sos))
        .layer(axum_middleware::from_fn_with_state(
            config.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/properties", property_routes)
        .nest("/api/inquiries", inquiry_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/agents", agent_routes)
        .nest("/api/buyers", buyer_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/contracts", contract_routes)
        .nest("/api/sos", sos_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(config)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
