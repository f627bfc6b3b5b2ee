pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::notify::github::GithubDispatchNotifier;
use crate::notify::telegram::TelegramNotifier;
use crate::notify::NotifierSet;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    // Build the sink set; a sink with missing credentials is skipped.
    let mut notifiers = NotifierSet::new();

    match config.telegram {
        Some(tg) => {
            notifiers.register(Arc::new(TelegramNotifier::new(
                tg,
                config.telegram_api_base,
                config.sink_timeout,
            )));
            tracing::info!("Telegram sink configured");
        }
        None => tracing::info!("Telegram sink not configured, skipping"),
    }

    match config.github {
        Some(gh) => {
            notifiers.register(Arc::new(GithubDispatchNotifier::new(
                gh,
                config.github_api_base,
                config.sink_timeout,
            )));
            tracing::info!("GitHub dispatch sink configured");
        }
        None => tracing::info!("GitHub dispatch sink not configured, skipping"),
    }

    tracing::info!("{} notification sink(s) active", notifiers.len());

    let state: SharedState = Arc::new(AppState { notifiers });

    // The form is posted cross-origin from static landing pages, so the
    // permissive CORS headers go on every response path, errors included.
    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
