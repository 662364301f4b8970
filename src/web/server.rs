use axum::{
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info};

use crate::cli::ServeArgs;
use crate::resolver::{ResolveError, SpeciesResolver};

/// Per-request deadline, covering both outbound lookups
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum requests in flight across all clients
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub resolver: SpeciesResolver,
}

/// Error body, shaped as `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Deserialize)]
struct SpeciesPath {
    species_url_name: String,
    #[serde(default)]
    subpath: String,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(user_message: &str, internal_error: Option<&str>) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error: {}", internal_msg);
    }

    ErrorResponse {
        detail: user_message.to_string(),
    }
}

impl ResolveError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingAccession => StatusCode::BAD_REQUEST,
            Self::AccessionNotFound { .. } | Self::GenomeNotFound => StatusCode::NOT_FOUND,
            Self::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Lookup(err) => {
                create_safe_error_response("Internal Server Error", Some(&err.to_string()))
            }
            other => create_safe_error_response(&other.to_string(), None),
        };
        (status, Json(body)).into_response()
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting is added in [`run`] since it keys on the peer address,
/// which only exists when serving over a socket.
pub fn create_router(resolver: SpeciesResolver) -> Router {
    let state = Arc::new(AppState { resolver });

    Router::new()
        .route("/", get(home_handler))
        .route("/{species_url_name}", get(species_handler))
        .route("/{species_url_name}/", get(species_handler))
        .route("/{species_url_name}/{*subpath}", get(species_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("strict-transport-security"),
                    HeaderValue::from_static("max-age=31536000; includeSubDomains"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let resolver = args.config.build_resolver()?;

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = create_router(resolver).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    info!(
        "Starting rapid-resolver at http://{addr}, redirecting to {}",
        args.config.ensembl_url
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Redirect the bare root to the genome browser
async fn home_handler(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(state.resolver.resolve_home())
}

/// Redirect a legacy species URL to its genome page
async fn species_handler(
    State(state): State<Arc<AppState>>,
    Path(path): Path<SpeciesPath>,
) -> Result<Redirect, ResolveError> {
    debug!(
        "Resolving species '{}' (subpath '{}')",
        path.species_url_name, path.subpath
    );

    let resolution = state
        .resolver
        .resolve_species(&path.species_url_name)
        .await?;
    Ok(Redirect::temporary(&resolution.url))
}
