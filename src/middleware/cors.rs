// CORS configuration

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Allow the configured origins; `*` (or an empty list) allows any origin.
pub fn apply_cors(router: Router, allowed_origins: &[String]) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(allow_origin(allowed_origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
