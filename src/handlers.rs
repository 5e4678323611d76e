// =============================================================================
// HANDLERS MODULE
// =============================================================================
// HTTP request handlers:
// - health and metrics endpoints
// - doctor validation and cart summary APIs
// - HTML pages, each wrapped in the layout
// =============================================================================

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::layout::{render_layout, Fragment};
use crate::metrics;
use crate::models::*;
use crate::validation::validate_doctor;
use crate::AppState;

// =============================================================================
// HEALTH CHECK ENDPOINTS
// =============================================================================

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    metrics::record_http_request("GET", "/health", 200, 0.0);
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prometheus metrics endpoint
///
/// GET /metrics
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    let start = Instant::now();
    let body = state.metrics_handle.render();
    metrics::record_http_request("GET", "/metrics", 200, start.elapsed().as_secs_f64());
    body
}

// =============================================================================
// DOCTOR API
// =============================================================================

/// Validate a doctor record
///
/// POST /api/v1/doctors/validate
///
/// The body may be any JSON value; it is checked against the Doctor schema.
///
/// # Response
/// - 200 OK: the record, with undeclared fields removed
/// - 400 Bad Request: the body is not JSON
/// - 422 Unprocessable Entity: every violated constraint
///
/// ```json
/// {
///   "error": "VALIDATION_FAILED",
///   "message": "doctor record failed validation (1 issue(s))",
///   "issues": [
///     { "path": "gioiTinh", "expected": "one of \"Nam\", \"Nữ\", \"Khác\"", "received": "\"Other\"" }
///   ]
/// }
/// ```
pub async fn validate_doctor_handler(
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Doctor>> {
    let start = Instant::now();

    let Json(input) = payload.map_err(|rejection| {
        metrics::record_http_request("POST", "/api/v1/doctors/validate", 400, start.elapsed().as_secs_f64());
        AppError::BadRequest(rejection.body_text())
    })?;

    let result = validate_doctor(&input);
    let duration = start.elapsed().as_secs_f64();
    metrics::record_doctor_validation(result.is_ok());

    match result {
        Ok(doctor) => {
            metrics::record_http_request("POST", "/api/v1/doctors/validate", 200, duration);
            tracing::debug!(
                ma_nhan_vien = %doctor.ma_nhan_vien,
                gioi_tinh = doctor.gioi_tinh.map(|g| g.to_string()),
                "Doctor record valid"
            );
            Ok(Json(doctor))
        }
        Err(failure) => {
            metrics::record_http_request("POST", "/api/v1/doctors/validate", 422, duration);
            Err(AppError::from(failure))
        }
    }
}

// =============================================================================
// CART API
// =============================================================================

/// Summarise a cart
///
/// POST /api/v1/cart/summary
///
/// Echoes the cart with the totals derived from its items and whether the
/// stored totals agree. Inconsistent totals are reported, not corrected.
pub async fn cart_summary(
    payload: Result<Json<Cart>, JsonRejection>,
) -> AppResult<Json<CartSummaryResponse>> {
    let start = Instant::now();

    let Json(cart) = payload.map_err(|rejection| {
        metrics::record_http_request("POST", "/api/v1/cart/summary", 400, start.elapsed().as_secs_f64());
        AppError::BadRequest(rejection.body_text())
    })?;

    let summary = CartSummaryResponse::from(cart);
    if !summary.totals_consistent {
        tracing::info!(
            total_items = summary.cart.total_items,
            computed_total_items = summary.computed_total_items,
            total_price = summary.cart.total_price,
            computed_total_price = summary.computed_total_price,
            "Cart totals disagree with items"
        );
    }

    let duration = start.elapsed().as_secs_f64();
    metrics::record_http_request("POST", "/api/v1/cart/summary", 200, duration);

    Ok(Json(summary))
}

// =============================================================================
// PAGES
// =============================================================================
// The router picks the page; the page's fragment becomes the layout outlet.
// The header is the layout's static children on every page.

fn header(state: &AppState) -> Fragment {
    Fragment::new(format!(
        "<header><h1>{}</h1></header>",
        Fragment::text(&state.config.app_title)
    ))
}

/// Wrap the active route's output in the layout
pub fn render_page(state: &AppState, outlet: Option<Fragment>) -> Html<String> {
    let children = header(state);
    Html(render_layout(Some(&children), outlet.as_ref()).into_string())
}

/// Home page
///
/// GET /
pub async fn home_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let start = Instant::now();
    let outlet = Fragment::new(
        "<main>\
         <ul>\
         <li><code>POST /api/v1/doctors/validate</code></li>\
         <li><code>POST /api/v1/cart/summary</code></li>\
         </ul>\
         </main>",
    );
    let page = render_page(&state, Some(outlet));
    metrics::record_http_request("GET", "/", 200, start.elapsed().as_secs_f64());
    page
}

/// Fallback for unmatched paths: the layout with nothing in the outlet.
/// Counted under one `*` endpoint label so arbitrary paths don't become
/// metric labels.
pub async fn not_found_page(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    let start = Instant::now();
    let page = render_page(&state, None);
    metrics::record_http_request("GET", "*", 404, start.elapsed().as_secs_f64());
    (StatusCode::NOT_FOUND, page)
}
