//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{process_payroll, solve_with_stats};
use crate::models::MonthlyPayroll;

use super::request::GrossForTakeHomeRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/gross-for-take-home", post(gross_for_take_home_handler))
        .route("/payroll/validate", post(validate_payroll_handler))
        .with_state(state)
}

/// Handler for POST /gross-for-take-home.
///
/// Solves for the minimal whole gross salary giving the requested take-home
/// pay and returns its full deduction breakdown.
async fn gross_for_take_home_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossForTakeHomeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross-for-take-home request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let settings = request.solver_settings(config.solver());
    if let Err(err) = settings
        .validate()
        .and_then(|()| settings.check_take_home(request.take_home))
    {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Rejected solver request"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    let start_time = Instant::now();
    let solution = solve_with_stats(
        request.take_home,
        request.apply_tax,
        config.schedule(),
        &settings,
    );
    info!(
        correlation_id = %correlation_id,
        take_home = %request.take_home,
        apply_tax = request.apply_tax,
        gross_pay = %solution.result.gross_pay,
        iterations = solution.iterations,
        converged = solution.converged,
        duration_us = start_time.elapsed().as_micros(),
        "Gross-for-take-home solved"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(solution.result),
    )
        .into_response()
}

/// Handler for POST /payroll/validate.
///
/// Runs the validation pass over a monthly payroll and returns the priced
/// rows with the summary table, period totals and audit trace.
async fn validate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyPayroll>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll validation request");

    let payroll = match payload {
        Ok(Json(payroll)) => payroll,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match process_payroll(&payroll, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %result.calculation_id,
                rows = result.rows.len(),
                total_cost = %result.totals.total_cost,
                duration_us = result.audit_trace.duration_us,
                "Payroll validated successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll validation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
