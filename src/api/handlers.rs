//! HTTP request handlers for the payroll API.
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
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_isr, calculate_payroll_run, calculate_thirteenth_month_by_period, isr_brackets,
};
use crate::error::EngineError;

use super::request::{PayrollRunRequest, ThirteenthMonthRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(payroll_handler))
        .route("/payroll/thirteenth-month", post(thirteenth_month_handler))
        .with_state(state)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Turns an engine error into its JSON error response.
fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /payroll/calculate.
///
/// Calculates the payroll of every employee in the request and returns the
/// complete payroll run with totals.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let parameters = request
        .parameters
        .unwrap_or_else(|| config.parameters_in_force(request.payroll_date));

    let start_time = Instant::now();
    match calculate_payroll_run(
        &request.employees,
        &parameters,
        request.payroll_date,
        &request.overrides,
        request.include_thirteenth,
        config.rules(),
    ) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                payroll_date = %run.payroll_date,
                employees = run.calculations.len(),
                net_total = %run.totals.net_salary_monthly,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculated successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(run),
            )
                .into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /payroll/thirteenth-month.
///
/// Calculates a single thirteenth-month installment for the window
/// containing the requested month.
async fn thirteenth_month_handler(
    State(state): State<AppState>,
    payload: Result<Json<ThirteenthMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing thirteenth month request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let parameters = request
        .parameters
        .unwrap_or_else(|| config.parameters_in_force(as_of));

    let result = isr_brackets(&parameters, as_of).and_then(|table| {
        calculate_thirteenth_month_by_period(
            request.total_income,
            request.month,
            config.rules(),
            |amount| calculate_isr(amount, &table),
        )
    });

    match result {
        Ok(bonus) => {
            info!(
                correlation_id = %correlation_id,
                period = ?bonus.period,
                gross_amount = %bonus.gross_amount,
                net_amount = %bonus.net_amount,
                "Thirteenth month calculated successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(bonus),
            )
                .into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}
