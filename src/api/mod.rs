//! HTTP API module for the payroll engine.
//!
//! This module exposes the calculator as JSON endpoints so the
//! administration console can request payroll runs and thirteenth-month
//! installments.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollRunRequest, ThirteenthMonthRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
