//! HTTP API module for the payroll engine.
//!
//! This module exposes the gross-for-take-home solver and the monthly
//! payroll validation pass as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::GrossForTakeHomeRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
