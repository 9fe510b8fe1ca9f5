//! Authentication extractors.
//!
//! - [`auth::AuthOperator`] -- claims from a valid JWT Bearer token.
//! - [`operator::RequireOperator`] -- a token whose operator still exists and
//!   is active; guards every back office route.

pub mod auth;
pub mod operator;
