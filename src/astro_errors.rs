use thiserror::Error;

use crate::body::Body;

/// Errors raised at the boundaries of the crate.
///
/// The numeric kernels themselves are total: invalid numbers propagate as NaN instead of
/// failing. Errors only come from the ephemeris seam, from parsing, and from validation of
/// user-supplied parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    #[error("Body {0} is not covered by this ephemeris provider")]
    UnsupportedBody(Body),

    #[error("Unknown body name: {0}")]
    UnknownBody(String),

    #[error("Ephemeris snapshot taken at JD {snapshot} cannot answer a query at JD {requested}")]
    InstantMismatch { snapshot: f64, requested: f64 },

    #[error("Ephemeris data for {body} is missing {quantity}")]
    MissingQuantity { body: Body, quantity: &'static str },

    #[error("Ephemeris provider error: {0}")]
    Provider(String),

    #[error("Invalid observer location: {0}")]
    InvalidObserver(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Root finding failed: {0}")]
    RootFinding(String),
}
