//! Form logic for the geometry and algebra panels: required-field checks,
//! request construction, and rendering of replies into the result spans.

use crate::service_error_text;
use crate::wire::{ApiResult, CoefficientsRequest, DimensionsRequest, QuadraticReply, RadiusRequest};

/// Shown by the geometry panels when a request could not be sent.
pub const GEOMETRY_NETWORK_TEXT: &str = "Error: Network issue.";

/// Shown by the algebra panels when a request could not be sent.
pub const ALGEBRA_NETWORK_TEXT: &str = "Error: Network issue or server error.";

/// Build a rectangle request, requiring both fields.
pub fn rectangle_request(length: &str, width: &str) -> Result<DimensionsRequest, String> {
    if length.is_empty() || width.is_empty() {
        return Err("Error: Both length and width are required.".to_string());
    }
    Ok(DimensionsRequest {
        length: length.to_string(),
        width: width.to_string(),
    })
}

/// Build a circle request, requiring the radius field.
pub fn circle_request(radius: &str) -> Result<RadiusRequest, String> {
    if radius.is_empty() {
        return Err("Error: Radius is required.".to_string());
    }
    Ok(RadiusRequest {
        radius: radius.to_string(),
    })
}

/// Build an equation-solver request, requiring all three coefficients.
pub fn coefficients_request(a: &str, b: &str, c: &str) -> Result<CoefficientsRequest, String> {
    if a.is_empty() || b.is_empty() || c.is_empty() {
        return Err("Error: All fields (a, b, c) are required.".to_string());
    }
    Ok(CoefficientsRequest {
        a: a.to_string(),
        b: b.to_string(),
        c: c.to_string(),
    })
}

/// Result-span text for single-value replies: `Area = 12`, `x = -2.5`, ...
pub fn labeled_value(label: &str, value: f64) -> String {
    format!("{label} = {value}")
}

/// Quadratic replies resolved into an explicit shape instead of branching
/// on which optional field happens to be present.
#[derive(Clone, Debug, PartialEq)]
pub enum QuadraticOutcome {
    TwoRoots { x1: f64, x2: f64 },
    OneRoot { x: f64 },
    NoRealRoots { message: String },
    Error { message: String },
}

impl QuadraticOutcome {
    pub fn from_reply(reply: ApiResult<QuadraticReply>) -> QuadraticOutcome {
        match reply {
            ApiResult::Ok(QuadraticReply::Roots { roots }) => match roots.as_slice() {
                [x] => QuadraticOutcome::OneRoot { x: *x },
                [x1, x2, ..] => QuadraticOutcome::TwoRoots { x1: *x1, x2: *x2 },
                // An empty root list is out of contract.
                [] => QuadraticOutcome::Error {
                    message: String::new(),
                },
            },
            ApiResult::Ok(QuadraticReply::Message { message }) => {
                QuadraticOutcome::NoRealRoots { message }
            }
            ApiResult::Err(e) => QuadraticOutcome::Error { message: e.error },
        }
    }

    /// Text for the result span.
    pub fn text(&self) -> String {
        match self {
            QuadraticOutcome::TwoRoots { x1, x2 } => format!("x1 = {x1}, x2 = {x2}"),
            QuadraticOutcome::OneRoot { x } => format!("x = {x}"),
            QuadraticOutcome::NoRealRoots { message } => message.clone(),
            QuadraticOutcome::Error { message } => service_error_text(message),
        }
    }
}
