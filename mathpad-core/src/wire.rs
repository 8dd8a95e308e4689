use serde::{Deserialize, Serialize};

/// Body for `POST /calculate`. Operands travel as the raw display strings;
/// the service owns numeric parsing and validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculateRequest {
    pub num1: String,
    pub num2: String,
    pub operator: String,
}

/// Body for the rectangle endpoints (`/geometry/rectangle_area`,
/// `/geometry/rectangle_perimeter`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DimensionsRequest {
    pub length: String,
    pub width: String,
}

/// Body for the circle endpoints (`/geometry/circle_area`,
/// `/geometry/circle_circumference`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RadiusRequest {
    pub radius: String,
}

/// Body for the equation solvers (`/algebra/solve_linear`,
/// `/algebra/solve_quadratic`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoefficientsRequest {
    pub a: String,
    pub b: String,
    pub c: String,
}

/// Every endpoint answers either its success payload or `{"error": ...}`;
/// the body shape alone tells them apart, so the variants are untagged.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiResult<T> {
    Ok(T),
    Err(ServiceError),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ServiceError {
    pub error: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CalculationResult {
    pub result: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct AreaResult {
    pub area: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PerimeterResult {
    pub perimeter: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CircumferenceResult {
    pub circumference: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LinearSolution {
    pub x: f64,
}

/// Successful quadratic replies carry either a root list or a prose message
/// (degenerate or complex cases).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuadraticReply {
    Roots { roots: Vec<f64> },
    Message { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_request_serializes_with_wire_field_names() {
        let req = CalculateRequest {
            num1: "5".to_string(),
            num2: "3".to_string(),
            operator: "+".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"num1":"5","num2":"3","operator":"+"}"#
        );
    }

    #[test]
    fn calculation_result_parses_from_success_body() {
        let r: ApiResult<CalculationResult> = serde_json::from_str(r#"{"result": 8}"#).unwrap();
        assert_eq!(r, ApiResult::Ok(CalculationResult { result: 8.0 }));
    }

    #[test]
    fn error_body_parses_to_the_err_variant() {
        let r: ApiResult<CalculationResult> =
            serde_json::from_str(r#"{"error": "bad operator"}"#).unwrap();
        assert_eq!(
            r,
            ApiResult::Err(ServiceError {
                error: "bad operator".to_string()
            })
        );
    }

    #[test]
    fn geometry_payloads_parse() {
        let a: ApiResult<AreaResult> = serde_json::from_str(r#"{"area": 12.5}"#).unwrap();
        assert_eq!(a, ApiResult::Ok(AreaResult { area: 12.5 }));
        let p: ApiResult<PerimeterResult> = serde_json::from_str(r#"{"perimeter": 14}"#).unwrap();
        assert_eq!(p, ApiResult::Ok(PerimeterResult { perimeter: 14.0 }));
        let c: ApiResult<CircumferenceResult> =
            serde_json::from_str(r#"{"circumference": 31.41592653589793}"#).unwrap();
        assert_eq!(
            c,
            ApiResult::Ok(CircumferenceResult {
                circumference: 31.41592653589793
            })
        );
    }

    #[test]
    fn linear_solution_parses() {
        let r: ApiResult<LinearSolution> = serde_json::from_str(r#"{"x": -2.5}"#).unwrap();
        assert_eq!(r, ApiResult::Ok(LinearSolution { x: -2.5 }));
    }

    #[test]
    fn quadratic_reply_distinguishes_roots_from_message() {
        let two: ApiResult<QuadraticReply> =
            serde_json::from_str(r#"{"roots": [1.0, -3.0]}"#).unwrap();
        assert_eq!(
            two,
            ApiResult::Ok(QuadraticReply::Roots {
                roots: vec![1.0, -3.0]
            })
        );
        let msg: ApiResult<QuadraticReply> =
            serde_json::from_str(r#"{"message": "No real roots (discriminant is negative)."}"#)
                .unwrap();
        assert_eq!(
            msg,
            ApiResult::Ok(QuadraticReply::Message {
                message: "No real roots (discriminant is negative).".to_string()
            })
        );
        let err: ApiResult<QuadraticReply> =
            serde_json::from_str(r#"{"error": "Invalid input. Coefficients must be numeric."}"#)
                .unwrap();
        assert!(matches!(err, ApiResult::Err(_)));
    }
}
