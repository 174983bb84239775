//! The HTTP endpoints and the mapping from pipeline results to responses.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reshi_assist::pipeline::{assist, calculate, Outcome};
use reshi_error::Error;
use reshi_parser::symbols::SymbolTable;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::warn;

/// Prefix of the error returned by `/api/calc`.
const CALC_ERROR: &str = "Не могу посчитать: ";

/// Prefix of the error returned by `/api/assist`.
const ASSIST_ERROR: &str = "Ошибка разбора/решения: ";

/// Reason reported when a computation does not finish in time.
const TIMEOUT_REASON: &str = "вычисление заняло слишком много времени";

static INDEX_HTML: &str = include_str!("../static/index.html");

/// State shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub symbols: Arc<SymbolTable>,

    /// How long a single computation may take.
    pub timeout: Duration,
}

/// The body of both API requests.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ExpressionRequest {
    #[serde(default)]
    pub expression: String,
}

impl ExpressionRequest {
    /// Reads the request body. A body that is not valid JSON, or lacks the `expression` field, is
    /// read as an empty expression.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CalcResponse {
    pub result: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AssistResponse {
    pub steps: Vec<String>,
    pub result: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// A response with a status code and a JSON body.
#[derive(Debug, PartialEq)]
pub enum ApiResponse<T> {
    Ok(T),
    BadRequest(ErrorResponse),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            Self::BadRequest(body) => (StatusCode::BAD_REQUEST, Json(body)).into_response(),
        }
    }
}

/// Maps the result of `/api/calc`.
pub fn calc_response(result: Result<String, String>) -> ApiResponse<CalcResponse> {
    match result {
        Ok(result) => ApiResponse::Ok(CalcResponse { result }),
        Err(reason) => ApiResponse::BadRequest(ErrorResponse {
            error: format!("{}{}", CALC_ERROR, reason),
        }),
    }
}

/// Maps the result of `/api/assist`.
pub fn assist_response(result: Result<Outcome, String>) -> ApiResponse<AssistResponse> {
    match result {
        Ok(Outcome { steps, result }) => ApiResponse::Ok(AssistResponse { steps, result }),
        Err(reason) => ApiResponse::BadRequest(ErrorResponse {
            error: format!("{}{}", ASSIST_ERROR, reason),
        }),
    }
}

/// Runs the computation on the blocking thread pool, giving up after the configured timeout.
///
/// The error is the one-line reason of the failure.
async fn compute<T, F>(state: &AppState, f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce(&SymbolTable) -> Result<T, Error> + Send + 'static,
{
    let symbols = Arc::clone(&state.symbols);
    let task = tokio::task::spawn_blocking(move || {
        f(symbols.as_ref()).map_err(|err| err.to_string())
    });

    match tokio::time::timeout(state.timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => Err(err.to_string()),
        Err(_) => {
            warn!(timeout_ms = state.timeout.as_millis() as u64, "computation timed out");
            Err(TIMEOUT_REASON.to_string())
        },
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn api_calc(State(state): State<AppState>, body: Bytes) -> ApiResponse<CalcResponse> {
    let ExpressionRequest { expression } = ExpressionRequest::from_body(&body);
    let result = compute(&state, {
        let expression = expression.clone();
        move |symbols| calculate(&expression, symbols)
    }).await;

    if let Err(reason) = &result {
        warn!(%expression, %reason, "calculation failed");
    }
    calc_response(result)
}

async fn api_assist(State(state): State<AppState>, body: Bytes) -> ApiResponse<AssistResponse> {
    let ExpressionRequest { expression } = ExpressionRequest::from_body(&body);
    let result = compute(&state, {
        let expression = expression.clone();
        move |symbols| assist(&expression, symbols)
    }).await;

    if let Err(reason) = &result {
        warn!(%expression, %reason, "assist failed");
    }
    assist_response(result)
}

/// Builds the router serving the landing page and both API endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/calc", post(api_calc))
        .route("/api/assist", post(api_assist))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn state() -> AppState {
        AppState {
            symbols: Arc::new(SymbolTable::standard()),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn lenient_body() {
        assert_eq!(
            ExpressionRequest::from_body(br#"{"expression": "2+2"}"#).expression,
            "2+2",
        );
        assert_eq!(ExpressionRequest::from_body(b"not json"), ExpressionRequest::default());
        assert_eq!(ExpressionRequest::from_body(br#"{"other": 1}"#), ExpressionRequest::default());
        assert_eq!(ExpressionRequest::from_body(br#"{"expression": 5}"#), ExpressionRequest::default());
        assert_eq!(ExpressionRequest::from_body(b""), ExpressionRequest::default());
    }

    #[test]
    fn calc_success() {
        let symbols = SymbolTable::standard();
        let result = calculate("2+2", &symbols).map_err(|err| err.to_string());
        assert_eq!(calc_response(result), ApiResponse::Ok(CalcResponse {
            result: "4".to_string(),
        }));
    }

    #[test]
    fn calc_failure_is_prefixed() {
        let symbols = SymbolTable::standard();
        let result = calculate("y", &symbols).map_err(|err| err.to_string());
        assert_eq!(calc_response(result), ApiResponse::BadRequest(ErrorResponse {
            error: "Не могу посчитать: unknown symbol `y`".to_string(),
        }));
    }

    #[test]
    fn assist_failure_is_prefixed() {
        let symbols = SymbolTable::standard();
        let result = assist("y = 2", &symbols).map_err(|err| err.to_string());
        assert_eq!(assist_response(result), ApiResponse::BadRequest(ErrorResponse {
            error: "Ошибка разбора/решения: unknown symbol `y`".to_string(),
        }));
    }

    #[test]
    fn assist_success_keeps_steps() {
        let symbols = SymbolTable::standard();
        let result = assist("20 процентов от 150", &symbols).map_err(|err| err.to_string());
        let ApiResponse::Ok(body) = assist_response(result) else {
            panic!("expected a successful response");
        };
        assert_eq!(body.result, "30");
        assert_eq!(body.steps.len(), 3);
    }

    #[test]
    fn empty_expression_is_an_error() {
        let symbols = SymbolTable::standard();
        let request = ExpressionRequest::from_body(b"{}");
        let result = calculate(&request.expression, &symbols).map_err(|err| err.to_string());
        assert!(matches!(calc_response(result), ApiResponse::BadRequest(_)));
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorResponse { error: "x".to_string() }).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "x" }));

        let body = serde_json::to_value(AssistResponse {
            steps: vec!["a".to_string()],
            result: "b".to_string(),
        }).unwrap();
        assert_eq!(body, serde_json::json!({ "steps": ["a"], "result": "b" }));
    }

    #[tokio::test]
    async fn compute_runs_on_blocking_pool() {
        let result = compute(&state(), |symbols| calculate("sin(pi/6)", symbols)).await;
        assert_eq!(result, Ok("0.5".to_string()));
    }

    #[tokio::test]
    async fn compute_times_out() {
        let state = AppState { timeout: Duration::from_millis(10), ..state() };
        let result = compute(&state, |_| {
            std::thread::sleep(Duration::from_millis(200));
            Ok(())
        }).await;
        assert_eq!(result, Err(TIMEOUT_REASON.to_string()));
    }
}
