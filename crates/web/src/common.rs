use std::collections::HashMap;

use axum::{
    extract::{OriginalUri, Query, Request},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::MethodFilter,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use telemetry::RequestError;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

pub(crate) const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";
pub(crate) const APPLICATION_JSON: &str = "application/json";

pub(crate) const MESSAGE_INVALID_NUMBER: &str = "invalid number";
pub(crate) const MESSAGE_SERVER_ERROR: &str = "server error";

// - Request parameters -

/// Request parameters taken from the query string and, for form posts, from
/// the body. The query string wins if a name appears in both.
#[derive(Debug, Clone, Default)]
pub(crate) struct Parameters(HashMap<String, String>);

impl Parameters {
    pub fn merged(
        query: Option<Query<HashMap<String, String>>>,
        form: Option<Form<HashMap<String, String>>>,
    ) -> Self {
        let mut parameters = form.map(|Form(form)| form).unwrap_or_default();
        if let Some(Query(query)) = query {
            parameters.extend(query);
        }
        Self(parameters)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The parameter as an integer, `None` if it is missing or not an integer.
    pub fn integer(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(|value| value.trim().parse().ok())
    }

    /// Looks up all `names` and parses them as numbers. Fails with
    /// `missing_message` if any of them is absent, and with an invalid number
    /// error if any of them does not parse.
    pub fn numbers<const N: usize>(
        &self,
        names: [&str; N],
        missing_message: &str,
    ) -> RouteResult<[f64; N]> {
        let mut raw = [""; N];
        for (slot, name) in raw.iter_mut().zip(names) {
            *slot = self
                .get(name)
                .ok_or_else(|| RouteErrorResponse::bad_request(missing_message))?;
        }

        let mut numbers = [0.0; N];
        for (number, value) in numbers.iter_mut().zip(raw) {
            *number = parse_number(value)?;
        }
        Ok(numbers)
    }
}

pub(crate) fn parse_number(value: &str) -> RouteResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RouteErrorResponse::bad_request(MESSAGE_INVALID_NUMBER))
}

// - Commonly used responses -

/// Answer to a save request. A rejected value is reported with id 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub id: i64,
}

impl SaveResponse {
    pub fn saved(id: i64) -> Self {
        Self { success: true, id }
    }

    pub fn rejected() -> Self {
        Self::saved(0)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

/// Serializes `value` into a JSON response, turning a serialization failure
/// into a JSON server error instead of axum's plain text one.
pub(crate) fn json_response<T: Serialize>(value: &T) -> RouteResult<Response> {
    let body = serde_json::to_string(value).map_err(|why| {
        log::error!("could not serialize response: {}", why);
        RouteErrorResponse::server_error()
    })?;
    Ok(([(header::CONTENT_TYPE, APPLICATION_JSON)], body).into_response())
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    not_found_response(req.method(), original_uri.path())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    pub error: String,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            error: String::new(),
        }
        .with_default_message()
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST).with_message(message)
    }

    pub fn server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_message(MESSAGE_SERVER_ERROR)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error = message.into();
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("i dunno what happened here :/");
        self.with_message(message)
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::Rejected(why) => Self::bad_request(format!("{}", why)),
            RequestError::NotFound => Self::not_found(),
            RequestError::Database(why) => {
                log::error!("request failed: {}", why);
                Self::server_error()
            }
        }
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

pub(crate) fn not_found_response(method: &Method, uri: &str) -> impl IntoResponse {
    log::info!("no route for {} {}", method, uri);
    RouteErrorResponse::not_found()
}
