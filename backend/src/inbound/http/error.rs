//! Maps lookup failures onto HTTP responses.
//!
//! Every failure renders the shared JSON envelope with `Cache-Control:
//! no-store`, so clients and proxies never retain a 400, 404 or 500 answer.
//! Internal faults are replaced by a fixed message before serialisation;
//! upstream failures already carry a generic per-endpoint message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::cache_control::no_store_header;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias returned by the landmark, search and route handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Payload sent to the client, hiding internal details and messages.
fn client_payload(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let payload = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => payload.with_trace_id(id.to_owned()),
        None => payload,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UpstreamError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        response.insert_header(no_store_header());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(client_payload(self))
    }
}
