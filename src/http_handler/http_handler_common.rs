use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::Display;

/// Failure of a single HTTP exchange, split by the side it happened on.
#[derive(Debug, Display)]
pub enum HTTPError {
    /// The request never produced a response (connect, DNS, TLS, timeout).
    HTTPRequestError(RequestError),
    /// A response arrived but was not usable.
    HTTPResponseError(ResponseError),
}

impl std::error::Error for HTTPError {}

impl From<RequestError> for HTTPError {
    fn from(value: RequestError) -> Self { HTTPError::HTTPRequestError(value) }
}

impl From<ResponseError> for HTTPError {
    fn from(value: ResponseError) -> Self { HTTPError::HTTPResponseError(value) }
}
