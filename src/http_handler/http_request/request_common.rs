use crate::http_handler::{
    http_client::HTTPClient, http_handler_common::HTTPError,
    http_response::response_common::HTTPResponseType,
};
use strum_macros::Display;

/// HTTP methods used by the request types of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HTTPRequestMethod {
    Get,
}

/// Describes one endpoint: where it lives, how it is called and what it returns.
pub(crate) trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// Path relative to the client's base URL, including path parameters.
    fn endpoint(&self) -> String;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod;
    fn header_params(&self) -> reqwest::header::HeaderMap { reqwest::header::HeaderMap::new() }
    fn query_params(&self) -> Vec<(&'static str, String)> { Vec::new() }

    /// Assembles the `reqwest::RequestBuilder` for this request on `client`.
    fn get_request_base(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
        };
        builder.headers(self.header_params()).query(&self.query_params())
    }
}

/// Request types without a body. Sends exactly one request, never retries.
pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response = self.get_request_base(client).send().await.map_err(RequestError::from)?;
        Ok(Self::Response::read_response(response).await?)
    }
}

#[derive(Debug, Display)]
pub enum RequestError {
    /// Connecting failed (refused, DNS, TLS handshake).
    Connect,
    /// The bounded request timeout elapsed.
    Timeout,
    /// The request could not be built (invalid URL or header).
    Builder,
    Unknown,
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            RequestError::Timeout
        } else if value.is_connect() {
            RequestError::Connect
        } else if value.is_builder() {
            RequestError::Builder
        } else {
            RequestError::Unknown
        }
    }
}
