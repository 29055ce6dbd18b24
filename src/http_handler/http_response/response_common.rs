use strum_macros::Display;

/// Response bodies that are read with `reqwest::Response::json`.
pub(crate) trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

/// Marker for response types that are their own serde representation.
pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response)?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    /// Lets only 2xx through. Redirects are not followed by the client and
    /// therefore land here as well.
    fn unwrap_return_code(response: reqwest::Response) -> Result<reqwest::Response, ResponseError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ResponseError::Status(response.status().as_u16()))
        }
    }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    /// Non-2xx status code.
    Status(u16),
    /// The body did not match the expected schema.
    Decode,
    /// The connection broke or timed out while reading the body.
    NoConnection,
    Unknown,
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ResponseError::Decode
        } else if let Some(status) = value.status() {
            ResponseError::Status(status.as_u16())
        } else if value.is_timeout() || value.is_connect() || value.is_body() {
            ResponseError::NoConnection
        } else {
            ResponseError::Unknown
        }
    }
}
