use super::flyover_clock::{ClockError, TimeAuthority};
use crate::http_handler::{
    http_client::HTTPClient,
    http_handler_common::HTTPError,
    http_request::{request_common::NoBodyHTTPRequestType, world_time_get::WorldTimeRequest},
    http_response::response_common::ResponseError,
};
use async_trait::async_trait;
use std::sync::Arc;

impl From<HTTPError> for ClockError {
    fn from(value: HTTPError) -> Self {
        match value {
            HTTPError::HTTPRequestError(_)
            | HTTPError::HTTPResponseError(ResponseError::NoConnection) => ClockError::NoResponse,
            HTTPError::HTTPResponseError(_) => ClockError::MalformedResponse,
        }
    }
}

/// Time authority backed by an HTTP world time API.
///
/// Less precise than SNTP (latency is not compensated) but usable where
/// outbound UDP is blocked.
pub struct WorldTimeAuthority {
    client: Arc<HTTPClient>,
}

impl WorldTimeAuthority {
    pub(crate) fn new(client: Arc<HTTPClient>) -> Self { Self { client } }
}

#[async_trait]
impl TimeAuthority for WorldTimeAuthority {
    fn name(&self) -> &str { self.client.url() }

    async fn query(&self) -> Result<i64, ClockError> {
        let resp = WorldTimeRequest {}.send_request(&self.client).await?;
        Ok(resp.unixtime())
    }
}
