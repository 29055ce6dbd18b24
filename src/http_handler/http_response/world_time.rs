use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Response of the world time API. Only the epoch seconds are used.
#[derive(serde::Deserialize, Debug)]
pub struct WorldTimeResponse {
    unixtime: i64,
}

impl SerdeJSONBodyHTTPResponseType for WorldTimeResponse {}

impl WorldTimeResponse {
    pub fn unixtime(&self) -> i64 { self.unixtime }
}
