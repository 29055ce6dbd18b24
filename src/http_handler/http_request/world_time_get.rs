use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use super::world_time::WorldTimeResponse;

/// Request type for the world time API, always asking for UTC.
#[derive(Debug)]
pub(crate) struct WorldTimeRequest {}

impl NoBodyHTTPRequestType for WorldTimeRequest {}

impl HTTPRequestType for WorldTimeRequest {
    type Response = WorldTimeResponse;
    fn endpoint(&self) -> String { String::from("/timezone/Etc/UTC") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
