use super::iss_pass::IssPassResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use crate::pass_prediction::ObserverLocation;

/// Request type for the Open Notify `/iss-pass.json` endpoint.
#[derive(Debug)]
pub(crate) struct IssPassRequest {
    pub(crate) location: ObserverLocation,
    /// Number of passes to predict.
    pub(crate) passes: u8,
}

impl NoBodyHTTPRequestType for IssPassRequest {}

impl HTTPRequestType for IssPassRequest {
    /// Type of the expected response.
    type Response = IssPassResponse;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> String { String::from("/iss-pass.json") }
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.location.latitude().to_string()),
            ("lon", self.location.longitude().to_string()),
            ("alt", self.location.altitude().to_string()),
            ("n", self.passes.to_string()),
        ]
    }
}
