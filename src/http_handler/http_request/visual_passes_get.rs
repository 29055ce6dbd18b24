use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use super::visual_passes::VisualPassesResponse;
use crate::pass_prediction::ObserverLocation;

/// Request type for the N2YO `/visualpasses` endpoint.
#[derive(Debug)]
pub(crate) struct VisualPassesRequest {
    /// NORAD catalogue id of the tracked satellite.
    pub(crate) norad_id: u32,
    /// Where the observer stands.
    pub(crate) location: ObserverLocation,
    /// Prediction window in days, N2YO accepts at most 10.
    pub(crate) days: u8,
    /// Minimum number of seconds the satellite has to be optically visible.
    pub(crate) min_visibility: u32,
    pub(crate) api_key: String,
}

impl NoBodyHTTPRequestType for VisualPassesRequest {}

impl HTTPRequestType for VisualPassesRequest {
    /// Type of the expected response.
    type Response = VisualPassesResponse;
    /// Path parameters are positional: id, lat, lng, alt, days, visibility.
    fn endpoint(&self) -> String {
        format!(
            "/visualpasses/{}/{}/{}/{}/{}/{}/",
            self.norad_id,
            self.location.latitude(),
            self.location.longitude(),
            self.location.altitude(),
            self.days,
            self.min_visibility
        )
    }
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![("apiKey", self.api_key.clone())]
    }
}
