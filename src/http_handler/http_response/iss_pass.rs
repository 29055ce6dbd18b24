use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use crate::pass_prediction::PassCandidate;

/// Response of the Open Notify `/iss-pass.json` endpoint.
#[derive(serde::Deserialize, Debug)]
pub struct IssPassResponse {
    message: String,
    reason: Option<String>,
    #[serde(default)]
    response: Vec<RiseRecord>,
}

impl SerdeJSONBodyHTTPResponseType for IssPassResponse {}

impl IssPassResponse {
    pub fn is_success(&self) -> bool { self.message == "success" }
    pub fn reason(&self) -> &str { self.reason.as_deref().unwrap_or(self.message.as_str()) }

    pub fn candidates(&self) -> Vec<PassCandidate> {
        self.response.iter().map(|r| PassCandidate::new(r.risetime, r.duration)).collect()
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct RiseRecord {
    risetime: i64,
    duration: i32,
}
