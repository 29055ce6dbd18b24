use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use crate::pass_prediction::PassCandidate;

/// Response of the N2YO `/visualpasses` endpoint.
///
/// N2YO omits `passes` when nothing is visible in the window and answers
/// with `{"error": "..."}` and status 200 for rejected requests.
#[derive(serde::Deserialize, Debug)]
pub struct VisualPassesResponse {
    info: Option<PassInfo>,
    #[serde(default)]
    passes: Vec<VisualPass>,
    error: Option<String>,
}

impl SerdeJSONBodyHTTPResponseType for VisualPassesResponse {}

impl VisualPassesResponse {
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
    pub fn info(&self) -> Option<&PassInfo> { self.info.as_ref() }
    pub fn passes(&self) -> &[VisualPass] { &self.passes }

    /// Normalized candidates in service order.
    pub fn candidates(&self) -> Vec<PassCandidate> {
        self.passes.iter().map(VisualPass::candidate).collect()
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct PassInfo {
    satid: u32,
    satname: String,
    transactionscount: u32,
    #[serde(default)]
    passescount: u32,
}

impl PassInfo {
    pub fn sat_id(&self) -> u32 { self.satid }
    pub fn sat_name(&self) -> &str { &self.satname }
    pub fn transactions(&self) -> u32 { self.transactionscount }
    pub fn pass_count(&self) -> u32 { self.passescount }
}

#[derive(serde::Deserialize, Debug)]
pub struct VisualPass {
    #[serde(rename = "startAzCompass", default)]
    start_az_compass: String,
    #[serde(rename = "startUTC")]
    start_utc: i64,
    #[serde(rename = "maxEl", default)]
    max_el: f64,
    #[serde(rename = "maxAzCompass", default)]
    max_az_compass: String,
    #[serde(rename = "endAzCompass", default)]
    end_az_compass: String,
    #[serde(rename = "endUTC", default)]
    end_utc: i64,
    #[serde(default)]
    mag: f64,
    duration: i32,
}

impl VisualPass {
    pub fn start_utc(&self) -> i64 { self.start_utc }
    pub fn end_utc(&self) -> i64 { self.end_utc }
    pub fn duration(&self) -> i32 { self.duration }
    pub fn max_elevation(&self) -> f64 { self.max_el }
    pub fn magnitude(&self) -> f64 { self.mag }
    pub fn start_compass(&self) -> &str { &self.start_az_compass }
    pub fn max_compass(&self) -> &str { &self.max_az_compass }
    pub fn end_compass(&self) -> &str { &self.end_az_compass }

    pub fn candidate(&self) -> PassCandidate { PassCandidate::new(self.start_utc, self.duration) }
}
