use super::{ObserverLocation, PassCandidate};
use crate::http_handler::{
    http_client::HTTPClient,
    http_handler_common::HTTPError,
    http_request::{
        iss_pass_get::IssPassRequest, request_common::NoBodyHTTPRequestType,
        visual_passes_get::VisualPassesRequest,
    },
    http_response::response_common::ResponseError,
};
use crate::{event, log};
use async_trait::async_trait;
use std::sync::Arc;
use strum_macros::Display;

/// Why a prediction lookup produced no candidate list.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    TransportFailure,
    /// Non-2xx status, redirects included.
    ServerError(u16),
    /// The body did not match the provider's schema.
    ParseFailure,
    /// The provider answered but reported an error of its own.
    Rejected(String),
}

impl std::error::Error for FetchError {}

impl From<HTTPError> for FetchError {
    fn from(value: HTTPError) -> Self {
        match value {
            HTTPError::HTTPRequestError(_)
            | HTTPError::HTTPResponseError(ResponseError::NoConnection | ResponseError::Unknown) => {
                FetchError::TransportFailure
            }
            HTTPError::HTTPResponseError(ResponseError::Status(code)) => FetchError::ServerError(code),
            HTTPError::HTTPResponseError(ResponseError::Decode) => FetchError::ParseFailure,
        }
    }
}

/// Source of predicted passes for an observer.
///
/// Implementations issue one request per call and return the candidates in
/// service order, including ones that already lie in the past. Retrying and
/// filtering are left to the caller.
#[async_trait]
pub trait PassPredictor: Send + Sync {
    async fn fetch_candidates(
        &self,
        location: ObserverLocation,
        lookahead_days: u8,
        min_visibility_seconds: u32,
    ) -> Result<Vec<PassCandidate>, FetchError>;
}

/// The prediction services this crate can talk to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PredictionProvider {
    /// `api.n2yo.com` visual passes, needs an API key.
    N2yo,
    /// `api.open-notify.org` ISS passes, keyless, ISS only.
    OpenNotify,
}

impl PredictionProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            PredictionProvider::N2yo => "https://api.n2yo.com/rest/v1/satellite",
            PredictionProvider::OpenNotify => "http://api.open-notify.org",
        }
    }
}

/// `PassPredictor` backed by one of the HTTP prediction services.
pub struct PassPredictorClient {
    client: Arc<HTTPClient>,
    provider: PredictionProvider,
    norad_id: u32,
    api_key: String,
}

impl PassPredictorClient {
    /// Open Notify has no lookahead window, only a pass count.
    const OPEN_NOTIFY_PASSES: u8 = 5;

    pub(crate) fn new(
        client: Arc<HTTPClient>,
        provider: PredictionProvider,
        norad_id: u32,
        api_key: String,
    ) -> Self {
        Self { client, provider, norad_id, api_key }
    }

    async fn fetch_n2yo(
        &self,
        location: ObserverLocation,
        days: u8,
        min_visibility: u32,
    ) -> Result<Vec<PassCandidate>, FetchError> {
        let req = VisualPassesRequest {
            norad_id: self.norad_id,
            location,
            days,
            min_visibility,
            api_key: self.api_key.clone(),
        };
        let resp = req.send_request(&self.client).await?;
        if let Some(err) = resp.error() {
            return Err(FetchError::Rejected(err.to_string()));
        }
        if let Some(info) = resp.info() {
            log!(
                "{} ({}): {} visible passes, {} API transactions in the last hour",
                info.sat_name(),
                info.sat_id(),
                info.pass_count(),
                info.transactions()
            );
        }
        for p in resp.passes() {
            event!(
                "Pass at {} for {}s: rises {}, peaks {:.0}° {}, sets {} at {}, magnitude {:.1}",
                p.start_utc(),
                p.duration(),
                p.start_compass(),
                p.max_elevation(),
                p.max_compass(),
                p.end_compass(),
                p.end_utc(),
                p.magnitude()
            );
        }
        Ok(resp.candidates())
    }

    async fn fetch_open_notify(
        &self,
        location: ObserverLocation,
    ) -> Result<Vec<PassCandidate>, FetchError> {
        let req = IssPassRequest { location, passes: Self::OPEN_NOTIFY_PASSES };
        let resp = req.send_request(&self.client).await?;
        if !resp.is_success() {
            return Err(FetchError::Rejected(resp.reason().to_string()));
        }
        Ok(resp.candidates())
    }
}

#[async_trait]
impl PassPredictor for PassPredictorClient {
    async fn fetch_candidates(
        &self,
        location: ObserverLocation,
        lookahead_days: u8,
        min_visibility_seconds: u32,
    ) -> Result<Vec<PassCandidate>, FetchError> {
        match self.provider {
            PredictionProvider::N2yo => {
                self.fetch_n2yo(location, lookahead_days, min_visibility_seconds).await
            }
            PredictionProvider::OpenNotify => self.fetch_open_notify(location).await,
        }
    }
}
