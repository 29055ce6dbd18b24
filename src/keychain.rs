use crate::clock::{SntpAuthority, TimeAuthority, WorldTimeAuthority};
use crate::config::{FlyoverConfig, TimeSourceKind};
use crate::http_handler::http_client::HTTPClient;
use crate::pass_prediction::{PassPredictor, PassPredictorClient};
use std::sync::Arc;

/// Holds the HTTP clients of the application and hands out the remote
/// collaborators of the state machine built on top of them.
#[derive(Clone)]
pub struct Keychain {
    /// Client bound to the pass prediction service.
    prediction_client: Arc<HTTPClient>,
    /// Client bound to the HTTP time service, only present when it is the time source.
    time_client: Option<Arc<HTTPClient>>,
    config: Arc<FlyoverConfig>,
}

impl Keychain {
    /// Creates the HTTP clients described by `config`.
    ///
    /// # Errors
    /// Fails if the TLS backend of a client cannot be initialized.
    pub fn new(config: FlyoverConfig) -> Result<Self, reqwest::Error> {
        let prediction_client = Arc::new(HTTPClient::new(config.prediction_url())?);
        let time_client = match config.time_source {
            TimeSourceKind::Http => Some(Arc::new(HTTPClient::new(&config.time_api_url)?)),
            TimeSourceKind::Sntp => None,
        };
        Ok(Self { prediction_client, time_client, config: Arc::new(config) })
    }

    pub fn config(&self) -> Arc<FlyoverConfig> { Arc::clone(&self.config) }

    /// Provides a predictor for the configured provider.
    pub fn predictor(&self) -> Box<dyn PassPredictor> {
        Box::new(PassPredictorClient::new(
            Arc::clone(&self.prediction_client),
            self.config.provider,
            self.config.norad_id,
            self.config.api_key.clone(),
        ))
    }

    /// Provides the configured time authority.
    pub fn time_authority(&self) -> Box<dyn TimeAuthority> {
        match &self.time_client {
            Some(client) => Box::new(WorldTimeAuthority::new(Arc::clone(client))),
            None => Box::new(SntpAuthority::new(&self.config.ntp_server)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &'static [(&'static str, &'static str)]) -> FlyoverConfig {
        FlyoverConfig::from_lookup(|name| {
            vars.iter().find(|(k, _)| *k == name).map(|(_, v)| (*v).to_string())
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_time_authority_follows_config() {
        let sntp = Keychain::new(config(&[
            ("FLYOVER_LATITUDE", "0"),
            ("FLYOVER_LONGITUDE", "0"),
            ("FLYOVER_PROVIDER", "open-notify"),
        ]))
        .unwrap();
        assert_eq!(sntp.time_authority().name(), "pool.ntp.org:123");
        assert_eq!(sntp.prediction_client.url(), "http://api.open-notify.org");

        let http = Keychain::new(config(&[
            ("FLYOVER_LATITUDE", "0"),
            ("FLYOVER_LONGITUDE", "0"),
            ("FLYOVER_API_KEY", "KEY"),
            ("FLYOVER_TIME_SOURCE", "http"),
            ("FLYOVER_TIME_API_URL", "http://localhost:8080/api/"),
        ]))
        .unwrap();
        assert_eq!(http.time_authority().name(), "http://localhost:8080/api");
    }
}
