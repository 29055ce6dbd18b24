use std::time::Duration;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// One instance exists per remote service (pass prediction, time API).
/// Redirects are not followed, so a 3xx reply surfaces as a status error
/// instead of silently hitting another host.
#[derive(Debug)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Upper bound for a whole request including reading the body.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
    /// Upper bound for establishing the connection.
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

    /// Constructs a new `HTTPClient` with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"https://api.n2yo.com/rest/v1/satellite"`).
    ///   A trailing slash is stripped.
    ///
    /// # Errors
    /// Returns the `reqwest::Error` if the TLS backend could not be initialized.
    pub(crate) fn new(base_url: &str) -> Result<HTTPClient, reqwest::Error> {
        Ok(HTTPClient {
            client: reqwest::Client::builder()
                .timeout(Self::REQUEST_TIMEOUT)
                .connect_timeout(Self::CONNECT_TIMEOUT)
                .redirect(reqwest::redirect::Policy::none())
                .user_agent(concat!("flyover-notifier/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: String::from(base_url.trim_end_matches('/')),
        })
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
}
