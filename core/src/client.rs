//! Client configuration and the request factory.
//!
//! # Design
//! A `Client` owns its options and one `ureq::Agent`, and is only read once
//! built, so any number of threads may create and send requests from the same
//! client without locking. Reconfiguring replaces the whole configuration.
//!
//! An unparseable base URL does not fail construction. It is kept as a sticky
//! error and handed to every request created from the client, which then
//! completes without touching the network.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use ureq::http::{HeaderMap, Method};

use crate::error::RequestError;
use crate::request::RequestBuilder;
use crate::resolve::BaseUrl;

/// Environment variable read by [`ClientOptions::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "REQIT_BASE_URL";
/// Environment variable read by [`ClientOptions::from_env`] for the timeout.
pub const TIMEOUT_ENV: &str = "REQIT_TIMEOUT_SECS";

/// Recognized client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Prefix for every request path. `http://` is assumed when no scheme is given.
    pub base_url: Option<String>,
    /// Headers merged into every outgoing request before request-level headers.
    pub headers: HeaderMap,
    /// Overall deadline for one request, from connect to the last body byte.
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    /// Read `REQIT_BASE_URL` and `REQIT_TIMEOUT_SECS`; unset variables keep defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty());
        let timeout = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    warn!("ignoring {TIMEOUT_ENV}={raw:?}: {e}");
                    None
                }
            });
        Self {
            base_url,
            headers: HeaderMap::new(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Shared HTTP client and factory for [`RequestBuilder`]s.
#[derive(Clone)]
pub struct Client {
    agent: ureq::Agent,
    options: ClientOptions,
    base_url: Option<BaseUrl>,
    error: Option<RequestError>,
}

fn new_agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

impl Client {
    /// A client with no base URL and no default headers.
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Self {
        let mut client = Self {
            agent: new_agent(None),
            options: ClientOptions::default(),
            base_url: None,
            error: None,
        };
        client.configure(options);
        client
    }

    /// Replace the whole configuration, including any sticky error.
    pub fn configure(&mut self, options: ClientOptions) {
        self.agent = new_agent(options.timeout);
        self.base_url = None;
        self.error = None;

        if let Some(raw) = options.base_url.as_deref().filter(|raw| !raw.is_empty()) {
            match BaseUrl::parse(raw) {
                Ok(base) => {
                    debug!("client base url set to {base}");
                    self.base_url = Some(base);
                }
                Err(err) => {
                    warn!("client configured with unusable base url: {err}");
                    self.error = Some(err);
                }
            }
        }
        self.options = options;
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// The configuration error every request from this client will report.
    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    pub(crate) fn agent(&self) -> &ureq::Agent {
        &self.agent
    }

    /// Start a request with any method. `query` is appended to the URL's query string.
    pub fn request(&self, method: Method, uri: &str, query: &[(&str, &str)]) -> RequestBuilder<'_> {
        RequestBuilder::new(self, method, uri, query)
    }

    pub fn get(&self, uri: &str, query: &[(&str, &str)]) -> RequestBuilder<'_> {
        self.request(Method::GET, uri, query)
    }

    /// A POST carries no body until [`RequestBuilder::with_body`] is called.
    pub fn post(&self, uri: &str, query: &[(&str, &str)]) -> RequestBuilder<'_> {
        self.request(Method::POST, uri, query)
    }

    pub fn put(&self, uri: &str, query: &[(&str, &str)]) -> RequestBuilder<'_> {
        self.request(Method::PUT, uri, query)
    }

    pub fn patch(&self, uri: &str, query: &[(&str, &str)]) -> RequestBuilder<'_> {
        self.request(Method::PATCH, uri, query)
    }

    pub fn delete(&self, uri: &str, query: &[(&str, &str)]) -> RequestBuilder<'_> {
        self.request(Method::DELETE, uri, query)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.options)
            .field("base_url", &self.base_url)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
