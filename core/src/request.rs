//! The chainable request builder.
//!
//! # Design
//! A builder carries `Result<Draft, RequestError>`. Each configuration call
//! maps over the `Ok` side, so the first failure (from the client, URL
//! resolution, header parsing or body encoding) is kept and every later call
//! is a no-op. `send` consumes the builder: once a request is on the wire it
//! can no longer be configured.

use std::collections::HashMap;

use ureq::http::header::CONTENT_TYPE;
use ureq::http::{HeaderMap, HeaderValue, Method};
use url::Url;

use log::{trace, warn};

use crate::client::Client;
use crate::codec::{Encodable, Payload};
use crate::error::RequestError;
use crate::headers::{header_map_from, merge_headers};
use crate::resolve::resolve;
use crate::response::Response;

/// Everything known about a request that has not been sent yet.
pub(crate) struct Draft {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Payload>,
}

/// A request being configured. Obtained from [`Client::get`], [`Client::post`]
/// or [`Client::request`].
#[must_use = "a request does nothing until `send` is called"]
pub struct RequestBuilder<'c> {
    client: &'c Client,
    state: Result<Draft, RequestError>,
}

fn append_query(url: &mut Url, query: &[(&str, &str)]) {
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
}

impl<'c> RequestBuilder<'c> {
    pub(crate) fn new(client: &'c Client, method: Method, uri: &str, query: &[(&str, &str)]) -> Self {
        let state = match client.error() {
            Some(err) => Err(err.clone()),
            None => resolve(client.base_url(), uri).map(|mut url| {
                append_query(&mut url, query);
                Draft {
                    method,
                    url,
                    headers: HeaderMap::new(),
                    body: None,
                }
            }),
        };
        Self { client, state }
    }

    /// Encode `body` and attach it, setting the content type its shape implies.
    ///
    /// Unsupported shapes (`()`) attach nothing and are not an error.
    pub fn with_body<B: Encodable>(mut self, body: B) -> Self {
        self.state = self.state.and_then(|mut draft| {
            let shape = body.shape();
            let encoded = body.encode()?;
            trace!("{} {}: body shape {shape:?} -> {encoded:?}", draft.method, draft.url);
            if let Some(content_type) = encoded.content_type {
                draft
                    .headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            if encoded.payload.is_some() {
                draft.body = encoded.payload;
            }
            Ok(draft)
        });
        self
    }

    /// Union `headers` into the request-level headers.
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        if let Ok(draft) = &mut self.state {
            merge_headers(&mut draft.headers, headers);
        }
        self
    }

    /// Union headers given as plain strings into the request-level headers.
    pub fn headers_from_map(mut self, headers: &HashMap<String, String>) -> Self {
        self.state = self.state.and_then(|mut draft| {
            let parsed = header_map_from(headers)?;
            merge_headers(&mut draft.headers, &parsed);
            Ok(draft)
        });
        self
    }

    /// The pending error, if any stage has failed so far.
    pub fn error(&self) -> Option<&RequestError> {
        self.state.as_ref().err()
    }

    /// The absolute URL the request will be sent to.
    pub fn url(&self) -> Option<&Url> {
        self.state.as_ref().ok().map(|draft| &draft.url)
    }

    pub fn method(&self) -> Option<&Method> {
        self.state.as_ref().ok().map(|draft| &draft.method)
    }

    /// Request-level headers, before the client defaults are merged in.
    pub fn request_headers(&self) -> Option<&HeaderMap> {
        self.state.as_ref().ok().map(|draft| &draft.headers)
    }

    /// Execute the request and buffer the whole response.
    ///
    /// A pending error skips the network entirely and is returned unchanged
    /// by the resulting [`Response`].
    pub fn send(self) -> Response {
        match self.state {
            Ok(draft) => {
                let client = self.client;
                Response::from_outcome(crate::http::execute(
                    client.agent(),
                    &client.options().headers,
                    draft,
                ))
            }
            Err(err) => {
                warn!("request not sent: {err}");
                Response::failed(err)
            }
        }
    }
}

impl std::fmt::Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("RequestBuilder");
        match &self.state {
            Ok(draft) => s
                .field("method", &draft.method)
                .field("url", &draft.url.as_str())
                .field("headers", &draft.headers)
                .field("has_body", &draft.body.is_some()),
            Err(err) => s.field("error", err),
        };
        s.finish()
    }
}
