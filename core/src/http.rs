//! Request execution over the client's `ureq` agent.
//!
//! # Design
//! The draft is turned into an `http::Request`, client default headers are
//! merged first and request-level headers second, and the response body is
//! read to the end before anything is returned. The response (and with it the
//! connection) is dropped on every exit path of [`execute`].
//!
//! Only POST, PUT and PATCH carry a body; without one attached they send an
//! empty, length-delimited body. Every other method (GET included) goes out
//! bodiless: query parameters travel in the URL, and a body attached with
//! `with_body` is dropped with a warning, together with the content type it
//! implied.

use log::{debug, warn};
use ureq::http::header::CONTENT_TYPE;
use ureq::http::{HeaderMap, Method, Request};
use ureq::{AsSendBody, SendBody};

use crate::codec::Payload;
use crate::error::RequestError;
use crate::headers::merge_headers;
use crate::request::Draft;

/// A response whose body has been read completely.
#[derive(Debug, Clone)]
pub(crate) struct Received {
    pub(crate) status: u16,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>,
}

pub(crate) fn execute(
    agent: &ureq::Agent,
    defaults: &HeaderMap,
    draft: Draft,
) -> Result<Received, RequestError> {
    let Draft {
        method,
        url,
        headers,
        body,
    } = draft;

    let mut wire_headers = HeaderMap::new();
    merge_headers(&mut wire_headers, defaults);
    merge_headers(&mut wire_headers, &headers);

    debug!("sending {method} {url}");
    let builder = Request::builder().method(method.clone()).uri(url.as_str());
    let mut response = if carries_body(&method) {
        match body {
            None => run(agent, builder, wire_headers, Vec::new())?,
            Some(Payload::Bytes(bytes)) => run(agent, builder, wire_headers, bytes)?,
            Some(Payload::Reader(mut reader)) => {
                run(agent, builder, wire_headers, SendBody::from_reader(&mut reader))?
            }
        }
    } else {
        if body.is_some() {
            warn!("{method} {url}: dropping request body, {method} is sent without one");
            wire_headers.remove(CONTENT_TYPE);
        }
        run(agent, builder, wire_headers, ())?
    };

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()
        .map_err(|e| RequestError::Body(e.to_string()))?;
    debug!("{method} {url}: HTTP {status}, {} bytes buffered", body.len());

    Ok(Received {
        status,
        headers,
        body,
    })
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn run(
    agent: &ureq::Agent,
    builder: ureq::http::request::Builder,
    headers: HeaderMap,
    body: impl AsSendBody,
) -> Result<ureq::http::Response<ureq::Body>, RequestError> {
    let mut request = builder
        .body(body)
        .map_err(|e| RequestError::Transport(e.to_string()))?;
    *request.headers_mut() = headers;
    agent
        .run(request)
        .map_err(|e| RequestError::Transport(e.to_string()))
}
