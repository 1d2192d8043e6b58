//! Fluent, blocking HTTP requests with shape-directed bodies and results.
//!
//! # Overview
//! A [`Client`] holds a base URL, default headers and a `ureq` agent. Requests
//! are composed with a chainable [`RequestBuilder`], sent once, and their
//! fully buffered body is decoded into whatever destination the caller hands
//! to [`Response::result`].
//!
//! ```no_run
//! use std::collections::HashMap;
//! use reqit::{Client, ClientOptions, Json};
//!
//! let client = Client::with_options(ClientOptions::default().with_base_url("localhost:3000"));
//!
//! let mut reply: HashMap<String, String> = HashMap::new();
//! let status = client
//!     .post("/echo", &[])
//!     .with_body(Json(serde_json::json!({ "message": "Hello, reqit!" })))
//!     .send()
//!     .result(&mut reply);
//! assert_eq!(status, Ok(200));
//! ```
//!
//! # Design
//! - Body encoding and result decoding dispatch on a closed set of [`Shape`]s,
//!   chosen by the [`Encodable`] and [`Destination`] implementations.
//! - The first error anywhere in the pipeline is kept; every later stage
//!   returns it unchanged and no stage panics.
//! - Header merging is a union: client defaults first, request headers second.

pub mod client;
pub mod codec;
pub mod decode;
pub mod error;
pub mod headers;
mod http;
pub mod request;
pub mod resolve;
pub mod response;
pub mod types;

pub use client::{Client, ClientOptions};
pub use codec::{Encodable, Encoded};
pub use decode::Destination;
pub use error::RequestError;
pub use headers::merge_headers;
pub use request::RequestBuilder;
pub use resolve::{resolve, BaseUrl};
pub use response::Response;
pub use types::{Json, Shape, Stream};
pub use ureq::http::{HeaderMap, HeaderName, HeaderValue, Method};
