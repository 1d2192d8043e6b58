//! Buffered responses and result decoding.

use log::trace;
use ureq::http::HeaderMap;

use crate::decode::Destination;
use crate::error::RequestError;
use crate::http::Received;
use crate::types::Shape;

/// The outcome of [`RequestBuilder::send`](crate::RequestBuilder::send).
///
/// Holds either the fully buffered response or the error that ended the
/// pipeline. A failed decode becomes the response's error from then on.
#[derive(Debug, Clone)]
pub struct Response {
    outcome: Result<Received, RequestError>,
}

impl Response {
    pub(crate) fn from_outcome(outcome: Result<Received, RequestError>) -> Self {
        Self { outcome }
    }

    pub(crate) fn failed(err: RequestError) -> Self {
        Self { outcome: Err(err) }
    }

    /// Decode the body into `dest` and return the status code.
    ///
    /// Text destinations get the body verbatim, JSON-shaped ones are parsed,
    /// and unsupported ones are left untouched. A stored error is returned
    /// without looking at `dest`; a parse failure is stored and returned with
    /// the status code attached.
    pub fn result<D: Destination>(&mut self, dest: &mut D) -> Result<u16, RequestError> {
        let received = match &self.outcome {
            Ok(received) => received,
            Err(err) => return Err(err.clone()),
        };

        let status = received.status;
        let shape = dest.shape();
        trace!("decoding {} byte body into {shape:?} destination", received.body.len());
        let decoded = match shape {
            Shape::Unsupported => Ok(()),
            Shape::Text | Shape::Json | Shape::Stream => dest.decode(&received.body),
        };

        match decoded {
            Ok(()) => Ok(status),
            Err(e) => {
                let err = RequestError::Decoding {
                    status,
                    message: e.to_string(),
                };
                self.outcome = Err(err.clone());
                Err(err)
            }
        }
    }

    /// The error that ended the pipeline, if any. Stable across calls.
    pub fn error(&self) -> Option<&RequestError> {
        self.outcome.as_ref().err()
    }

    /// Status code of the response, also after a failed decode.
    pub fn status(&self) -> Option<u16> {
        match &self.outcome {
            Ok(received) => Some(received.status),
            Err(err) => err.status(),
        }
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        self.outcome.as_ref().ok().map(|received| &received.headers)
    }

    /// The raw buffered body.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.outcome.as_ref().ok().map(|received| received.body.as_slice())
    }

    /// The buffered body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Option<String> {
        self.bytes().map(|body| String::from_utf8_lossy(body).into_owned())
    }
}
