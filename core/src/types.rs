//! Value shapes and the wrapper types that select them.
//!
//! # Design
//! Bodies and destinations are dispatched on a closed set of shapes instead of
//! inspecting values at runtime. A type opts into a shape by implementing
//! [`Encodable`](crate::codec::Encodable) or
//! [`Destination`](crate::decode::Destination); the wrappers below cover the
//! cases where a blanket implementation would be ambiguous (any serde record,
//! any reader).

/// The structural category a body or destination falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// UTF-8 text, sent or received without parsing.
    Text,
    /// Raw bytes passed through unchanged.
    Stream,
    /// A record, sequence or mapping carried as JSON.
    Json,
    /// Anything else. Encodes to no body and decodes to nothing.
    Unsupported,
}

/// Marks a serde value as a JSON body or JSON destination.
///
/// Works with borrowed values too: `Json(&record)` encodes the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Marks a reader as a raw body stream, sent as-is with no content type.
pub struct Stream<R>(pub R);

impl<R> std::fmt::Debug for Stream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Stream(..)")
    }
}
