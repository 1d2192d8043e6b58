//! Request body encoding.
//!
//! | Shape         | Bytes on the wire            | Content-Type       |
//! |---------------|------------------------------|--------------------|
//! | `Stream`      | passed through               | none               |
//! | `Text`        | UTF-8 bytes (empty for None) | `text/plain`       |
//! | `Json`        | `serde_json` output          | `application/json` |
//! | `Unsupported` | no body, not an error        | none               |

use std::io::Read;

use serde::Serialize;

use crate::error::RequestError;
use crate::types::{Json, Shape, Stream};

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";

/// Bytes waiting to be written as a request body.
pub(crate) enum Payload {
    Bytes(Vec<u8>),
    Reader(Box<dyn Read + Send>),
}

/// The outcome of encoding a body value.
pub struct Encoded {
    pub(crate) payload: Option<Payload>,
    pub(crate) content_type: Option<&'static str>,
}

impl Encoded {
    fn none() -> Self {
        Self {
            payload: None,
            content_type: None,
        }
    }

    fn bytes(bytes: Vec<u8>, content_type: Option<&'static str>) -> Self {
        Self {
            payload: Some(Payload::Bytes(bytes)),
            content_type,
        }
    }

    fn text(text: &str) -> Self {
        Self::bytes(text.as_bytes().to_vec(), Some(TEXT_PLAIN))
    }

    /// Content type implied by the body shape, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    pub fn has_body(&self) -> bool {
        self.payload.is_some()
    }

    /// The encoded bytes, unless the body is absent or a pass-through stream.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Some(Payload::Bytes(bytes)) => Some(bytes),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Encoded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let payload = match &self.payload {
            None => "none".to_string(),
            Some(Payload::Bytes(b)) => format!("{} bytes", b.len()),
            Some(Payload::Reader(_)) => "stream".to_string(),
        };
        f.debug_struct("Encoded")
            .field("payload", &payload)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// A value that can be attached to a request as its body.
pub trait Encodable {
    fn shape(&self) -> Shape;

    fn encode(self) -> Result<Encoded, RequestError>;
}

impl Encodable for String {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::bytes(self.into_bytes(), Some(TEXT_PLAIN)))
    }
}

impl Encodable for &str {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::text(self))
    }
}

impl Encodable for &String {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::text(self))
    }
}

impl Encodable for Option<String> {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::text(self.as_deref().unwrap_or_default()))
    }
}

impl Encodable for Option<&str> {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::text(self.unwrap_or_default()))
    }
}

impl Encodable for Option<&String> {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::text(self.map(String::as_str).unwrap_or_default()))
    }
}

impl Encodable for &Option<String> {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::text(self.as_deref().unwrap_or_default()))
    }
}

impl Encodable for Vec<u8> {
    fn shape(&self) -> Shape {
        Shape::Stream
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::bytes(self, None))
    }
}

impl Encodable for &[u8] {
    fn shape(&self) -> Shape {
        Shape::Stream
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::bytes(self.to_vec(), None))
    }
}

impl Encodable for &Vec<u8> {
    fn shape(&self) -> Shape {
        Shape::Stream
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::bytes(self.clone(), None))
    }
}

impl<R: Read + Send + 'static> Encodable for Stream<R> {
    fn shape(&self) -> Shape {
        Shape::Stream
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded {
            payload: Some(Payload::Reader(Box::new(self.0))),
            content_type: None,
        })
    }
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Encoded, RequestError> {
    let body = serde_json::to_vec(value).map_err(|e| RequestError::Encoding(e.to_string()))?;
    Ok(Encoded::bytes(body, Some(APPLICATION_JSON)))
}

impl<T: Serialize> Encodable for Json<T> {
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        encode_json(&self.0)
    }
}

impl Encodable for serde_json::Value {
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        encode_json(&self)
    }
}

impl Encodable for &serde_json::Value {
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        encode_json(self)
    }
}

impl Encodable for () {
    fn shape(&self) -> Shape {
        Shape::Unsupported
    }

    fn encode(self) -> Result<Encoded, RequestError> {
        Ok(Encoded::none())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Cursor;

    use serde::{Deserialize, Serializer};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Message {
        message: String,
        count: u32,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn text_encodes_to_utf8_with_text_plain() {
        let encoded = "Grüße, reqit!".encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some("Grüße, reqit!".as_bytes()));
        assert_eq!(encoded.content_type(), Some(TEXT_PLAIN));

        let owned = String::from("owned").encode().unwrap();
        assert_eq!(owned.as_bytes(), Some(&b"owned"[..]));
        assert_eq!(owned.content_type(), Some(TEXT_PLAIN));
    }

    #[test]
    fn optional_text_uses_the_referenced_value() {
        let encoded = Some("present").encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&b"present"[..]));
        assert_eq!(encoded.content_type(), Some(TEXT_PLAIN));
    }

    #[test]
    fn absent_text_encodes_as_empty_body() {
        let encoded = None::<String>.encode().unwrap();
        assert!(encoded.has_body());
        assert_eq!(encoded.as_bytes(), Some(&b""[..]));
        assert_eq!(encoded.content_type(), Some(TEXT_PLAIN));
    }

    #[test]
    fn borrowed_text_and_bytes_encode_like_owned_ones() {
        let owned = Some("kept".to_string());
        let encoded = (&owned).encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&b"kept"[..]));
        assert_eq!(encoded.content_type(), Some(TEXT_PLAIN));

        let encoded = owned.as_ref().encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&b"kept"[..]));
        assert_eq!(encoded.content_type(), Some(TEXT_PLAIN));

        let absent: Option<String> = None;
        assert_eq!((&absent).encode().unwrap().as_bytes(), Some(&b""[..]));
        assert_eq!(None::<&String>.encode().unwrap().as_bytes(), Some(&b""[..]));

        let bytes = vec![7u8, 8, 9];
        let encoded = (&bytes).encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&bytes[..]));
        assert_eq!(encoded.content_type(), None);
        assert_eq!((&bytes).shape(), Shape::Stream);
    }

    #[test]
    fn records_encode_as_json() {
        let value = Message {
            message: "Hello, reqit!".to_string(),
            count: 3,
        };
        let encoded = Json(&value).encode().unwrap();
        assert_eq!(encoded.content_type(), Some(APPLICATION_JSON));
        let back: Message = serde_json::from_slice(encoded.as_bytes().unwrap()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn sequences_and_mappings_encode_as_json() {
        let list = vec!["a", "b"];
        let encoded = Json(&list).encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&br#"["a","b"]"#[..]));

        let mut map = BTreeMap::new();
        map.insert("k", 1);
        let encoded = Json(map).encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&br#"{"k":1}"#[..]));
        assert_eq!(encoded.content_type(), Some(APPLICATION_JSON));

        let value = serde_json::json!({"nested": {"ok": true}});
        let encoded = (&value).encode().unwrap();
        let back: serde_json::Value = serde_json::from_slice(encoded.as_bytes().unwrap()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn raw_bytes_pass_through_without_content_type() {
        let encoded = vec![0u8, 159, 146, 150].encode().unwrap();
        assert_eq!(encoded.as_bytes(), Some(&[0u8, 159, 146, 150][..]));
        assert_eq!(encoded.content_type(), None);
    }

    #[test]
    fn streams_are_kept_as_readers() {
        let encoded = Stream(Cursor::new(b"streamed".to_vec())).encode().unwrap();
        assert!(encoded.has_body());
        assert_eq!(encoded.as_bytes(), None);
        assert_eq!(encoded.content_type(), None);
    }

    #[test]
    fn unsupported_shape_attaches_nothing() {
        assert_eq!(().shape(), Shape::Unsupported);
        let encoded = ().encode().unwrap();
        assert!(!encoded.has_body());
        assert_eq!(encoded.content_type(), None);
    }

    #[test]
    fn serialization_failure_is_an_encoding_error() {
        let err = Json(Unserializable).encode().unwrap_err();
        assert!(matches!(err, RequestError::Encoding(ref m) if m.contains("refusing")));
    }

    #[test]
    fn shapes_are_reported_without_encoding() {
        assert_eq!("x".shape(), Shape::Text);
        assert_eq!(None::<&str>.shape(), Shape::Text);
        assert_eq!(Vec::<u8>::new().shape(), Shape::Stream);
        assert_eq!(Json(1).shape(), Shape::Json);
        assert_eq!(serde_json::Value::Null.shape(), Shape::Json);
    }
}
