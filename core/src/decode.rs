//! Destinations a buffered response body can be decoded into.
//!
//! Text destinations receive the body verbatim, JSON-shaped destinations are
//! parsed with `serde_json`, and `()` swallows the body without complaint.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::de::DeserializeOwned;

use crate::types::{Json, Shape};

/// A value a response body can be written into.
pub trait Destination {
    fn shape(&self) -> Shape;

    /// Replace the destination's contents with the decoded body.
    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error>;
}

impl Destination for String {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        *self = String::from_utf8_lossy(body).into_owned();
        Ok(())
    }
}

impl Destination for serde_json::Value {
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(body)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> Destination for Json<T> {
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        self.0 = serde_json::from_slice(body)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> Destination for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(body)?;
        Ok(())
    }
}

impl<K, V> Destination for HashMap<K, V>
where
    K: DeserializeOwned + Eq + Hash,
    V: DeserializeOwned,
{
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(body)?;
        Ok(())
    }
}

impl<K, V> Destination for BTreeMap<K, V>
where
    K: DeserializeOwned + Ord,
    V: DeserializeOwned,
{
    fn shape(&self) -> Shape {
        Shape::Json
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(body)?;
        Ok(())
    }
}

impl<D: Destination> Destination for Option<D> {
    fn shape(&self) -> Shape {
        self.as_ref().map_or(Shape::Unsupported, Destination::shape)
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), serde_json::Error> {
        match self {
            Some(inner) => inner.decode(body),
            None => Ok(()),
        }
    }
}

impl Destination for () {
    fn shape(&self) -> Shape {
        Shape::Unsupported
    }

    fn decode(&mut self, _body: &[u8]) -> Result<(), serde_json::Error> {
        Ok(())
    }
}
