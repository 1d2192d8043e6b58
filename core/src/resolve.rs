//! Request URL resolution.
//!
//! A base URL is joined to a request path by plain string concatenation: no
//! separator is inserted or removed, so `"/x"` and `"x"` give different URLs.
//! Without a base URL, anything lacking an `http://` or `https://` prefix is
//! treated as an `http://` URL.
//!
//! The joined string is then parsed as a WHATWG URL, so what goes on the wire
//! is its normalized form: the host is lowercased and `.`/`..` path segments
//! are collapsed.

use url::Url;

use crate::error::RequestError;

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

fn has_scheme(raw: &str) -> bool {
    raw.starts_with(HTTP) || raw.starts_with(HTTPS)
}

fn with_scheme(raw: &str) -> String {
    if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("{HTTP}{raw}")
    }
}

/// A validated absolute base URL, kept in the string form paths are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Prefix `raw` with `http://` when it has no scheme, then parse it.
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let prefixed = with_scheme(raw);
        let url = Url::parse(&prefixed)
            .map_err(|e| RequestError::Configuration(format!("base url {raw:?}: {e}")))?;

        // The parser adds a root path to bare hosts; drop it again so that
        // "example.com" + "/x" does not become "http://example.com//x".
        let bare_root = url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none()
            && !prefixed.ends_with('/');
        let mut serialized = String::from(url);
        if bare_root {
            serialized.pop();
        }
        Ok(Self(serialized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve `uri` against an optional base URL into an absolute URL.
pub fn resolve(base: Option<&BaseUrl>, uri: &str) -> Result<Url, RequestError> {
    let raw = match base {
        Some(base) => format!("{base}{uri}"),
        None => with_scheme(uri),
    };
    Url::parse(&raw).map_err(|e| RequestError::InvalidUrl(format!("{raw:?}: {e}")))
}
