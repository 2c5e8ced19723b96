//! URI references: absolute URLs or references relative to a base the reader
//! supplies later.

use std::fmt;
use std::str::FromStr;

use url::{ParseError, Url};

/// Base used only to check that a relative reference is well formed.
const CHECK_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriReference {
    Absolute(Url),
    /// A reference kept as written, such as `../a?b` or `//host/path`.
    Relative(String),
}

impl UriReference {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match Url::parse(input) {
            Ok(url) => Ok(UriReference::Absolute(url)),
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(CHECK_BASE)?.join(input)?;
                Ok(UriReference::Relative(input.to_owned()))
            }
            Err(err) => Err(err),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UriReference::Absolute(url) => url.as_str(),
            UriReference::Relative(reference) => reference,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, UriReference::Absolute(_))
    }

    /// Resolves against `base`; absolute references ignore it.
    pub fn resolve(&self, base: &Url) -> Result<Url, ParseError> {
        match self {
            UriReference::Absolute(url) => Ok(url.clone()),
            UriReference::Relative(reference) => base.join(reference),
        }
    }
}

impl FromStr for UriReference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriReference::parse(s)
    }
}

impl fmt::Display for UriReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Url> for UriReference {
    fn from(url: Url) -> Self {
        UriReference::Absolute(url)
    }
}
