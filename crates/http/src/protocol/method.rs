//! The request methods understood by the server.
//!
//! Unlike [`http::Method`], the set here is closed: a request whose method token is not
//! one of the five variants below is rejected while decoding.

use std::fmt;
use std::str::FromStr;

use crate::protocol::ParseError;

/// HTTP request method.
///
/// Tokens are matched exactly and case-sensitively, so `"get"` is not a valid method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// All supported methods, in declaration order.
    pub const ALL: [Method; 5] = [Method::Get, Method::Post, Method::Put, Method::Patch, Method::Delete];

    /// Returns the wire token of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Returns true if `token` is exactly one of the supported method tokens.
    pub fn check(token: &str) -> bool {
        Self::ALL.iter().any(|method| method.as_str() == token)
    }
}

impl TryFrom<&str> for Method {
    type Error = ParseError;

    fn try_from(str: &str) -> Result<Self, Self::Error> {
        match str {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(ParseError::unknown_method(other)),
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
