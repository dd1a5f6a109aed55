//! Core HTTP protocol types.
//!
//! - [`Method`]: the closed set of supported request methods
//! - [`Request`]: a decoded, read-only request line plus headers
//! - [`Response`]: the mutable response builder shared by a handler chain
//! - Error handling:
//!   - [`HttpError`]: Top-level error type of a connection
//!   - [`ParseError`]: Request reading and decoding errors
//!   - [`SendError`]: Response sending errors

mod method;
pub use method::Method;

mod request;
pub use request::Request;

mod response;
pub use response::Response;
pub use response::CONTENT_TYPE;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
