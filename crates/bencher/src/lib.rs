//! Shared fixtures of the relay benchmarks.

/// A raw request stored under `resources/request`.
#[derive(Debug, Copy, Clone)]
pub struct RequestFixture {
    name: &'static str,
    content: &'static str,
}

pub static SMALL_REQUEST: RequestFixture = RequestFixture::new("get_small", include_str!("../resources/request/get_small.txt"));
pub static LARGE_REQUEST: RequestFixture = RequestFixture::new("get_large", include_str!("../resources/request/get_large.txt"));

impl RequestFixture {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The request with `CRLF` line endings, whatever endings the file was saved with.
    pub fn wire_text(&self) -> String {
        let mut text = self.content.lines().collect::<Vec<_>>().join("\r\n");
        text.push_str("\r\n");
        text
    }
}

pub fn request_fixtures() -> [RequestFixture; 2] {
    [SMALL_REQUEST, LARGE_REQUEST]
}
