//! Request/response shapes exchanged between the dispatcher and a transport.
//!
//! DESIGN
//! ======
//! Requests are plain data (method, relative path, form fields, token) so the
//! view can build them synchronously and hand them to whatever transport the
//! runtime owns. Responses keep the final URL so redirects stay observable
//! after the HTTP client has followed them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

/// Header carrying the anti-forgery token on every request.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";
/// Form field carrying the anti-forgery token on POST bodies.
pub const CSRF_FIELD: &str = "_csrf";

/// Error returned by a [`Transport`](super::transport::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
    /// The request never produced a response (connect, timeout, reset).
    #[error("http request failed: {0}")]
    Request(String),
    /// The response body could not be read or decoded.
    #[error("response body decode failed: {0}")]
    Decode(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound HTTP call against a server-relative path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Server-relative path, always starting with `/`.
    pub path: String,
    /// Form fields in insertion order.
    pub form: Vec<(String, String)>,
    /// Anti-forgery token read from the live page, if one was found.
    pub csrf_token: Option<String>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), form: Vec::new(), csrf_token: None }
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::Post, path: path.into(), form: Vec::new(), csrf_token: None }
    }

    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.form.push((name.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn with_csrf(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    /// First value of the form field `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Form fields as sent on the wire: the token field is appended to POST
    /// bodies when a token is known.
    #[must_use]
    pub fn wire_form(&self) -> Vec<(String, String)> {
        let mut form = self.form.clone();
        if self.method == Method::Post
            && let Some(token) = &self.csrf_token
            && self.field(CSRF_FIELD).is_none()
        {
            form.push((CSRF_FIELD.to_owned(), token.clone()));
        }
        form
    }
}

/// A fully read HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL of the last hop after redirects were followed.
    pub final_url: String,
    /// True when at least one redirect was followed.
    pub redirected: bool,
    pub body: String,
}

impl HttpResponse {
    /// Convenience constructor for a non-redirected response.
    #[must_use]
    pub fn new(status: u16, final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { status, final_url: final_url.into(), redirected: false, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the server bounced the request to `login_path`.
    #[must_use]
    pub fn redirected_to_login(&self, login_path: &str) -> bool {
        self.redirected && self.final_url.contains(login_path)
    }
}
