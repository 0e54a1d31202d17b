use std::fmt::Debug;
use std::io::Read as _;

use log::debug;
use serde_json::Value;
use thiserror::Error;

/// Transport error.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Error from [`ureq`] crate, connection level only.
    #[error("ureq error: {0}")]
    UReq(#[from] Box<ureq::Error>),
    /// Error from [`std::io`] while reading response body.
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    /// Error raised by a custom [`Transport`].
    #[error("{0}")]
    Other(String),
}

/// Bytes kept from the body of a non-200 response, which is never parsed.
const MAX_ERROR_BODY: u64 = 64 * 1024;

/// HTTP request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// Always `POST` for Pushwoosh remote API.
    pub method: &'static str,
    /// Full endpoint URL.
    pub url: String,
    /// Request headers.
    pub headers: Vec<(&'static str, &'static str)>,
    /// JSON body.
    pub body: Value,
}

impl HttpRequest {
    pub(crate) fn post_json(url: String, body: Value) -> Self {
        Self {
            method: "POST",
            url,
            headers: vec![("Content-Type", "application/json")],
            body,
        }
    }
}

/// HTTP response returned by a [`Transport`], whatever its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Performs one HTTP request. Timeout and cancellation are up to the implementation.
pub trait Transport: Debug {
    /// Sends `request` and returns the response.
    ///
    /// A response with 4xx or 5xx status is still an [`HttpResponse`],
    /// [`TransportError`] is reserved for requests which never got one.
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default [`Transport`] backed by [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(ureq::AgentBuilder::new().build())
    }
}

impl UreqTransport {
    /// Creates an [`UreqTransport`] from a configured agent, e.g. with timeouts.
    ///
    /// ```rust
    /// # use std::time::Duration;
    /// # use pushwoosh::UreqTransport;
    /// let agent = ureq::AgentBuilder::new()
    ///     .timeout(Duration::from_secs(10))
    ///     .build();
    /// UreqTransport::new(agent);
    /// ```
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = self.agent.request(request.method, &request.url);
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }

        // ureq reports 4xx and 5xx as errors, classification needs them as responses
        let response = match req.send_string(&request.body.to_string()) {
            Ok(r) => r,
            Err(ureq::Error::Status(_, r)) => r,
            Err(e) => return Err(TransportError::UReq(Box::new(e))),
        };

        let status = response.status();
        if status == 200 {
            let body = response.into_string()?;
            return Ok(HttpResponse { status, body });
        }

        // status alone decides the outcome, a broken or huge body must not hide it
        let mut buf = Vec::new();
        if let Err(e) = response
            .into_reader()
            .take(MAX_ERROR_BODY)
            .read_to_end(&mut buf)
        {
            debug!("failed to read body of HTTP {status}: {e}");
        }
        let body = String::from_utf8_lossy(&buf).into_owned();
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::{mock, Matcher};
    use serde_json::json;

    fn build_request(path: &str) -> HttpRequest {
        let url = format!("{}{path}", mockito::server_url());
        HttpRequest::post_json(url, json!({"request": {"auth": "token"}}))
    }

    #[test]
    fn t_post_json() -> Result<(), TransportError> {
        let m = mock("POST", "/json/1.3/deleteMessage")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"request": {"auth": "token"}})))
            .with_status(200)
            .with_body(r#"{"status_code":200}"#)
            .create();

        let res = UreqTransport::default().post(&build_request("/json/1.3/deleteMessage"))?;
        assert_eq!(200, res.status);
        assert_eq!(r#"{"status_code":200}"#, res.body);
        m.assert();
        Ok(())
    }

    #[test]
    fn t_error_status_is_response() -> Result<(), TransportError> {
        let _m = mock("POST", "/json/1.3/createMessage")
            .with_status(503)
            .with_body("unavailable")
            .create();

        let res = UreqTransport::default().post(&build_request("/json/1.3/createMessage"))?;
        assert_eq!(503, res.status);
        assert_eq!("unavailable", res.body);
        Ok(())
    }

    #[test]
    fn t_oversized_error_body() -> Result<(), TransportError> {
        let _m = mock("POST", "/json/1.3/deleteMessage")
            .with_status(503)
            .with_body(vec![b'x'; 11 * 1024 * 1024])
            .create();

        let res = UreqTransport::default().post(&build_request("/json/1.3/deleteMessage"))?;
        assert_eq!(503, res.status);
        assert_eq!(MAX_ERROR_BODY as usize, res.body.len());
        Ok(())
    }

    #[test]
    fn t_non_utf8_error_body() -> Result<(), TransportError> {
        let _m = mock("POST", "/json/1.3/createMessage")
            .with_status(400)
            .with_body([0xffu8, 0xfe, 0xfd])
            .create();

        let res = UreqTransport::default().post(&build_request("/json/1.3/createMessage"))?;
        assert_eq!(400, res.status);
        assert!(res.body.contains('\u{fffd}'));
        Ok(())
    }

    #[test]
    fn t_connection_error() {
        // nothing listens on port 9 (discard) in test environments
        let request = HttpRequest::post_json("http://127.0.0.1:9/".to_string(), json!({}));
        let res = UreqTransport::default().post(&request);
        assert!(matches!(res, Err(TransportError::UReq(_))));
    }
}
