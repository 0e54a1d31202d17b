use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::Response;
use crate::{HttpResponse, PushwooshError, TransportError};

/// Code reported in [`Rejection`] whatever `status_code` Pushwoosh answered with.
pub const ARGUMENT_ERROR_CODE: i64 = 210;

const ARGUMENT_ERROR: &str = "Argument error";

/// Pushwoosh reply to a request which reached it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// `status_code` is 200, holds the `response` object.
    Accepted(Value),
    /// `status_code` is anything else.
    Rejected(Rejection),
}

impl Reply {
    /// Whether Pushwoosh accepted the request.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Pushwoosh refused the request with HTTP 200 but a `status_code` other than 200,
/// e.g. wrong arguments. Not an error, the request itself went through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Always "Argument error".
    pub description: String,
    /// `status_message` from Pushwoosh.
    pub detail: Option<String>,
    /// Always [`ARGUMENT_ERROR_CODE`].
    pub code: i64,
}

impl Rejection {
    fn argument_error(detail: Option<String>) -> Self {
        Self {
            description: ARGUMENT_ERROR.to_string(),
            detail,
            code: ARGUMENT_ERROR_CODE,
        }
    }
}

/// Maps what a transport returned to a [`Reply`] or a [`PushwooshError`].
pub(crate) fn classify(
    result: Result<HttpResponse, TransportError>,
) -> Result<Reply, PushwooshError> {
    let response = result?;
    debug!("received HTTP {}", response.status);
    match response.status {
        200 => {
            let body: Response = serde_json::from_str(&response.body)?;
            if body.status_code == Some(200) {
                Ok(Reply::Accepted(body.response))
            } else {
                warn!(
                    "rejected with status code {:?}: {:?}",
                    body.status_code, body.status_message
                );
                Ok(Reply::Rejected(Rejection::argument_error(
                    body.status_message,
                )))
            }
        }
        500..=599 => Err(PushwooshError::Internal),
        400..=499 => Err(PushwooshError::Malformed),
        _ => Err(PushwooshError::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn respond(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn t_accepted() -> Result<(), PushwooshError> {
        let reply = classify(respond(200, r#"{"status_code":200,"response":{}}"#))?;
        assert_eq!(Reply::Accepted(json!({})), reply);
        assert!(reply.is_accepted());

        let reply = classify(respond(
            200,
            r#"{"status_code":200,"status_message":"OK","response":{"Messages":["ABCD-1234"]}}"#,
        ))?;
        assert_eq!(Reply::Accepted(json!({"Messages": ["ABCD-1234"]})), reply);
        Ok(())
    }

    #[test]
    fn t_rejected() -> Result<(), PushwooshError> {
        let reply = classify(respond(
            200,
            r#"{"status_code":210,"status_message":"Oooops","response":{}}"#,
        ))?;
        let expected = Rejection {
            description: "Argument error".to_string(),
            detail: Some("Oooops".to_string()),
            code: 210,
        };
        assert_eq!(Reply::Rejected(expected), reply);
        assert!(!reply.is_accepted());
        Ok(())
    }

    #[test]
    fn t_rejected_json() -> Result<(), PushwooshError> {
        let reply = classify(respond(200, r#"{"status_code":210,"status_message":"Oooops"}"#))?;
        assert_eq!(
            json!({"description": "Argument error", "detail": "Oooops", "code": 210}),
            serde_json::to_value(&reply)?
        );
        Ok(())
    }

    #[test]
    fn t_missing_status_code_is_rejected() -> Result<(), PushwooshError> {
        let reply = classify(respond(200, "{}"))?;
        assert!(matches!(reply, Reply::Rejected(Rejection { detail: None, code: 210, .. })));
        Ok(())
    }

    #[test]
    fn t_internal() {
        for status in [500, 502, 599] {
            let res = classify(respond(status, r#"{"status_code":200,"response":{}}"#));
            assert!(matches!(res, Err(PushwooshError::Internal)));
        }
    }

    #[test]
    fn t_malformed() {
        for status in [400, 404, 499] {
            let res = classify(respond(status, "not even JSON"));
            assert!(matches!(res, Err(PushwooshError::Malformed)));
        }
    }

    #[test]
    fn t_unknown() {
        for status in [0, 201, 302, 600] {
            let res = classify(respond(status, r#"{"status_code":200,"response":{}}"#));
            let err = res.unwrap_err();
            assert!(matches!(err, PushwooshError::Unknown));
            assert_eq!("Unknown response code / error", err.to_string());
        }
    }

    #[test]
    fn t_invalid_body() {
        let res = classify(respond(200, "<html></html>"));
        assert!(matches!(res, Err(PushwooshError::Deserialize(_))));
    }

    #[test]
    fn t_transport_error() {
        let res = classify(Err(TransportError::Other("Oooops".to_string())));
        let err = res.unwrap_err();
        assert!(matches!(
            err,
            PushwooshError::Transport(TransportError::Other(ref s)) if s == "Oooops"
        ));
        assert_eq!("Oooops", err.to_string());
    }
}
