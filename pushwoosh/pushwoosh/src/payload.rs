use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wraps every request body as `{"request": ...}`.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub(crate) request: T,
}

/// Body of `createMessage`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateMessage<'a> {
    pub(crate) application: &'a str,
    pub(crate) auth: &'a str,
    pub(crate) notifications: Vec<Notification<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Notification<'a> {
    pub(crate) send_date: &'static str,
    pub(crate) ignore_user_timezone: bool,
    pub(crate) content: &'a str,
    pub(crate) devices: Vec<&'a str>,
}

impl<'a> Notification<'a> {
    /// Immediate notification in server time, to one device or none. An empty token is no device.
    pub(crate) fn now(content: &'a str, device: Option<&'a str>) -> Self {
        Self {
            send_date: "now",
            ignore_user_timezone: true,
            content,
            devices: device.filter(|d| !d.is_empty()).into_iter().collect(),
        }
    }
}

/// Body of `deleteMessage`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteMessage<'a> {
    pub(crate) auth: &'a str,
    pub(crate) message: &'a str,
}

/// Body Pushwoosh answers with.
#[derive(Debug, Deserialize)]
pub(crate) struct Response {
    pub(crate) status_code: Option<i64>,
    pub(crate) status_message: Option<String>,
    #[serde(default)]
    pub(crate) response: Value,
}

/// Options of [`crate::Client::send_message`]. Accepted, but nothing in it reaches the request yet.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SendOptions;

/// Optional arguments of [`crate::Client::send_message`] after the message itself.
///
/// ```rust
/// # use pushwoosh::{SendArgs, SendOptions};
/// assert_eq!(SendArgs::default(), SendArgs::from(()));
/// assert_eq!(Some("token"), SendArgs::from("token").device());
/// assert_eq!(None, SendArgs::from(SendOptions::default()).device());
/// assert_eq!(Some("token"), SendArgs::from(("token", SendOptions::default())).device());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SendArgs {
    device: Option<String>,
    options: Option<SendOptions>,
}

impl SendArgs {
    /// Device token to send the message directly to.
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }
}

impl From<()> for SendArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<&str> for SendArgs {
    fn from(device: &str) -> Self {
        Self {
            device: Some(device.to_string()),
            options: None,
        }
    }
}

impl From<String> for SendArgs {
    fn from(device: String) -> Self {
        Self {
            device: Some(device),
            options: None,
        }
    }
}

impl From<Option<&str>> for SendArgs {
    fn from(device: Option<&str>) -> Self {
        Self {
            device: device.map(str::to_string),
            options: None,
        }
    }
}

impl From<SendOptions> for SendArgs {
    fn from(options: SendOptions) -> Self {
        Self {
            device: None,
            options: Some(options),
        }
    }
}

impl<T: Into<String>> From<(T, SendOptions)> for SendArgs {
    fn from((device, options): (T, SendOptions)) -> Self {
        Self {
            device: Some(device.into()),
            options: Some(options),
        }
    }
}
