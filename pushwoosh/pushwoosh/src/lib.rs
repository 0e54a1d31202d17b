#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! Pushwoosh is Pushwoosh remote API wrapper to create and delete push messages in Rust 2021 edition.

use log::debug;
use serde::Serialize;
use url::Url;

pub use error::PushwooshError;
pub use payload::{SendArgs, SendOptions};
pub use reply::{Rejection, Reply, ARGUMENT_ERROR_CODE};
pub use transport::{HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};

use payload::{CreateMessage, DeleteMessage, Envelope, Notification};

mod error;
mod payload;
mod reply;
mod transport;

/// Default Pushwoosh API host.
pub const DEFAULT_HOST: &str = "https://cp.pushwoosh.com";

/// Default Pushwoosh API version.
pub const DEFAULT_API_VERSION: &str = "1.3";

/// Optional client configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// API host, [`DEFAULT_HOST`] by default.
    pub host: String,
    /// API version, [`DEFAULT_API_VERSION`] by default.
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "camelCase")]
enum Endpoint {
    CreateMessage,
    DeleteMessage,
}

/// Pushwoosh remote API client.
#[derive(Debug)]
pub struct Client<T = UreqTransport> {
    app_code: String,
    auth_token: String,
    host: String,
    api_version: String,
    transport: T,
}

impl Client<UreqTransport> {
    /// Creates a [`Client`] against the default host and API version.
    ///
    /// Both application code and API access token are required.
    ///
    /// ```rust
    /// # use pushwoosh::{Client, PushwooshError};
    /// let client = Client::new("XXXXX-XXXXX", "token")?;
    /// assert_eq!("XXXXX-XXXXX", client.app_code());
    /// assert!(Client::new("XXXXX-XXXXX", "").is_err());
    /// # Ok::<(), PushwooshError>(())
    /// ```
    pub fn new<S>(app_code: S, auth_token: S) -> Result<Self, PushwooshError>
    where
        S: Into<String>,
    {
        Self::with_config(app_code, auth_token, Config::default())
    }

    /// Creates a [`Client`] with [`Config`].
    pub fn with_config<S>(
        app_code: S,
        auth_token: S,
        config: Config,
    ) -> Result<Self, PushwooshError>
    where
        S: Into<String>,
    {
        Self::with_transport(app_code, auth_token, config, UreqTransport::default())
    }
}

impl<T: Transport> Client<T> {
    /// Creates a [`Client`] which sends requests through `transport`.
    pub fn with_transport<S>(
        app_code: S,
        auth_token: S,
        config: Config,
        transport: T,
    ) -> Result<Self, PushwooshError>
    where
        S: Into<String>,
    {
        let app_code = app_code.into();
        let auth_token = auth_token.into();
        if app_code.is_empty() || auth_token.is_empty() {
            return Err(PushwooshError::Credentials);
        }
        Url::parse(&config.host)?;
        Ok(Self {
            app_code,
            auth_token,
            host: config.host,
            api_version: config.api_version,
            transport,
        })
    }

    /// Application code.
    pub fn app_code(&self) -> &str {
        &self.app_code
    }

    /// API access token.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// API host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    #[cfg(test)]
    fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `message` right now, to one device if given.
    ///
    /// Besides the message, accepts nothing, a device token, [`SendOptions`],
    /// or a device token with [`SendOptions`]:
    ///
    /// ```no_run
    /// # use pushwoosh::{Client, PushwooshError, SendOptions};
    /// # async fn run() -> Result<(), PushwooshError> {
    /// let client = Client::new("XXXXX-XXXXX", "token")?;
    /// client.send_message("Hello World", ()).await?;
    /// client.send_message("Hello World", "device token").await?;
    /// client.send_message("Hello World", SendOptions::default()).await?;
    /// client.send_message("Hello World", ("device token", SendOptions::default())).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_message<A>(&self, message: &str, args: A) -> Result<Reply, PushwooshError>
    where
        A: Into<SendArgs>,
    {
        if message.is_empty() {
            return Err(PushwooshError::MissingMessage);
        }

        let args = args.into();
        let body = Envelope {
            request: CreateMessage {
                application: &self.app_code,
                auth: &self.auth_token,
                notifications: vec![Notification::now(message, args.device())],
            },
        };
        self.post(Endpoint::CreateMessage, &body)
    }

    /// Deletes a scheduled message by the code `createMessage` answered with.
    pub async fn delete_message(&self, message_code: &str) -> Result<Reply, PushwooshError> {
        if message_code.is_empty() {
            return Err(PushwooshError::MissingMessageCode);
        }

        let body = Envelope {
            request: DeleteMessage {
                auth: &self.auth_token,
                message: message_code,
            },
        };
        self.post(Endpoint::DeleteMessage, &body)
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        let host = self.host.trim_end_matches('/');
        format!("{host}/json/{0}/{endpoint}", self.api_version)
    }

    fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Reply, PushwooshError> {
        let url = self.endpoint_url(endpoint);
        debug!("POST {url}");
        let request = HttpRequest::post_json(url, serde_json::to_value(body)?);
        reply::classify(self.transport.post(&request))
    }
}
