//! Remote user collection contract and HTTP implementation.
//!
//! # Responsibility
//! - Perform one JSON request/response round trip per operation against
//!   `{base_url}/users`.
//! - Map non-success responses and transport failures to typed errors.
//!
//! # Invariants
//! - Single attempt per call: no retry, no backoff.
//! - Any non-2xx status is a failure regardless of body content.
//! - Only remote-assigned ids are addressable; local ids never leave core.

use crate::model::user::{RemoteId, User};
use crate::remote::config::RemoteConfig;
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

const USERS_SEGMENT: &str = "users";

pub type RemoteResult<T> = Result<T, RemoteSyncError>;

/// Failure of one remote collection call.
#[derive(Debug)]
pub enum RemoteSyncError {
    /// Client configuration was rejected before any request.
    InvalidConfig(String),
    /// The remote answered with a non-success status.
    Remote { status_code: u16 },
    /// The transport failed before a response was received.
    Network(reqwest::Error),
    /// A success response carried a body that is not a user payload.
    Decode(String),
}

impl Display for RemoteSyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(message) => write!(f, "invalid remote config: {message}"),
            Self::Remote { status_code } => write!(f, "remote error: status {status_code}"),
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl Error for RemoteSyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteSyncError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

/// Remote collection of user records.
///
/// Implementations perform exactly one round trip per call.
#[allow(async_fn_in_trait)]
pub trait UserRemote {
    async fn fetch_all(&self) -> RemoteResult<Vec<User>>;
    async fn fetch_by_id(&self, id: &RemoteId) -> RemoteResult<User>;
    /// Creates `user`; the response may or may not carry a usable id.
    async fn create(&self, user: &User) -> RemoteResult<User>;
    async fn update(&self, id: &RemoteId, user: &User) -> RemoteResult<User>;
    async fn delete(&self, id: &RemoteId) -> RemoteResult<()>;
}

/// JSON-over-HTTP user collection client.
#[derive(Debug, Clone)]
pub struct HttpUserRemote {
    client: Client,
    base_url: Url,
}

impl HttpUserRemote {
    /// Builds a client from validated config.
    ///
    /// # Errors
    /// - Returns `InvalidConfig` when `config` fails validation.
    /// - Returns `Network` when the HTTP client cannot be constructed.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| RemoteSyncError::InvalidConfig(format!("base_url: {err}")))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> Url {
        self.users_url(None)
    }

    /// Text ids are percent-encoded as one path segment.
    fn item_url(&self, id: &RemoteId) -> Url {
        self.users_url(Some(id))
    }

    fn users_url(&self, id: Option<&RemoteId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(USERS_SEGMENT);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> RemoteResult<Vec<u8>> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=remote_request module=remote status=error method={} url={} kind=network",
                    method, url
                );
                return Err(RemoteSyncError::Network(err));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=remote_request module=remote status=error method={} url={} http_status={}",
                method,
                url,
                status.as_u16()
            );
            return Err(RemoteSyncError::Remote {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(
            "event=remote_request module=remote status=ok method={} url={} http_status={} bytes={}",
            method,
            url,
            status.as_u16(),
            body.len()
        );
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&User>,
    ) -> RemoteResult<T> {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(user) = body {
            request = request.json(user);
        }
        let bytes = self.send(method, url, request).await?;
        decode(&bytes)
    }
}

impl UserRemote for HttpUserRemote {
    async fn fetch_all(&self) -> RemoteResult<Vec<User>> {
        self.send_json(Method::GET, self.collection_url(), None).await
    }

    async fn fetch_by_id(&self, id: &RemoteId) -> RemoteResult<User> {
        self.send_json(Method::GET, self.item_url(id), None).await
    }

    async fn create(&self, user: &User) -> RemoteResult<User> {
        self.send_json(Method::POST, self.collection_url(), Some(user))
            .await
    }

    async fn update(&self, id: &RemoteId, user: &User) -> RemoteResult<User> {
        self.send_json(Method::PUT, self.item_url(id), Some(user))
            .await
    }

    async fn delete(&self, id: &RemoteId) -> RemoteResult<()> {
        let url = self.item_url(id);
        let request = self.client.delete(url.clone());
        self.send(Method::DELETE, url, request).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> RemoteResult<T> {
    serde_json::from_slice(bytes).map_err(|err| RemoteSyncError::Decode(err.to_string()))
}
