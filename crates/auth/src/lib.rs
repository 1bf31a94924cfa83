use std::time::Duration;

use mozik_config::ApiConfig;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod task;

pub use task::AuthTask;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("server connection failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("malformed server response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Signup,
}

impl AuthAction {
    pub fn path(self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Signup => "signup",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

/// Body returned by both `/login` and `/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthReply {
    pub success: bool,
    pub message: String,
}

/// A well-formed answer from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted { message: String },
    Rejected { message: String },
}

impl AuthOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AuthOutcome::Accepted { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            AuthOutcome::Accepted { message } | AuthOutcome::Rejected { message } => message,
        }
    }
}

impl From<AuthReply> for AuthOutcome {
    fn from(reply: AuthReply) -> Self {
        if reply.success {
            AuthOutcome::Accepted {
                message: reply.message,
            }
        } else {
            AuthOutcome::Rejected {
                message: reply.message,
            }
        }
    }
}

/// Unauthenticated client for the login and signup endpoints.
///
/// Each call is a single POST: no retries, and nothing from the response is
/// retained once the outcome has been returned.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    api: ApiConfig,
}

impl AuthClient {
    pub fn new(api: &ApiConfig) -> AuthResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = api.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build().map_err(AuthError::Client)?;

        Ok(Self {
            http,
            api: api.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthOutcome> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.post(AuthAction::Login, &request).await
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> AuthResult<AuthOutcome> {
        let request = SignupRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            nickname: nickname.to_owned(),
        };
        self.post(AuthAction::Signup, &request).await
    }

    /// Run a login in the background; dropping the returned task aborts it.
    pub fn spawn_login(&self, email: String, password: String) -> AuthTask {
        let client = self.clone();
        AuthTask::spawn(AuthAction::Login, async move {
            client.login(&email, &password).await
        })
    }

    /// Run a signup in the background; dropping the returned task aborts it.
    pub fn spawn_signup(&self, email: String, password: String, nickname: String) -> AuthTask {
        let client = self.clone();
        AuthTask::spawn(AuthAction::Signup, async move {
            client.signup(&email, &password, &nickname).await
        })
    }

    async fn post<B: Serialize>(&self, action: AuthAction, body: &B) -> AuthResult<AuthOutcome> {
        let url = self.api.endpoint(action.path());
        debug!(action = action.path(), %url, "sending auth request");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|error| {
                warn!(action = action.path(), %error, "auth request failed to reach server");
                AuthError::Transport(error)
            })?;

        let status = response.status();
        let payload = response.bytes().await.map_err(AuthError::Transport)?;

        if !status.is_success() {
            // Some servers report rejected credentials with a 4xx and the usual body.
            if let Ok(reply) = serde_json::from_slice::<AuthReply>(&payload) {
                if !reply.success {
                    info!(action = action.path(), status = status.as_u16(), "auth request rejected");
                    return Ok(reply.into());
                }
            }
            warn!(action = action.path(), status = status.as_u16(), "auth request returned error status");
            return Err(AuthError::Status(status.as_u16()));
        }

        let reply: AuthReply = serde_json::from_slice(&payload).map_err(|error| {
            warn!(action = action.path(), %error, "auth response did not match expected shape");
            AuthError::MalformedResponse(error)
        })?;

        let outcome = AuthOutcome::from(reply);
        info!(
            action = action.path(),
            accepted = outcome.is_accepted(),
            "auth request completed"
        );
        Ok(outcome)
    }
}
