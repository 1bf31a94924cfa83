//! Cancelable background auth requests.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{AuthAction, AuthOutcome, AuthResult};

/// A login or signup running on the runtime.
///
/// The request is tied to the lifetime of this value: dropping it, or calling
/// [`AuthTask::cancel`], aborts the request and its result is discarded.
pub struct AuthTask {
    action: AuthAction,
    handle: Option<JoinHandle<AuthResult<AuthOutcome>>>,
}

impl AuthTask {
    pub fn spawn<F>(action: AuthAction, request: F) -> Self
    where
        F: Future<Output = AuthResult<AuthOutcome>> + Send + 'static,
    {
        Self {
            action,
            handle: Some(tokio::spawn(request)),
        }
    }

    pub fn action(&self) -> AuthAction {
        self.action
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(action = self.action.path(), "cancelling auth request");
            handle.abort();
        }
    }

    /// Wait for the request. `None` means it was cancelled before finishing.
    ///
    /// The handle stays owned by this task while waiting, so dropping the
    /// `join` future leaves the request running under this task and dropping
    /// the task still aborts it.
    pub async fn join(&mut self) -> Option<AuthResult<AuthOutcome>> {
        let handle = self.handle.as_mut()?;
        let joined = handle.await;
        self.handle = None;
        match joined {
            Ok(result) => Some(result),
            Err(error) if error.is_cancelled() => None,
            Err(error) => {
                warn!(action = self.action.path(), %error, "auth request task panicked");
                None
            }
        }
    }
}

impl Drop for AuthTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
