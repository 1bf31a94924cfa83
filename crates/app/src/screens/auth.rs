//! Login and signup forms.

use mozik_auth::{AuthClient, AuthError, AuthOutcome, AuthResult, AuthTask};
use tracing::debug;

use crate::navigation::Destination;
use crate::screens::{link_line, ScreenView};

const PENDING: &str = "요청 중...";

/// Status text shared by both forms for requests that never got a usable reply.
fn failure_status(error: &AuthError) -> String {
    match error {
        AuthError::Client(_) | AuthError::Transport(_) => "서버 연결 실패".to_string(),
        AuthError::Status(code) => format!("서버 오류 (HTTP {code})"),
        AuthError::MalformedResponse(_) => "서버 응답 오류".to_string(),
    }
}

pub fn login_status(result: &AuthResult<AuthOutcome>) -> String {
    match result {
        Ok(AuthOutcome::Accepted { .. }) => "로그인 성공!".to_string(),
        Ok(AuthOutcome::Rejected { message }) => format!("로그인 실패: {message}"),
        Err(error) => failure_status(error),
    }
}

pub fn signup_status(result: &AuthResult<AuthOutcome>) -> String {
    match result {
        Ok(AuthOutcome::Accepted { .. }) => "회원가입 성공!".to_string(),
        Ok(AuthOutcome::Rejected { message }) => format!("실패: {message}"),
        Err(error) => failure_status(error),
    }
}

fn masked(password: &str) -> String {
    "*".repeat(password.chars().count())
}

#[derive(Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    status: Option<String>,
    pending: Option<AuthTask>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a login request. A request already in flight is cancelled first.
    pub fn submit(&mut self, client: &AuthClient) {
        debug!("login submitted");
        self.pending = Some(client.spawn_login(self.email.clone(), self.password.clone()));
        self.status = Some(PENDING.to_string());
    }

    /// Wait for the pending request and apply its result. Returns where to go
    /// next when the server accepted the credentials.
    ///
    /// Dropping the returned future keeps the request pending; a cancelled
    /// request clears the status.
    pub async fn settle(&mut self) -> Option<Destination> {
        let joined = self.pending.as_mut()?.join().await;
        self.pending = None;
        let Some(result) = joined else {
            self.status = None;
            return None;
        };
        self.status = Some(login_status(&result));
        match result {
            Ok(outcome) if outcome.is_accepted() => Some(Destination::VideoProcessor),
            _ => None,
        }
    }

    pub fn view(&self) -> ScreenView {
        let mut view = ScreenView::new("로그인")
            .line(format!("이메일: {}", self.email))
            .line(format!("비밀번호: {}", masked(&self.password)))
            .line(link_line("로그인", !self.is_pending()))
            .line(link_line("회원가입", true));
        if let Some(status) = &self.status {
            view.push(status.clone());
        }
        view
    }
}

#[derive(Default)]
pub struct SignupScreen {
    pub email: String,
    pub password: String,
    pub nickname: String,
    status: Option<String>,
    pending: Option<AuthTask>,
}

impl SignupScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit(&mut self, client: &AuthClient) {
        debug!("signup submitted");
        self.pending = Some(client.spawn_signup(
            self.email.clone(),
            self.password.clone(),
            self.nickname.clone(),
        ));
        self.status = Some(PENDING.to_string());
    }

    /// Wait for the pending request and apply its result. Signup never
    /// navigates on its own.
    pub async fn settle(&mut self) {
        let Some(task) = self.pending.as_mut() else {
            return;
        };
        let joined = task.join().await;
        self.pending = None;
        self.status = joined.as_ref().map(signup_status);
    }

    pub fn view(&self) -> ScreenView {
        let mut view = ScreenView::new("회원가입")
            .line(format!("이메일: {}", self.email))
            .line(format!("비밀번호: {}", masked(&self.password)))
            .line(format!("닉네임: {}", self.nickname))
            .line(link_line("가입하기", !self.is_pending()))
            .line(link_line("로그인으로 돌아가기", true));
        if let Some(status) = &self.status {
            view.push(status.clone());
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mozik_auth::AuthAction;

    #[test]
    fn login_status_strings() {
        let accepted = Ok(AuthOutcome::Accepted {
            message: "ok".into(),
        });
        assert_eq!(login_status(&accepted), "로그인 성공!");

        let rejected = Ok(AuthOutcome::Rejected {
            message: "bad credentials".into(),
        });
        assert_eq!(login_status(&rejected), "로그인 실패: bad credentials");

        assert_eq!(login_status(&Err(AuthError::Status(500))), "서버 오류 (HTTP 500)");
    }

    #[test]
    fn signup_status_strings() {
        let rejected = Ok(AuthOutcome::Rejected {
            message: "email taken".into(),
        });
        assert_eq!(signup_status(&rejected), "실패: email taken");

        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            signup_status(&Err(AuthError::MalformedResponse(malformed))),
            "서버 응답 오류"
        );
    }

    fn stalled_task(action: AuthAction) -> AuthTask {
        AuthTask::spawn(action, std::future::pending())
    }

    #[tokio::test]
    async fn cancelled_login_clears_pending_status() {
        let mut screen = LoginScreen {
            status: Some(PENDING.to_string()),
            pending: Some(stalled_task(AuthAction::Login)),
            ..LoginScreen::default()
        };
        if let Some(task) = screen.pending.as_mut() {
            task.cancel();
        }

        assert_eq!(screen.settle().await, None);
        assert_eq!(screen.status(), None);
        assert!(!screen.is_pending());
    }

    #[tokio::test]
    async fn cancelled_signup_clears_pending_status() {
        let mut screen = SignupScreen {
            status: Some(PENDING.to_string()),
            pending: Some(stalled_task(AuthAction::Signup)),
            ..SignupScreen::default()
        };
        if let Some(task) = screen.pending.as_mut() {
            task.cancel();
        }

        screen.settle().await;
        assert_eq!(screen.status(), None);
        assert!(!screen.is_pending());
    }

    #[tokio::test]
    async fn abandoned_settle_keeps_login_pending() {
        let mut screen = LoginScreen {
            status: Some(PENDING.to_string()),
            pending: Some(stalled_task(AuthAction::Login)),
            ..LoginScreen::default()
        };

        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(20), screen.settle()).await;
        assert!(waited.is_err());
        assert!(screen.is_pending());
        assert_eq!(screen.status(), Some(PENDING));
    }

    #[test]
    fn password_is_masked_in_view() {
        let screen = LoginScreen {
            email: "a@b.com".into(),
            password: "secret".into(),
            ..LoginScreen::default()
        };
        let view = screen.view();
        assert!(view.contains("이메일: a@b.com"));
        assert!(view.contains("비밀번호: ******"));
        assert!(!view.contains("secret"));
    }
}
