//! The session manager: sign-in, bootstrap, sign-out and the two clients.

use crate::api::{endpoints, SchoolApi};
use crate::error::{CoreError, Result};
use crate::models::{Credentials, LoginData, SignUp, UserProfile};
use crate::session::policy::DeauthorizePolicy;
use crate::session::route::{Navigator, Route};
use crate::session::state::{Session, SessionHandle, SessionStatus};
use crate::submit::Outcome;
use crate::validate::Validate;
use campus_http::client::{bearer_value, BearerAuth, RequestDecorator, ResponsePolicy};
use campus_http::{ApiClient, ApiError, ApiRequest, ApiResponse, Envelope, TokenStore};
use std::sync::Arc;

const LOGIN_FAILED: &str = "Login failed. Check your email and password.";

/// Result of a sign-in attempt the backend answered.
#[derive(Clone, Debug, PartialEq)]
pub enum SignInOutcome {
    SignedIn(UserProfile),
    /// The backend refused the credentials. The stored token is untouched.
    Rejected(String),
}

/// Owns the session and hands out clients bound to it.
///
/// The public client sends requests as they are. The secure client attaches
/// the stored bearer token to every request and signs the user out on any
/// 401/403.
pub struct SessionManager {
    session: SessionHandle,
    navigator: Arc<dyn Navigator>,
    bearer: BearerAuth,
    policy: DeauthorizePolicy,
    public: ApiClient,
    secure: ApiClient,
}

impl SessionManager {
    pub fn new(
        client: ApiClient,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = SessionHandle::restore(store.clone());
        let bearer = BearerAuth::new(store);
        let policy = DeauthorizePolicy::new(session.clone(), navigator.clone());

        let public = client.bare();
        let secure = client
            .bare()
            .with_decorator(bearer.clone())
            .with_policy(policy.clone());

        Self {
            session,
            navigator,
            bearer,
            policy,
            public,
            secure,
        }
    }

    pub fn session(&self) -> Session {
        self.session.snapshot()
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.session
    }

    pub fn public_client(&self) -> &ApiClient {
        &self.public
    }

    pub fn secure_client(&self) -> &ApiClient {
        &self.secure
    }

    pub fn api(&self) -> SchoolApi {
        SchoolApi::new(self.public.clone(), self.secure.clone())
    }

    /// Set `Authorization: Bearer <token>` from the store, or drop the header
    /// when there is no token.
    pub fn attach_token(&self, request: &mut ApiRequest) {
        self.bearer.decorate(request);
    }

    /// Apply the 401/403 sign-out rule to a response received elsewhere.
    pub fn handle_response(&self, response: &ApiResponse) {
        self.policy.inspect(response);
    }

    /// Where a signed-in user belongs, or the landing page.
    pub fn landing_route(&self) -> Route {
        self.session
            .user()
            .and_then(|u| u.primary_role())
            .map(Route::dashboard)
            .unwrap_or(Route::Landing)
    }

    /// Exchange credentials for a token.
    ///
    /// On success the token is persisted before the in-memory session is
    /// updated, and the navigator is sent to the user's dashboard. A
    /// refusal is returned as [`SignInOutcome::Rejected`]; transport
    /// failures are returned as errors. Neither touches the stored token.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignInOutcome> {
        credentials.validate()?;

        let was_loading = self.session.snapshot().is_loading;
        self.session.set_loading(true);
        let reply = self
            .public
            .post::<_, LoginData>(endpoints::LOGIN, credentials)
            .await
            .and_then(Envelope::into_data);
        self.session.set_loading(was_loading);

        match reply {
            Ok(LoginData { token, user }) => {
                self.session.sign_in(&token, user.clone())?;
                tracing::info!("[session] signed in as {}", user.display_name());
                if let Some(role) = user.primary_role() {
                    self.navigator.navigate(Route::dashboard(role));
                }
                Ok(SignInOutcome::SignedIn(user))
            }
            Err(ApiError::Rejected(message)) => Ok(SignInOutcome::Rejected(message)),
            Err(ApiError::Status { message, .. }) => Ok(SignInOutcome::Rejected(
                message.unwrap_or_else(|| LOGIN_FAILED.to_string()),
            )),
            Err(ApiError::Unauthorized(_)) => Ok(SignInOutcome::Rejected(LOGIN_FAILED.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Register an account. Does not sign in.
    pub async fn sign_up(&self, form: &SignUp) -> Outcome {
        if let Err(errors) = form.validate() {
            return Outcome::Invalid(errors);
        }
        let reply = self
            .public
            .post::<_, serde_json::Value>(endpoints::SIGN_UP, form)
            .await
            .and_then(Envelope::into_message)
            .map_err(CoreError::from);
        Outcome::from_result(reply)
    }

    /// Load the profile for a token persisted by an earlier run.
    ///
    /// The check goes out on the public client with the token set
    /// explicitly, so a failure here never signs the user out: the token is
    /// kept, the user stays unset and the session reports
    /// [`SessionStatus::ProfileUnavailable`].
    pub async fn bootstrap(&self) {
        let Some(token) = self.session.token() else {
            self.session.set_loading(false);
            return;
        };

        self.session.set_loading(true);
        let request = ApiRequest::get(endpoints::CURRENT_USER)
            .with_header("Authorization", bearer_value(&token));
        let reply = self
            .public
            .send::<UserProfile>(request)
            .await
            .and_then(Envelope::into_data);

        match reply {
            Ok(user) => {
                let name = user.display_name().to_string();
                if self.session.profile_loaded(&token, user) {
                    tracing::info!("[session] restored session for {}", name);
                } else {
                    tracing::debug!("[session] discarded profile for a replaced token");
                }
            }
            Err(e) => {
                tracing::warn!("[session] could not load current user: {}", e);
                self.session.profile_failed();
            }
        }
    }

    /// The signed-in user, for operations that act on their behalf.
    pub fn require_user(&self) -> Result<UserProfile> {
        self.session.user().ok_or(CoreError::NotSignedIn)
    }

    /// Forget the token and the user. No navigation.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        tracing::info!("[session] logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{json_reply, RecordingNavigator, StubNetwork};
    use campus_http::{ClientConfig, MemoryTokenStore};
    use serde_json::json;

    struct Fixture {
        manager: SessionManager,
        network: Arc<StubNetwork>,
        store: Arc<MemoryTokenStore>,
        nav: Arc<RecordingNavigator>,
    }

    fn fixture(token: Option<&str>) -> Fixture {
        let network = Arc::new(StubNetwork::default());
        let store = Arc::new(match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        });
        let nav = Arc::new(RecordingNavigator::default());
        let client = ApiClient::with_network(network.clone(), ClientConfig::with_base_url("http://backend/api"));
        let manager = SessionManager::new(client, store.clone(), nav.clone());
        Fixture {
            manager,
            network,
            store,
            nav,
        }
    }

    fn creds() -> Credentials {
        Credentials::new("admin@school.test", "Passw0rd!")
    }

    #[tokio::test]
    async fn test_sign_in_persists_token_and_user() {
        let f = fixture(None);
        f.network.push(json_reply(
            200,
            json!({ "success": true, "data": { "token": "abc", "email": "admin@school.test", "role": ["Admin"] } }),
        ));

        let outcome = f.manager.sign_in(&creds()).await.unwrap();

        assert!(matches!(outcome, SignInOutcome::SignedIn(_)));
        assert_eq!(f.store.load().as_deref(), Some("abc"));
        let session = f.manager.session();
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.user.and_then(|u| u.email).as_deref(), Some("admin@school.test"));
        assert_eq!(f.manager.status(), SessionStatus::Authenticated);
        assert_eq!(f.nav.routes(), vec![Route::AdminDashboard]);

        let (url, request) = f.network.request(0);
        assert_eq!(url, "http://backend/api/Auth/login");
        assert_eq!(request.authorization(), None);
    }

    #[tokio::test]
    async fn test_rejected_sign_in_keeps_previous_token() {
        let f = fixture(Some("old"));
        f.network.push(json_reply(200, json!({ "success": false, "message": "Invalid credentials" })));

        let outcome = f.manager.sign_in(&creds()).await.unwrap();

        assert_eq!(outcome, SignInOutcome::Rejected("Invalid credentials".into()));
        assert_eq!(f.store.load().as_deref(), Some("old"));
        assert!(f.nav.routes().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_401_is_a_refusal_not_a_sign_out() {
        let f = fixture(Some("old"));
        f.network.push(json_reply(401, json!({ "success": false })));

        let outcome = f.manager.sign_in(&creds()).await.unwrap();

        assert_eq!(outcome, SignInOutcome::Rejected(LOGIN_FAILED.into()));
        assert_eq!(f.store.load().as_deref(), Some("old"));
        assert!(f.nav.routes().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_transport_error_propagates() {
        let f = fixture(None);
        f.network.push(Err(ApiError::Http("connection refused".into())));

        let err = f.manager.sign_in(&creds()).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(f.store.load(), None);
    }

    #[tokio::test]
    async fn test_invalid_credentials_never_sent() {
        let f = fixture(None);
        let err = f.manager.sign_in(&Credentials::new("", "")).await.unwrap_err();
        assert!(matches!(err, CoreError::Invalid(_)));
        assert_eq!(f.network.request_count(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_loads_profile_with_explicit_header() {
        let f = fixture(Some("abc"));
        assert_eq!(f.manager.status(), SessionStatus::Loading);
        f.network.push(json_reply(
            200,
            json!({ "success": true, "data": { "email": "t@school.test", "role": ["Teacher"] } }),
        ));

        f.manager.bootstrap().await;

        assert_eq!(f.manager.status(), SessionStatus::Authenticated);
        assert_eq!(f.manager.landing_route(), Route::TeacherDashboard);
        let (url, request) = f.network.request(0);
        assert_eq!(url, "http://backend/api/Auth/current-user");
        assert_eq!(request.authorization(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_bootstrap_failure_keeps_token() {
        for reply in [
            json_reply(500, json!({ "success": false })),
            json_reply(401, json!({ "success": false })),
            Err(ApiError::Http("timeout".into())),
        ] {
            let f = fixture(Some("abc"));
            f.network.push(reply);

            f.manager.bootstrap().await;

            assert_eq!(f.store.load().as_deref(), Some("abc"));
            assert_eq!(f.manager.session().user, None);
            assert_eq!(f.manager.status(), SessionStatus::ProfileUnavailable);
            assert!(f.nav.routes().is_empty());
        }
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_makes_no_request() {
        let f = fixture(None);
        f.manager.bootstrap().await;
        assert_eq!(f.network.request_count(), 0);
        assert_eq!(f.manager.status(), SessionStatus::Anonymous);
        assert!(!f.manager.session().is_loading);
    }

    #[tokio::test]
    async fn test_require_user_follows_profile() {
        let f = fixture(Some("abc"));
        assert!(matches!(f.manager.require_user(), Err(CoreError::NotSignedIn)));

        f.network.push(json_reply(
            200,
            json!({ "success": true, "data": { "id": "u-7", "email": "t@school.test", "role": ["Teacher"] } }),
        ));
        f.manager.bootstrap().await;
        let user = f.manager.require_user().unwrap();
        assert_eq!(user.email.as_deref(), Some("t@school.test"));

        f.manager.logout().unwrap();
        assert!(matches!(f.manager.require_user(), Err(CoreError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_expired_session_drops_header_on_next_request() {
        let f = fixture(Some("abc"));
        f.network.push(json_reply(403, json!({ "success": false })));

        let err = f
            .manager
            .secure_client()
            .get::<serde_json::Value>("/Students/get-all")
            .await
            .unwrap_err();
        assert!(err.is_access_denied());
        assert_eq!(f.network.request(0).1.authorization(), Some("Bearer abc"));
        assert_eq!(f.nav.routes(), vec![Route::Landing]);

        let mut next = ApiRequest::get("/Students/get-all");
        f.manager.attach_token(&mut next);
        assert_eq!(next.authorization(), None);
    }

    #[tokio::test]
    async fn test_other_failures_pass_through_untouched() {
        let f = fixture(Some("abc"));
        f.network.push(json_reply(500, json!({ "success": false, "message": "boom" })));

        let err = f
            .manager
            .secure_client()
            .get::<serde_json::Value>("/Students/get-all")
            .await
            .unwrap_err();

        assert_eq!(err.backend_message(), Some("boom"));
        assert_eq!(f.store.load().as_deref(), Some("abc"));
        assert_eq!(f.network.request_count(), 1);
        assert!(f.nav.routes().is_empty());
    }

    #[tokio::test]
    async fn test_handle_response_directly() {
        let f = fixture(Some("abc"));
        f.manager.handle_response(&ApiResponse::new(404, ""));
        assert_eq!(f.store.load().as_deref(), Some("abc"));
        f.manager.handle_response(&ApiResponse::new(401, ""));
        assert_eq!(f.store.load(), None);
        assert_eq!(f.nav.routes(), vec![Route::Landing]);
    }

    #[tokio::test]
    async fn test_logout_does_not_navigate() {
        let f = fixture(Some("abc"));
        f.manager.logout().unwrap();
        assert_eq!(f.store.load(), None);
        assert_eq!(f.manager.status(), SessionStatus::Anonymous);
        assert!(f.nav.routes().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_outcomes() {
        let f = fixture(None);
        f.network.push(json_reply(200, json!({ "success": true, "message": "Account created" })));
        f.network.push(json_reply(200, json!({ "success": false, "message": "Email already registered" })));

        let form = SignUp {
            full_name: "Nadia Islam".into(),
            email: "nadia@school.test".into(),
            password: "Passw0rd!".into(),
        };
        assert_eq!(f.manager.sign_up(&form).await, Outcome::Saved(Some("Account created".into())));
        assert_eq!(
            f.manager.sign_up(&form).await,
            Outcome::Rejected("Email already registered".into())
        );

        let weak = SignUp {
            password: "weak".into(),
            ..form
        };
        assert!(matches!(f.manager.sign_up(&weak).await, Outcome::Invalid(_)));
        assert_eq!(f.network.request_count(), 2);
        assert_eq!(f.store.load(), None);
    }
}
