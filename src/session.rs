//! Credential store: the process-wide session record and its mutating actions.

pub mod profile;
pub mod secret;

pub use profile::*;
pub use secret::*;

// self
use crate::{
	_prelude::*,
	backend::BackendDescriptor,
	error::{AuthError, HttpError, SessionExpiredError},
	gateway::RequestGateway,
	obs::{self, ActionKind, ActionOutcome, ActionSpan},
	store::{StoreError, TokenStore},
};

/// Shared handle to the single process-wide [`Session`] record.
///
/// The credential store and the request gateway hold the same handle: the store mutates
/// it through its actions, the gateway only reads the token when stamping requests.
pub type SharedSession = Arc<RwLock<Session>>;

/// The single process-wide authentication record.
///
/// Holds the invariant that a profile never exists without a token. Views and guards
/// read it through snapshots; only [`CredentialStore`] actions mutate it.
#[derive(Clone, Debug, Default)]
pub struct Session {
	token: Option<TokenSecret>,
	user: Option<UserProfile>,
}
impl Session {
	/// Returns the bearer token, if a credential is established.
	pub fn token(&self) -> Option<&TokenSecret> {
		self.token.as_ref()
	}

	/// Returns the cached profile, if one has been fetched.
	pub fn user(&self) -> Option<&UserProfile> {
		self.user.as_ref()
	}

	/// True when a bearer token is present.
	pub fn is_authenticated(&self) -> bool {
		self.token.is_some()
	}

	/// True only when a fetched profile carries the administrator flag.
	///
	/// A token without a profile is never treated as admin.
	pub fn is_admin(&self) -> bool {
		self.user.as_ref().is_some_and(|user| user.is_superuser)
	}

	pub(crate) fn establish(&mut self, token: TokenSecret) {
		self.token = Some(token);
		self.user = None;
	}

	pub(crate) fn attach_user(&mut self, user: UserProfile) {
		debug_assert!(self.token.is_some(), "a profile must never exist without a token");

		self.user = Some(user);
	}

	pub(crate) fn reset(&mut self) {
		self.token = None;
		self.user = None;
	}
}

/// Shape of the login endpoint's issuance response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: String,
}

/// Owns the bearer token and profile, persists the token across restarts, and serializes
/// every mutation behind a single-flight guard.
///
/// Cloning is cheap and every clone operates on the same session: the guard, the views,
/// and the gateway all observe one authentication record.
#[derive(Clone)]
pub struct CredentialStore {
	state: SharedSession,
	store: Arc<dyn TokenStore>,
	gateway: Arc<RequestGateway>,
	// Serializes login/fetch/logout so a logout cannot race a refresh and resurrect a
	// cleared token.
	action_guard: Arc<AsyncMutex<()>>,
}
impl CredentialStore {
	/// Opens a credential store against the provided backend and durable token storage,
	/// seeding the session with any persisted token. The profile always starts unset and
	/// is populated lazily on first need.
	pub async fn open(descriptor: BackendDescriptor, store: Arc<dyn TokenStore>) -> Result<Self> {
		let state = SharedSession::default();
		let gateway = Arc::new(RequestGateway::new(descriptor, state.clone())?);

		Self::with_gateway(gateway, store).await
	}

	/// Opens a credential store around a caller-provided gateway, for custom transport
	/// configuration. The gateway must share its session handle with this store.
	pub async fn with_gateway(
		gateway: Arc<RequestGateway>,
		store: Arc<dyn TokenStore>,
	) -> Result<Self> {
		let state = gateway.session().clone();

		if let Some(token) = store.load().await?.filter(|token| !token.is_empty()) {
			state.write().establish(TokenSecret::new(token));
		}

		Ok(Self { state, store, gateway, action_guard: Default::default() })
	}

	/// Returns the request gateway so views can issue their own authenticated calls.
	pub fn gateway(&self) -> &RequestGateway {
		&self.gateway
	}

	/// True when a bearer token is present.
	pub fn is_authenticated(&self) -> bool {
		self.state.read().is_authenticated()
	}

	/// True only when a fetched profile carries the administrator flag.
	pub fn is_admin(&self) -> bool {
		self.state.read().is_admin()
	}

	/// Returns a point-in-time copy of the session record.
	pub fn snapshot(&self) -> Session {
		self.state.read().clone()
	}

	/// Exchanges credentials for a bearer token and immediately fetches the profile.
	///
	/// The login endpoint expects OAuth2-style form fields, not JSON. Rejected
	/// credentials surface as [`AuthError`] and leave the session untouched. When the
	/// post-login profile fetch fails, the partially established session is rolled back
	/// to fully-logged-out before the failure propagates: a token never outlives a
	/// failed profile fetch.
	pub async fn login(&self, username: &str, password: &str) -> Result<()> {
		const KIND: ActionKind = ActionKind::Login;

		let span = ActionSpan::new(KIND, "login");

		obs::record_action_outcome(KIND, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _serialized = self.action_guard.lock().await;
				let login_path = self.gateway.descriptor().login_path.clone();
				let form = [("username", username), ("password", password)];
				let issued = match self.gateway.post_form::<TokenResponse>(&login_path, &form).await
				{
					Ok(issued) => issued,
					Err(HttpError::Status { status, body }) if status == 400 || status == 401 =>
						return Err(AuthError::RejectedCredentials { reason: body, status }.into()),
					Err(e) => return Err(e.into()),
				};

				if issued.access_token.is_empty() {
					return Err(AuthError::MissingAccessToken.into());
				}

				self.store.save(&issued.access_token).await?;
				self.state.write().establish(TokenSecret::new(issued.access_token));
				self.fetch_user_locked().await
			})
			.await;

		match &result {
			Ok(_) => obs::record_action_outcome(KIND, ActionOutcome::Success),
			Err(_) => obs::record_action_outcome(KIND, ActionOutcome::Failure),
		}

		result
	}

	/// Refreshes the cached profile from the backend.
	///
	/// A no-op when no token is present. On any failure the session is fully logged out
	/// (memory and durable storage) before [`SessionExpiredError`] surfaces, so a stale
	/// token can never linger after a failed refresh.
	pub async fn fetch_user(&self) -> Result<()> {
		const KIND: ActionKind = ActionKind::FetchProfile;

		let span = ActionSpan::new(KIND, "fetch_user");

		obs::record_action_outcome(KIND, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _serialized = self.action_guard.lock().await;

				self.fetch_user_locked().await
			})
			.await;

		match &result {
			Ok(_) => obs::record_action_outcome(KIND, ActionOutcome::Success),
			Err(_) => obs::record_action_outcome(KIND, ActionOutcome::Failure),
		}

		result
	}

	/// Fetches the profile only when it is not already cached.
	///
	/// Concurrent callers piggy-back on the single-flight guard: whoever enters second
	/// finds the profile populated and returns without touching the backend. This is the
	/// entry point the navigation guard uses for its lazy refresh.
	pub async fn ensure_user(&self) -> Result<()> {
		const KIND: ActionKind = ActionKind::FetchProfile;

		let span = ActionSpan::new(KIND, "ensure_user");

		obs::record_action_outcome(KIND, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _serialized = self.action_guard.lock().await;

				if self.state.read().user().is_some() {
					return Ok(());
				}

				self.fetch_user_locked().await
			})
			.await;

		match &result {
			Ok(_) => obs::record_action_outcome(KIND, ActionOutcome::Success),
			Err(_) => obs::record_action_outcome(KIND, ActionOutcome::Failure),
		}

		result
	}

	/// Clears the token and profile from memory and durable storage.
	///
	/// Idempotent; safe to call when already logged out.
	pub async fn logout(&self) -> Result<()> {
		const KIND: ActionKind = ActionKind::Logout;

		let span = ActionSpan::new(KIND, "logout");

		obs::record_action_outcome(KIND, ActionOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _serialized = self.action_guard.lock().await;

				self.logout_locked().await.map_err(Error::from)
			})
			.await;

		match &result {
			Ok(_) => obs::record_action_outcome(KIND, ActionOutcome::Success),
			Err(_) => obs::record_action_outcome(KIND, ActionOutcome::Failure),
		}

		result
	}

	async fn fetch_user_locked(&self) -> Result<()> {
		if !self.state.read().is_authenticated() {
			return Ok(());
		}

		let profile_path = self.gateway.descriptor().profile_path.clone();

		match self.gateway.get_json::<UserProfile>(&profile_path).await {
			Ok(user) => {
				self.state.write().attach_user(user);

				Ok(())
			},
			Err(source) => {
				// Memory is reset even when the durable clear fails; the expiry error
				// is the one the caller must see.
				let _ = self.logout_locked().await;

				Err(SessionExpiredError { source }.into())
			},
		}
	}

	async fn logout_locked(&self) -> Result<(), StoreError> {
		self.state.write().reset();
		self.store.clear().await
	}
}
impl Debug for CredentialStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let session = self.state.read();

		f.debug_struct("CredentialStore")
			.field("authenticated", &session.is_authenticated())
			.field("profile_cached", &session.user().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn profile(is_superuser: bool) -> UserProfile {
		UserProfile { id: 1, username: "alice".into(), is_active: true, is_superuser }
	}

	#[test]
	fn empty_session_grants_nothing() {
		let session = Session::default();

		assert!(!session.is_authenticated());
		assert!(!session.is_admin());
	}

	#[test]
	fn a_token_without_a_profile_is_never_admin() {
		let mut session = Session::default();

		session.establish(TokenSecret::new("jwt"));

		assert!(session.is_authenticated());
		assert!(!session.is_admin());
	}

	#[test]
	fn establish_discards_the_previous_profile() {
		let mut session = Session::default();

		session.establish(TokenSecret::new("first"));
		session.attach_user(profile(true));

		assert!(session.is_admin());

		session.establish(TokenSecret::new("second"));

		assert!(session.user().is_none());
		assert!(!session.is_admin());
	}

	#[test]
	fn reset_clears_both_halves() {
		let mut session = Session::default();

		session.establish(TokenSecret::new("jwt"));
		session.attach_user(profile(false));
		session.reset();

		assert!(session.token().is_none());
		assert!(session.user().is_none());
	}
}
