//! Navigation guard: the per-attempt decision tree gating route transitions.
//!
//! One evaluation runs per navigation attempt. The decision tree is strict about
//! ordering: the admin requirement is always checked against a profile that has been
//! freshly fetched if it was previously missing, never against an absent one. Every
//! failure path funnels to a redirect—a failed profile fetch can never produce a
//! silent allow.

// self
use crate::{
	_prelude::*,
	obs::{self, ActionKind, ActionOutcome, ActionSpan},
	route::{NavigationRequest, RouteCapabilities, RouteTable},
	session::{CredentialStore, Session},
};

/// Decision produced by one guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
	/// Commit the transition to the target route.
	Allow,
	/// Abandon the target and navigate to the carried route instead.
	Redirect(String),
}

/// Redirect destinations used when a guard check fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTargets {
	/// Route presented to unauthenticated or expired sessions.
	pub login: String,
	/// Default authenticated-user route, used for privilege downgrades.
	pub default_user: String,
}
impl Default for RedirectTargets {
	fn default() -> Self {
		Self { login: "/login".into(), default_user: "/".into() }
	}
}

/// Pure decision core evaluated against a settled session snapshot.
///
/// Assumes the profile has already been fetched if it was going to be; the suspension
/// machinery lives in [`NavigationGuard::evaluate`]. Kept separate so the decision
/// table is unit-testable without a transport.
pub fn decide(
	session: &Session,
	capabilities: RouteCapabilities,
	targets: &RedirectTargets,
) -> NavigationDecision {
	if capabilities.requires_auth && !session.is_authenticated() {
		return NavigationDecision::Redirect(targets.login.clone());
	}
	// Privilege downgrade, not a login problem: authenticated non-admins land on the
	// default user route.
	if capabilities.requires_admin && !session.is_admin() {
		return NavigationDecision::Redirect(targets.default_user.clone());
	}

	NavigationDecision::Allow
}

/// Intercepts navigation attempts and resolves them against the credential store.
#[derive(Clone, Debug)]
pub struct NavigationGuard {
	credentials: CredentialStore,
	routes: RouteTable,
	targets: RedirectTargets,
}
impl NavigationGuard {
	/// Creates a guard over the provided credential store and route table, using the
	/// default redirect targets (`/login` and `/`).
	pub fn new(credentials: CredentialStore, routes: RouteTable) -> Self {
		Self { credentials, routes, targets: RedirectTargets::default() }
	}

	/// Overrides the redirect targets.
	pub fn with_targets(mut self, targets: RedirectTargets) -> Self {
		self.targets = targets;

		self
	}

	/// Evaluates one navigation attempt.
	///
	/// The lazy profile refresh is the sole suspension point: navigation stays blocked
	/// until it resolves or fails, and an expired session redirects to the login route
	/// rather than surfacing an error.
	pub async fn evaluate(&self, request: &NavigationRequest) -> NavigationDecision {
		const KIND: ActionKind = ActionKind::Guard;

		let span = ActionSpan::new(KIND, "evaluate");

		obs::record_action_outcome(KIND, ActionOutcome::Attempt);

		let decision = span
			.instrument(async move {
				let capabilities = self.routes.resolve(&request.target);

				if capabilities.requires_auth && !self.credentials.is_authenticated() {
					return NavigationDecision::Redirect(self.targets.login.clone());
				}
				// Lazy refresh: a restarted client has a persisted token but no profile
				// yet. A failed refresh has already reset the session, so the only
				// sensible destination is the login route.
				if self.credentials.is_authenticated()
					&& self.credentials.snapshot().user().is_none()
					&& self.credentials.ensure_user().await.is_err()
				{
					return NavigationDecision::Redirect(self.targets.login.clone());
				}

				decide(&self.credentials.snapshot(), capabilities, &self.targets)
			})
			.await;

		match &decision {
			NavigationDecision::Allow =>
				obs::record_action_outcome(KIND, ActionOutcome::Success),
			NavigationDecision::Redirect(_) =>
				obs::record_action_outcome(KIND, ActionOutcome::Failure),
		}

		decision
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::session::{TokenSecret, UserProfile};

	fn session(token: Option<&str>, is_superuser: Option<bool>) -> Session {
		let mut session = Session::default();

		if let Some(token) = token {
			session.establish(TokenSecret::new(token));
		}
		if let Some(is_superuser) = is_superuser {
			session.attach_user(UserProfile {
				id: 1,
				username: "bob".into(),
				is_active: true,
				is_superuser,
			});
		}

		session
	}

	#[test]
	fn logged_out_visitors_are_sent_to_login() {
		let decision =
			decide(&session(None, None), RouteCapabilities::ADMIN, &RedirectTargets::default());

		assert_eq!(decision, NavigationDecision::Redirect("/login".into()));
	}

	#[test]
	fn non_admins_are_downgraded_not_logged_out() {
		let decision = decide(
			&session(Some("jwt"), Some(false)),
			RouteCapabilities::ADMIN,
			&RedirectTargets::default(),
		);

		assert_eq!(decision, NavigationDecision::Redirect("/".into()));
	}

	#[test]
	fn a_bare_token_never_passes_the_admin_check() {
		// Profile missing: the token alone must not unlock the admin area.
		let decision = decide(
			&session(Some("jwt"), None),
			RouteCapabilities::ADMIN,
			&RedirectTargets::default(),
		);

		assert_eq!(decision, NavigationDecision::Redirect("/".into()));
	}

	#[test]
	fn admins_and_public_routes_are_allowed() {
		let targets = RedirectTargets::default();

		assert_eq!(
			decide(&session(Some("jwt"), Some(true)), RouteCapabilities::ADMIN, &targets),
			NavigationDecision::Allow
		);
		assert_eq!(
			decide(&session(None, None), RouteCapabilities::PUBLIC, &targets),
			NavigationDecision::Allow
		);
	}
}
