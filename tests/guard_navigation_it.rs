// crates.io
use httpmock::prelude::*;
// self
use console_session::{
	_preludet::*,
	guard::{NavigationDecision, NavigationGuard},
	route::{NavigationRequest, RouteTable},
	session::CredentialStore,
};

const PROFILE_PATH: &str = "/users/me";
const ADMIN_PROFILE: &str = r#"{"id":1,"username":"admin","is_active":true,"is_superuser":true}"#;
const USER_PROFILE: &str = r#"{"id":2,"username":"bob","is_active":true,"is_superuser":false}"#;

async fn build_guard(
	server: &MockServer,
	seeded_token: Option<&str>,
) -> (NavigationGuard, CredentialStore) {
	let (credentials, _store_backend) = match seeded_token {
		Some(token) => build_seeded_credentials(&server.base_url(), token).await,
		None => build_test_credentials(&server.base_url()).await,
	};
	let guard = NavigationGuard::new(credentials.clone(), RouteTable::console_defaults());

	(guard, credentials)
}

#[tokio::test]
async fn logged_out_visitors_are_redirected_to_login() {
	let server = MockServer::start_async().await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "application/json").body(ADMIN_PROFILE);
		})
		.await;
	let (guard, _credentials) = build_guard(&server, None).await;
	let decision = guard.evaluate(&NavigationRequest::to("/admin/dashboard")).await;

	assert_eq!(decision, NavigationDecision::Redirect("/login".into()));

	// No token means no profile fetch is even attempted.
	profile_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn persisted_admin_fetches_the_profile_once_then_allows() {
	let server = MockServer::start_async().await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH).header("authorization", "Bearer persisted-jwt");
			then.status(200).header("content-type", "application/json").body(ADMIN_PROFILE);
		})
		.await;
	let (guard, _credentials) = build_guard(&server, Some("persisted-jwt")).await;
	let first = guard.evaluate(&NavigationRequest::to("/admin/vms")).await;
	let second = guard
		.evaluate(&NavigationRequest::to("/admin/users").with_source("/admin/vms"))
		.await;

	assert_eq!(first, NavigationDecision::Allow);
	assert_eq!(second, NavigationDecision::Allow);

	// The cached profile serves every later evaluation.
	profile_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn authenticated_non_admins_are_downgraded_to_the_user_area() {
	let server = MockServer::start_async().await;
	let _profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "application/json").body(USER_PROFILE);
		})
		.await;
	let (guard, credentials) = build_guard(&server, Some("persisted-jwt")).await;
	let decision = guard.evaluate(&NavigationRequest::to("/admin/users")).await;

	// A privilege downgrade, not a login redirect: the session stays alive.
	assert_eq!(decision, NavigationDecision::Redirect("/".into()));
	assert!(credentials.is_authenticated());
}

#[tokio::test]
async fn expired_sessions_are_redirected_to_login_and_reset() {
	let server = MockServer::start_async().await;
	let _profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(401).body(r#"{"detail":"Could not validate credentials"}"#);
		})
		.await;
	let (guard, credentials) = build_guard(&server, Some("expired-jwt")).await;
	let decision = guard.evaluate(&NavigationRequest::to("/")).await;

	assert_eq!(decision, NavigationDecision::Redirect("/login".into()));
	assert!(!credentials.is_authenticated());
	assert!(credentials.snapshot().token().is_none());
}

#[tokio::test]
async fn concurrent_evaluations_share_one_profile_fetch() {
	let server = MockServer::start_async().await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "application/json").body(ADMIN_PROFILE);
		})
		.await;
	let (guard, _credentials) = build_guard(&server, Some("persisted-jwt")).await;
	let vms_request = NavigationRequest::to("/admin/vms");
	let root_request = NavigationRequest::to("/");
	let (first, second) = tokio::join!(guard.evaluate(&vms_request), guard.evaluate(&root_request),);

	assert_eq!(first, NavigationDecision::Allow);
	assert_eq!(second, NavigationDecision::Allow);

	profile_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn the_login_route_stays_open_to_everyone() {
	let server = MockServer::start_async().await;
	let (guard, _credentials) = build_guard(&server, None).await;
	let decision = guard.evaluate(&NavigationRequest::to("/login")).await;

	assert_eq!(decision, NavigationDecision::Allow);
}
