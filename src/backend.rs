//! Backend descriptor describing the console API surface consumed by the session layer.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default relative path of the token-issuance endpoint.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login/access-token";
/// Default relative path of the current-user endpoint.
pub const DEFAULT_PROFILE_PATH: &str = "/users/me";
/// Default per-request timeout budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable description of the backend the gateway talks to.
///
/// Endpoint paths are appended verbatim to the base URL, so a base of
/// `https://console.example.com/api/v1` resolves the profile endpoint to
/// `https://console.example.com/api/v1/users/me`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendDescriptor {
	/// Base URL every endpoint path is appended to.
	pub base: Url,
	/// Relative path of the token-issuance endpoint.
	pub login_path: String,
	/// Relative path of the current-user endpoint.
	pub profile_path: String,
	/// Fixed timeout budget applied to every request.
	pub timeout: Duration,
}
impl BackendDescriptor {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base: Url) -> BackendDescriptorBuilder {
		BackendDescriptorBuilder::new(base)
	}

	/// Resolves an endpoint path against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, crate::error::HttpError> {
		let joined = format!("{}{path}", self.base.as_str().trim_end_matches('/'));

		Url::parse(&joined).map_err(|e| crate::error::HttpError::InvalidEndpoint {
			path: path.to_owned(),
			source: e,
		})
	}
}

/// Builder for [`BackendDescriptor`] values.
#[derive(Clone, Debug)]
pub struct BackendDescriptorBuilder {
	/// Base URL every endpoint path is appended to.
	pub base: Url,
	/// Relative path of the token-issuance endpoint.
	pub login_path: String,
	/// Relative path of the current-user endpoint.
	pub profile_path: String,
	/// Fixed timeout budget applied to every request.
	pub timeout: Duration,
}
impl BackendDescriptorBuilder {
	/// Creates a new builder seeded with the default console paths and timeout.
	pub fn new(base: Url) -> Self {
		Self {
			base,
			login_path: DEFAULT_LOGIN_PATH.into(),
			profile_path: DEFAULT_PROFILE_PATH.into(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Overrides the token-issuance endpoint path.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Overrides the current-user endpoint path.
	pub fn profile_path(mut self, path: impl Into<String>) -> Self {
		self.profile_path = path.into();

		self
	}

	/// Overrides the per-request timeout budget.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<BackendDescriptor, ConfigError> {
		if self.base.cannot_be_a_base() {
			return Err(ConfigError::OpaqueBase { base: self.base.to_string() });
		}
		if !self.login_path.starts_with('/') {
			return Err(ConfigError::RelativePath { path: self.login_path });
		}
		if !self.profile_path.starts_with('/') {
			return Err(ConfigError::RelativePath { path: self.profile_path });
		}
		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		Ok(BackendDescriptor {
			base: self.base,
			login_path: self.login_path,
			profile_path: self.profile_path,
			timeout: self.timeout,
		})
	}
}
