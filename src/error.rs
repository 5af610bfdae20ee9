//! Session-layer error types shared across the credential store, gateway, and guard.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical session-layer error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Login was rejected before a token was issued; the session is untouched.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport or backend failure passed through unmodified.
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Profile refresh failed while a token existed; the session has already been reset.
	#[error(transparent)]
	SessionExpired(#[from] SessionExpiredError),
	/// Durable-storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
}

/// Login-time failures. None of these mutate the session: login never partially succeeds
/// before a token is issued.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The backend rejected the submitted credentials.
	#[error("Backend rejected the credentials: {reason}.")]
	RejectedCredentials {
		/// Backend-supplied reason, usually the response body.
		reason: String,
		/// HTTP status code returned by the login endpoint.
		status: u16,
	},
	/// The issuance response carried an empty access token.
	#[error("Login response is missing a usable access token.")]
	MissingAccessToken,
}

/// Configuration and validation failures raised while assembling the session layer.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Backend base URL cannot carry endpoint paths.
	#[error("Backend base URL `{base}` cannot serve as a base for endpoint paths.")]
	OpaqueBase {
		/// Offending base URL.
		base: String,
	},
	/// Endpoint paths are appended to the base URL and must be rooted.
	#[error("Endpoint path `{path}` must start with `/`.")]
	RelativePath {
		/// Offending endpoint path.
		path: String,
	},
	/// The per-request timeout budget must be positive.
	#[error("Timeout budget must be positive.")]
	ZeroTimeout,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport and backend failures surfaced by the request gateway.
///
/// The gateway never retries and never swallows: every non-2xx response and every transport
/// fault is passed to the caller as one of these variants.
#[derive(Debug, ThisError)]
pub enum HttpError {
	/// Backend answered with a non-2xx status.
	#[error("Backend returned HTTP {status}: {body}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body text, as returned by the backend.
		body: String,
	},
	/// A 2xx response body could not be decoded into the expected payload.
	#[error("Backend returned a malformed response body.")]
	Decode {
		/// Structured decode failure pointing at the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The fixed timeout budget elapsed before the backend answered.
	#[error("Request timed out before the backend answered.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Request URL could not be assembled from the descriptor.
	#[error("Endpoint path `{path}` cannot be joined to the backend base URL.")]
	InvalidEndpoint {
		/// Offending endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl HttpError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for HttpError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::Timeout { source: Box::new(e) }
		} else {
			Self::network(e)
		}
	}
}

/// Raised after a failed profile refresh forced a full logout.
///
/// By the time this error surfaces, the session has already been reset to the logged-out
/// state in memory and in durable storage; no caller can observe the stale token.
#[derive(Debug, ThisError)]
#[error("Session expired; the profile refresh failed and the session was reset.")]
pub struct SessionExpiredError {
	/// The gateway failure that invalidated the session.
	#[source]
	pub source: HttpError,
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn session_expired_exposes_the_gateway_failure_as_source() {
		let expired = SessionExpiredError {
			source: HttpError::Status { status: 401, body: "Could not validate credentials".into() },
		};
		let error: Error = expired.into();
		let source = StdError::source(&error)
			.expect("Session-expired error should expose the gateway failure as its source.");

		assert!(matches!(error, Error::SessionExpired(_)));
		assert!(source.to_string().contains("401"));
	}

	#[test]
	fn rejected_credentials_carry_the_backend_reason() {
		let error = AuthError::RejectedCredentials {
			reason: "Incorrect username or password".into(),
			status: 401,
		};

		assert!(error.to_string().contains("Incorrect username or password"));
	}
}
