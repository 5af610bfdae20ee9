//! Optional observability helpers for session actions.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `console_session.action` with the `action`
//!   (session action) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `console_session_action_total` counter for every
//!   attempt/success/failure, labeled by `action` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Session actions observed by this layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
	/// Credential exchange at the login endpoint.
	Login,
	/// Profile refresh from the current-user endpoint.
	FetchProfile,
	/// Session teardown.
	Logout,
	/// Navigation guard evaluation.
	Guard,
}
impl ActionKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ActionKind::Login => "login",
			ActionKind::FetchProfile => "fetch_profile",
			ActionKind::Logout => "logout",
			ActionKind::Guard => "guard",
		}
	}
}
impl Display for ActionKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
	/// Entry to a session action.
	Attempt,
	/// Successful completion; for the guard, an allowed navigation.
	Success,
	/// Failure propagated back to the caller; for the guard, a redirected navigation.
	Failure,
}
impl ActionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ActionOutcome::Attempt => "attempt",
			ActionOutcome::Success => "success",
			ActionOutcome::Failure => "failure",
		}
	}
}
impl Display for ActionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
