//! Profile record fetched from the backend's current-user endpoint.

// self
use crate::_prelude::*;

/// Profile of the authenticated user as reported by the backend.
///
/// The administrator flag is the only field the guard consumes; the rest is display
/// material for the console views. Unknown response fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Backend-assigned user identifier.
	pub id: i64,
	/// Login name.
	pub username: String,
	/// Whether the account is enabled; the backend itself rejects inactive logins.
	pub is_active: bool,
	/// Administrator flag gating the admin area.
	pub is_superuser: bool,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_decodes_and_ignores_unknown_fields() {
		let profile: UserProfile = serde_json::from_str(
			r#"{"id":7,"username":"admin","is_active":true,"is_superuser":true,"vms":[]}"#,
		)
		.expect("Profile fixture should decode.");

		assert_eq!(profile.username, "admin");
		assert!(profile.is_superuser);
	}

	#[test]
	fn profile_rejects_a_missing_administrator_flag() {
		let result = serde_json::from_str::<UserProfile>(
			r#"{"id":7,"username":"admin","is_active":true}"#,
		);

		assert!(result.is_err());
	}
}
