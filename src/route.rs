//! Declarative route metadata consumed by the navigation guard.

// self
use crate::_prelude::*;

/// Capability flags declared on a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCapabilities {
	/// Route requires an authenticated session.
	pub requires_auth: bool,
	/// Route additionally requires the administrator flag.
	pub requires_admin: bool,
}
impl RouteCapabilities {
	/// Requires an authenticated session with the administrator flag.
	pub const ADMIN: Self = Self { requires_auth: true, requires_admin: true };
	/// Requires an authenticated session.
	pub const AUTHENTICATED: Self = Self { requires_auth: true, requires_admin: false };
	/// Open to everyone; declares neither flag.
	pub const PUBLIC: Self = Self { requires_auth: false, requires_admin: false };
}

/// A registered route prefix and its capabilities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
	/// Path prefix this declaration covers, including nested child routes.
	pub prefix: String,
	/// Capability flags for the prefix.
	pub capabilities: RouteCapabilities,
}

/// Longest-prefix route table.
///
/// A declaration covers its own path and everything nested under it, so `/admin` also
/// gates `/admin/vms`. Paths matching no declaration carry no capabilities.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
	routes: Vec<Route>,
}
impl RouteTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// The route table of the admin console this layer was built for: a public login
	/// view, an admin area, and an authenticated user area covering everything else.
	pub fn console_defaults() -> Self {
		Self::new()
			.declare("/login", RouteCapabilities::PUBLIC)
			.declare("/admin", RouteCapabilities::ADMIN)
			.declare("/", RouteCapabilities::AUTHENTICATED)
	}

	/// Declares a prefix with the provided capabilities.
	pub fn declare(mut self, prefix: impl Into<String>, capabilities: RouteCapabilities) -> Self {
		self.routes.push(Route { prefix: prefix.into(), capabilities });

		self
	}

	/// Resolves the capabilities of a target path via longest-prefix match.
	pub fn resolve(&self, path: &str) -> RouteCapabilities {
		self.routes
			.iter()
			.filter(|route| Self::covers(&route.prefix, path))
			.max_by_key(|route| route.prefix.len())
			.map(|route| route.capabilities)
			.unwrap_or_default()
	}

	fn covers(prefix: &str, path: &str) -> bool {
		if prefix == "/" {
			return path.starts_with('/');
		}

		path == prefix
			|| path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
	}
}

/// Transient description of a pending route transition; exists only for the duration of
/// one guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
	/// Path the client wants to navigate to.
	pub target: String,
	/// Path the client is navigating away from, when known.
	pub source: Option<String>,
}
impl NavigationRequest {
	/// Describes a transition to the target path.
	pub fn to(target: impl Into<String>) -> Self {
		Self { target: target.into(), source: None }
	}

	/// Attaches the source path the transition originates from.
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn longest_prefix_wins() {
		let table = RouteTable::console_defaults();

		assert_eq!(table.resolve("/admin/vms"), RouteCapabilities::ADMIN);
		assert_eq!(table.resolve("/admin"), RouteCapabilities::ADMIN);
		assert_eq!(table.resolve("/login"), RouteCapabilities::PUBLIC);
		assert_eq!(table.resolve("/"), RouteCapabilities::AUTHENTICATED);
		assert_eq!(table.resolve("/vnc/pve1/101"), RouteCapabilities::AUTHENTICATED);
	}

	#[test]
	fn prefixes_cover_children_but_not_lookalikes() {
		let table = RouteTable::new().declare("/admin", RouteCapabilities::ADMIN);

		assert_eq!(table.resolve("/admin/users"), RouteCapabilities::ADMIN);
		assert_eq!(table.resolve("/administrator"), RouteCapabilities::default());
	}

	#[test]
	fn undeclared_paths_carry_no_capabilities() {
		let table = RouteTable::new().declare("/login", RouteCapabilities::PUBLIC);

		assert_eq!(table.resolve("/health"), RouteCapabilities::default());
	}
}
