//! Explicit strategy registry handed to the engine at startup.

// std
use std::collections::HashMap;
// self
use crate::{_prelude::*, auth::ProviderName, provider::Strategy};

/// Errors raised while assembling a strategy registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum RegistryError {
	/// A strategy with the same name is already registered.
	#[error("Strategy `{name}` is already registered.")]
	Duplicate {
		/// Name of the conflicting strategy.
		name: String,
	},
}

/// Explicit name-to-strategy table.
///
/// Assembled once at startup and passed to the engine, replacing load-time registration
/// into process-wide mutable state. Lookups serve callback routing for the lifetime of the
/// process.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
	entries: HashMap<ProviderName, Arc<dyn Strategy>>,
}
impl StrategyRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a strategy under its configured name.
	pub fn register(mut self, strategy: Arc<dyn Strategy>) -> Result<Self, RegistryError> {
		let name = strategy.config().name.clone();

		if self.entries.contains_key(&name) {
			return Err(RegistryError::Duplicate { name: name.into() });
		}

		self.entries.insert(name, strategy);

		Ok(self)
	}

	/// Looks up a strategy by name.
	pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
		self.entries.get(name).cloned()
	}

	/// Finds the strategy whose callback path matches an incoming request path.
	pub fn route(&self, path: &str) -> Option<Arc<dyn Strategy>> {
		self.entries.values().find(|strategy| strategy.callback_path() == path).cloned()
	}

	/// Iterates over the registered names.
	pub fn names(&self) -> impl Iterator<Item = &ProviderName> {
		self.entries.keys()
	}

	/// Returns the number of registered strategies.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Checks whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
impl Debug for StrategyRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyRegistry")
			.field("names", &self.entries.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::trackvia::Trackvia;

	#[test]
	fn registry_rejects_duplicate_names() {
		let registry = StrategyRegistry::new()
			.register(Arc::new(Trackvia::new("appid")))
			.expect("First registration should succeed.");
		let err = registry
			.clone()
			.register(Arc::new(Trackvia::new("other-appid")))
			.expect_err("Duplicate registration should fail.");

		assert_eq!(err, RegistryError::Duplicate { name: "trackvia".into() });
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn registry_routes_callback_paths() {
		let registry = StrategyRegistry::new()
			.register(Arc::new(Trackvia::new("appid")))
			.expect("Registration should succeed.");
		let routed = registry
			.route("/auth/trackvia/callback")
			.expect("Default callback path should route to the strategy.");

		assert_eq!(routed.config().name.as_ref(), "trackvia");
		assert!(registry.route("/auth/unknown/callback").is_none());
		assert!(registry.get("trackvia").is_some());
		assert!(registry.get("github").is_none());
	}
}
