//! Provider configuration data structures and validation.

// self
use crate::{_prelude::*, auth::ProviderName, error::ConfigError};

/// Errors raised while constructing or validating provider configurations.
#[derive(Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ProviderConfigError {
	/// Site root is required for relative API calls.
	#[error("Missing site root.")]
	MissingSite,
	/// Authorization endpoint is required for the consent redirect.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizeUrl,
	/// Token endpoint is required for the code exchange.
	#[error("Missing token endpoint.")]
	MissingTokenUrl,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// User-info path must be present.
	#[error("User info path cannot be empty.")]
	EmptyUserInfoPath,
	/// User-info path must stay relative to the site root.
	#[error("User info path must be relative to the site root: {path}.")]
	AbsoluteUserInfoPath {
		/// Path that failed validation.
		path: String,
	},
	/// Callback-path overrides are rooted paths.
	#[error("Callback path override must start with `/`: {path}.")]
	InvalidCallbackPath {
		/// Path that failed validation.
		path: String,
	},
}

/// Immutable provider configuration consumed by the engine and the adapter.
///
/// Fixed at construction; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Registered strategy name, used for callback-path routing.
	pub name: ProviderName,
	/// Base URL for relative API calls.
	pub site: Url,
	/// Full URL the engine redirects the end user to for consent.
	pub authorize_url: Url,
	/// Full URL the engine POSTs to for the code exchange.
	pub token_url: Url,
	/// Site-relative path of the provider's current-user endpoint.
	pub user_info_path: String,
	/// Optional override of the default `/auth/<name>/callback` path.
	pub callback_path: Option<String>,
}
impl ProviderConfig {
	/// Creates a new builder for the provided strategy name.
	pub fn builder(name: ProviderName) -> ProviderConfigBuilder {
		ProviderConfigBuilder::new(name)
	}

	/// Resolves the user-info endpoint against the site root.
	pub fn user_info_url(&self) -> Result<Url> {
		self.site
			.join(&self.user_info_path)
			.map_err(|source| ConfigError::InvalidUserInfoUrl { source }.into())
	}
}

/// Builder for [`ProviderConfig`] values.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
	/// Name of the configuration being constructed.
	pub name: ProviderName,
	/// Optional site root (required at build time).
	pub site: Option<Url>,
	/// Optional authorization endpoint (required at build time).
	pub authorize_url: Option<Url>,
	/// Optional token endpoint (required at build time).
	pub token_url: Option<Url>,
	/// Site-relative user-info path.
	pub user_info_path: String,
	/// Optional callback-path override.
	pub callback_path: Option<String>,
}
impl ProviderConfigBuilder {
	/// Creates a new builder seeded with the provided name.
	pub fn new(name: ProviderName) -> Self {
		Self {
			name,
			site: None,
			authorize_url: None,
			token_url: None,
			user_info_path: String::new(),
			callback_path: None,
		}
	}

	/// Sets the site root.
	pub fn site(mut self, url: Url) -> Self {
		self.site = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorize_url(mut self, url: Url) -> Self {
		self.authorize_url = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Sets the site-relative user-info path.
	pub fn user_info_path(mut self, path: impl Into<String>) -> Self {
		self.user_info_path = path.into();

		self
	}

	/// Overrides the default callback path.
	pub fn callback_path(mut self, path: impl Into<String>) -> Self {
		self.callback_path = Some(path.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let site = self.site.ok_or(ProviderConfigError::MissingSite)?;
		let authorize_url = self.authorize_url.ok_or(ProviderConfigError::MissingAuthorizeUrl)?;
		let token_url = self.token_url.ok_or(ProviderConfigError::MissingTokenUrl)?;
		let config = ProviderConfig {
			name: self.name,
			site,
			authorize_url,
			token_url,
			user_info_path: self.user_info_path,
			callback_path: self.callback_path,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ProviderConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ProviderConfigError> {
		validate_endpoint("site", &self.site)?;
		validate_endpoint("authorization", &self.authorize_url)?;
		validate_endpoint("token", &self.token_url)?;

		if self.user_info_path.is_empty() {
			return Err(ProviderConfigError::EmptyUserInfoPath);
		}
		if self.user_info_path.contains("://") {
			return Err(ProviderConfigError::AbsoluteUserInfoPath {
				path: self.user_info_path.clone(),
			});
		}
		if let Some(path) = self.callback_path.as_ref()
			&& !path.starts_with('/')
		{
			return Err(ProviderConfigError::InvalidCallbackPath { path: path.clone() });
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderConfigError> {
	if url.scheme() != "https" {
		Err(ProviderConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
