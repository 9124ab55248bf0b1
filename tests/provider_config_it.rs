// std
use std::sync::Arc;
// self
use oauth2_trackvia::{
	auth::ProviderName,
	provider::{
		ProviderConfig, ProviderConfigBuilder, ProviderConfigError, RequestState, Strategy,
		StrategyRegistry,
	},
	trackvia::{self, Trackvia},
	url::Url,
};

fn url(value: &str) -> Url {
	Url::parse(value).expect("Failed to parse test URL.")
}

fn builder(name: &str) -> ProviderConfigBuilder {
	let provider_name =
		ProviderName::new(name).expect("Failed to build provider name for config tests.");

	ProviderConfig::builder(provider_name)
}

#[test]
fn builder_rejects_missing_and_insecure_endpoints() {
	let err = builder("mock")
		.authorize_url(url("https://example.com/oauth/authorize"))
		.token_url(url("https://example.com/oauth/token"))
		.user_info_path("users")
		.build()
		.expect_err("Builder should reject a missing site root.");

	assert!(matches!(err, ProviderConfigError::MissingSite));

	let err = builder("mock")
		.site(url("https://example.com"))
		.token_url(url("https://example.com/oauth/token"))
		.user_info_path("users")
		.build()
		.expect_err("Builder should reject a missing authorization endpoint.");

	assert!(matches!(err, ProviderConfigError::MissingAuthorizeUrl));

	let err = builder("mock")
		.site(url("https://example.com"))
		.authorize_url(url("http://example.com/oauth/authorize"))
		.token_url(url("https://example.com/oauth/token"))
		.user_info_path("users")
		.build()
		.expect_err("Builder should reject insecure authorization endpoints.");

	assert!(matches!(
		err,
		ProviderConfigError::InsecureEndpoint { endpoint: "authorization", .. },
	));
}

#[test]
fn builder_constrains_the_user_info_path() {
	let err = builder("mock")
		.site(url("https://example.com"))
		.authorize_url(url("https://example.com/oauth/authorize"))
		.token_url(url("https://example.com/oauth/token"))
		.build()
		.expect_err("Builder should reject an empty user info path.");

	assert!(matches!(err, ProviderConfigError::EmptyUserInfoPath));

	let err = builder("mock")
		.site(url("https://example.com"))
		.authorize_url(url("https://example.com/oauth/authorize"))
		.token_url(url("https://example.com/oauth/token"))
		.user_info_path("https://elsewhere.example.com/users")
		.build()
		.expect_err("Builder should reject absolute user info paths.");

	assert!(matches!(err, ProviderConfigError::AbsoluteUserInfoPath { .. }));
}

#[test]
fn builder_constrains_callback_path_overrides() {
	let err = builder("mock")
		.site(url("https://example.com"))
		.authorize_url(url("https://example.com/oauth/authorize"))
		.token_url(url("https://example.com/oauth/token"))
		.user_info_path("users")
		.callback_path("auth/mock/return")
		.build()
		.expect_err("Builder should reject relative callback overrides.");

	assert!(matches!(err, ProviderConfigError::InvalidCallbackPath { .. }));

	let config = builder("mock")
		.site(url("https://example.com"))
		.authorize_url(url("https://example.com/oauth/authorize"))
		.token_url(url("https://example.com/oauth/token"))
		.user_info_path("users")
		.callback_path("/auth/mock/return")
		.build()
		.expect("Rooted callback overrides should validate.");

	assert_eq!(config.callback_path.as_deref(), Some("/auth/mock/return"));
}

#[test]
fn stock_trackvia_configuration_matches_the_provider() {
	let strategy = Trackvia::new("appid");
	let config = strategy.config();

	assert_eq!(config.name.as_ref(), trackvia::PROVIDER_NAME);
	assert_eq!(config.site.as_str(), "https://go.trackvia.com/");
	assert_eq!(config.authorize_url.as_str(), trackvia::AUTHORIZE_URL);
	assert_eq!(config.token_url.as_str(), trackvia::TOKEN_URL);
	assert_eq!(config.user_info_path, trackvia::USER_INFO_PATH);
	assert_eq!(config.callback_path, None);
}

#[test]
fn callback_path_honors_the_configuration_override() {
	let strategy = Trackvia::new("appid");

	assert_eq!(strategy.callback_path(), "/auth/trackvia/callback");

	let config = builder("trackvia")
		.site(url("https://go.trackvia.com"))
		.authorize_url(url("https://go.trackvia.com/oauth/authorize"))
		.token_url(url("https://go.trackvia.com/oauth/token"))
		.user_info_path("users")
		.callback_path("/sso/trackvia/return")
		.build()
		.expect("Override configuration should validate.");
	let overridden = Trackvia::new("appid").with_config(config);

	assert_eq!(overridden.callback_path(), "/sso/trackvia/return");
}

#[test]
fn registry_routes_default_and_overridden_paths() {
	let registry = StrategyRegistry::new()
		.register(Arc::new(Trackvia::new("appid")))
		.expect("Registration should succeed.");

	assert_eq!(registry.len(), 1);
	assert!(registry.route("/auth/trackvia/callback").is_some());
	assert!(registry.route("/auth/trackvia").is_none());

	let request = RequestState::new()
		.with_param("callback_url", "https://foo.dev/auth/trackvia/foobar");
	let strategy =
		registry.get("trackvia").expect("Registered strategy should be retrievable by name.");

	assert_eq!(
		strategy.callback_url(&request).as_deref(),
		Some("https://foo.dev/auth/trackvia/foobar"),
	);
	assert_eq!(strategy.callback_url(&RequestState::new()), None);
	// An override in request state never rewrites the routing path itself.
	assert_eq!(strategy.callback_path(), "/auth/trackvia/callback");
}
