//! Demonstrates resolving a normalized TrackVia identity with the default reqwest transport,
//! using a mock provider so the walkthrough runs without live credentials.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use oauth2_trackvia::{
	adapter::Adapter,
	auth::{AccessToken, ProviderName},
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::ProviderConfig,
	reqwest::Client,
	trackvia::Trackvia,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let users_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/users").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":10000,\"username\":\"testuser\",\"email\":\"example@trackvia.com\"}",
			);
		})
		.await;
	let config = ProviderConfig::builder(ProviderName::new("trackvia")?)
		.site(Url::parse(&server.base_url())?)
		.authorize_url(Url::parse(&server.url("/oauth/authorize"))?)
		.token_url(Url::parse(&server.url("/oauth/token"))?)
		.user_info_path("users")
		.build()?;
	let strategy = Arc::new(
		Trackvia::new("demo-client").with_client_secret("super-secret").with_config(config),
	);
	// The engine would hand this over after finishing the code exchange; TrackVia embeds
	// the canonical user identifier in the token response itself.
	let token_params = match json!({ "oauth_id": "demo-oauth-id", "token_type": "bearer" }) {
		Value::Object(map) => map,
		_ => unreachable!(),
	};
	let token = AccessToken::new("demo-access").with_params(token_params);
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let adapter = <Adapter<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		strategy,
		token,
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	);
	let info = adapter.info().await?;
	let extra = adapter.extra().await?;

	println!("uid: {:?}.", adapter.uid());
	println!("name: {:?}, email: {:?}.", info.name, info.email);
	println!("raw profile keys: {:?}.", extra.raw_info.keys().collect::<Vec<_>>());

	users_mock.assert_async().await;

	Ok(())
}
