//! Demonstrates assembling the strategy registry an engine consumes at startup and routing
//! an incoming callback request to the right strategy.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use oauth2_trackvia::{
	provider::{RequestState, Strategy, StrategyRegistry},
	trackvia::Trackvia,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let registry = StrategyRegistry::new()
		.register(Arc::new(Trackvia::new("demo-client").with_client_secret("super-secret")))?;
	let strategy = registry
		.route("/auth/trackvia/callback")
		.expect("Default TrackVia callback path should route.");

	println!("routed provider: {}.", strategy.config().name);
	println!("authorize url: {}.", strategy.config().authorize_url);
	println!("token url: {}.", strategy.config().token_url);

	// Engines may let the request or session carry an explicit callback-url override.
	let request =
		RequestState::new().with_param("callback_url", "https://foo.dev/auth/trackvia/foobar");

	println!("callback path: {}.", strategy.callback_path());
	println!("callback override: {:?}.", strategy.callback_url(&request));

	Ok(())
}
