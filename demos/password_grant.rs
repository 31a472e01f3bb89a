//! Demonstrates obtaining a token with the password grant, then calling a protected resource
//! through the interceptor-backed reqwest client.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use oauth2_interceptor::{
	client::{TokenClient, TokenClientOptions},
	grant::PasswordGrant,
	interceptor::{AuthorizedClient, TokenInterceptor},
	store::{MemoryStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.body("grant_type=password&username=demo&password=hunter2&scope=profile");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"refresh_token\":\"demo-refresh\",\"token_type\":\"bearer\"}",
			);
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/profile").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body("{\"name\":\"demo\"}");
		})
		.await;
	let store = Arc::new(MemoryStore::default());
	let options =
		TokenClientOptions::new(Url::parse(&server.url("/token"))?, "demo-client", "super-secret")
			.with_store(store.clone());
	let client = TokenClient::new(options)?;
	let token =
		client.request_token_and_save(&PasswordGrant::new("demo", "hunter2", ["profile"])).await?;

	println!("Obtained token: {token:?}.");

	let resource = AuthorizedClient::new(TokenInterceptor::new(client));
	let profile = resource.get(server.url("/profile")).await?.send().await?.text().await?;

	println!("Profile: {profile}.");

	token_mock.assert_async().await;
	profile_mock.assert_async().await;

	store.clear().await?;

	Ok(())
}
