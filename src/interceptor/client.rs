// crates.io
use reqwest::{IntoUrl, Method, RequestBuilder, Response, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::TokenHttpClient,
	interceptor::TokenInterceptor,
};

/// Wrapper around [`ReqwestClient`] that runs a [`TokenInterceptor`] before every request.
///
/// Designed to be a mostly drop-in replacement for [`ReqwestClient`].
pub struct AuthorizedClient<C>
where
	C: TokenHttpClient,
{
	interceptor: TokenInterceptor<C>,
	client: ReqwestClient,
}
impl<C> AuthorizedClient<C>
where
	C: TokenHttpClient,
{
	/// Creates a client that authorizes requests with `interceptor`.
	pub fn new(interceptor: TokenInterceptor<C>) -> Self {
		Self { interceptor, client: ReqwestClient::new() }
	}

	/// Sets a custom [`ReqwestClient`] for resource requests.
	pub fn set_client(mut self, client: ReqwestClient) -> Self {
		self.client = client;

		self
	}

	/// Interceptor consulted before each request.
	pub fn interceptor(&self) -> &TokenInterceptor<C> {
		&self.interceptor
	}

	/// Starts building a request with the current bearer token already attached.
	///
	/// The token is resolved here, when the builder is created, not when it is sent. Use
	/// [`send`](Self::send) or [`execute`](Self::execute) to resolve it at send time, for
	/// example when the builder may sit around long enough for the token to go stale.
	///
	/// # Errors
	///
	/// Fails when the interceptor cannot provide a token, typically because a refresh failed.
	pub async fn request<U: IntoUrl>(&self, method: Method, url: U) -> Result<RequestBuilder> {
		let builder = self.client.request(method, url);

		Ok(match self.interceptor.authorization_header().await? {
			Some(value) => builder.header(AUTHORIZATION, value),
			None => builder,
		})
	}

	/// Runs the interceptor on `request`, then executes it.
	///
	/// # Errors
	///
	/// - Fails when the interceptor cannot provide a token.
	/// - Fails with [`TransportError::Network`] when the request itself fails.
	pub async fn execute(&self, request: reqwest::Request) -> Result<Response> {
		let request = self.interceptor.intercept(request).await?;

		self.client.execute(request).await.map_err(|e| TransportError::from(e).into())
	}

	/// Builds `builder` and executes it through the interceptor, resolving the token at send
	/// time.
	///
	/// # Errors
	///
	/// See [`execute`](Self::execute); invalid builders fail with [`TransportError::Network`].
	pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
		let request = builder.build().map_err(TransportError::from)?;

		self.execute(request).await
	}

	/// Convenience method to start a `GET` request.
	///
	/// # Errors
	///
	/// See [`request`](Self::request).
	pub async fn get<U: IntoUrl>(&self, url: U) -> Result<RequestBuilder> {
		self.request(Method::GET, url).await
	}

	/// Convenience method to start a `POST` request.
	///
	/// # Errors
	///
	/// See [`request`](Self::request).
	pub async fn post<U: IntoUrl>(&self, url: U) -> Result<RequestBuilder> {
		self.request(Method::POST, url).await
	}

	/// Convenience method to start a `PUT` request.
	///
	/// # Errors
	///
	/// See [`request`](Self::request).
	pub async fn put<U: IntoUrl>(&self, url: U) -> Result<RequestBuilder> {
		self.request(Method::PUT, url).await
	}

	/// Convenience method to start a `DELETE` request.
	///
	/// # Errors
	///
	/// See [`request`](Self::request).
	pub async fn delete<U: IntoUrl>(&self, url: U) -> Result<RequestBuilder> {
		self.request(Method::DELETE, url).await
	}
}
impl<C> Clone for AuthorizedClient<C>
where
	C: TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { interceptor: self.interceptor.clone(), client: self.client.clone() }
	}
}
impl<C> Debug for AuthorizedClient<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizedClient").field("interceptor", &self.interceptor).finish()
	}
}
