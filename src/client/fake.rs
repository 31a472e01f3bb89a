//! In-process transport that records token requests and replays a canned response.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
};
use parking_lot::Mutex;
// self
use crate::{_prelude::*, client::TokenClientOptions, http::TokenHttpClient};

pub(crate) fn options(client_id: &str, client_secret: &str) -> TokenClientOptions {
	TokenClientOptions::new(
		Url::parse("https://auth.example.com/oauth/token")
			.expect("Failed to parse fake token endpoint."),
		client_id,
		client_secret,
	)
}

#[derive(Debug)]
pub(crate) struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Fake token endpoint is unreachable.")
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
	pub(crate) method: String,
	pub(crate) uri: String,
	pub(crate) headers: HeaderMap,
	pub(crate) body: String,
}
impl RecordedRequest {
	pub(crate) fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}
}

#[derive(Clone, Debug)]
pub(crate) struct FakeHttpClient {
	status: u16,
	body: String,
	headers: Vec<(&'static str, &'static str)>,
	unreachable: bool,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl FakeHttpClient {
	pub(crate) fn responding(status: u16, body: &str) -> Self {
		Self {
			status,
			body: body.to_owned(),
			headers: Vec::new(),
			unreachable: false,
			requests: Default::default(),
		}
	}

	pub(crate) fn unreachable() -> Self {
		Self { unreachable: true, ..Self::responding(200, "") }
	}

	pub(crate) fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
		self.headers.push((name, value));

		self
	}

	pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}

	pub(crate) fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	fn respond(
		&self,
		request: HttpRequest,
	) -> Result<HttpResponse, HttpClientError<FakeTransportError>> {
		self.requests.lock().push(RecordedRequest {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			headers: request.headers().clone(),
			body: String::from_utf8_lossy(request.body()).into_owned(),
		});

		if self.unreachable {
			return Err(HttpClientError::Reqwest(Box::new(FakeTransportError)));
		}

		let mut response = HttpResponse::new(self.body.clone().into_bytes());

		*response.status_mut() =
			StatusCode::from_u16(self.status).expect("Fake status code should be valid.");

		for &(name, value) in &self.headers {
			response
				.headers_mut()
				.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
		}

		Ok(response)
	}
}
impl<'c> AsyncHttpClient<'c> for FakeHttpClient {
	type Error = HttpClientError<FakeTransportError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let outcome = self.respond(request);

		Box::pin(async move { outcome })
	}
}
impl TokenHttpClient for FakeHttpClient {
	type Handle = FakeHttpClient;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		self.clone()
	}
}
