// crates.io
use oauth2::HttpResponse;
// self
use crate::{_prelude::*, auth::Token, error::ExtractionError};

/// Turns a successful token-endpoint response into a [`Token`].
///
/// Implemented for any `Fn(&HttpResponse) -> Result<Token, ExtractionError>` so one-off
/// extractors can be plain closures.
pub trait TokenExtractor: Send + Sync {
	/// Parses `response` into a token.
	fn extract(&self, response: &HttpResponse) -> Result<Token, ExtractionError>;
}
impl<F> TokenExtractor for F
where
	F: Fn(&HttpResponse) -> Result<Token, ExtractionError> + Send + Sync,
{
	fn extract(&self, response: &HttpResponse) -> Result<Token, ExtractionError> {
		self(response)
	}
}

/// Default extractor reading `access_token` and `refresh_token` from a JSON body.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonTokenExtractor;
impl TokenExtractor for JsonTokenExtractor {
	fn extract(&self, response: &HttpResponse) -> Result<Token, ExtractionError> {
		let mut de = serde_json::Deserializer::from_slice(response.body());
		let body: TokenResponseBody = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ExtractionError::Json { source })?;
		let access_token = body.access_token.ok_or(ExtractionError::MissingAccessToken)?;

		if access_token.is_empty() {
			return Err(ExtractionError::EmptyAccessToken);
		}

		let token = Token::new(access_token);

		Ok(match body.refresh_token {
			Some(refresh) if !refresh.is_empty() => token.with_refresh_token(refresh),
			_ => token,
		})
	}
}

#[derive(Deserialize)]
struct TokenResponseBody {
	access_token: Option<String>,
	refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(body: &str) -> HttpResponse {
		HttpResponse::new(body.as_bytes().to_vec())
	}

	#[test]
	fn reads_access_and_refresh_tokens() {
		let token = JsonTokenExtractor
			.extract(&response(
				"{\"access_token\":\"A2\",\"refresh_token\":\"R2\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			))
			.expect("Well-formed token response should extract.");

		assert_eq!(token.access_token(), "A2");
		assert_eq!(token.refresh_token(), Some("R2"));
	}

	#[test]
	fn refresh_token_is_optional() {
		let token = JsonTokenExtractor
			.extract(&response("{\"access_token\":\"A2\"}"))
			.expect("Token response without refresh token should extract.");

		assert_eq!(token.refresh_token(), None);
	}

	#[test]
	fn rejects_malformed_and_incomplete_bodies() {
		let err = JsonTokenExtractor
			.extract(&response("{\"access_token\":42}"))
			.expect_err("Numeric access tokens should be rejected.");

		match err {
			ExtractionError::Json { source } => assert_eq!(source.path().to_string(), "access_token"),
			other => panic!("Unexpected extraction error: {other:?}."),
		}

		assert!(matches!(
			JsonTokenExtractor.extract(&response("{\"token_type\":\"bearer\"}")),
			Err(ExtractionError::MissingAccessToken)
		));
		assert!(matches!(
			JsonTokenExtractor.extract(&response("{\"access_token\":\"\"}")),
			Err(ExtractionError::EmptyAccessToken)
		));
		assert!(matches!(
			JsonTokenExtractor.extract(&response("<html>")),
			Err(ExtractionError::Json { .. })
		));
	}

	#[test]
	fn closures_act_as_extractors() {
		let extractor = |response: &HttpResponse| {
			let raw = String::from_utf8_lossy(response.body()).into_owned();

			Ok::<_, ExtractionError>(Token::new(raw))
		};

		assert_eq!(
			TokenExtractor::extract(&extractor, &response("opaque"))
				.expect("Closure extractor should succeed.")
				.access_token(),
			"opaque"
		);
	}
}
