// self
use crate::{_prelude::*, auth::Token};

/// Boxed future returned by [`TokenValidator::validate`].
pub type ValidatorFuture<'a> = Pin<Box<dyn Future<Output = bool> + 'a + Send>>;

/// Decides whether a stored token can still be used.
///
/// Tokens carry no expiry data, so this hook is the only place where staleness is detected.
pub trait TokenValidator: Send + Sync {
	/// Returns `true` when `token` is still usable.
	fn validate<'a>(&'a self, token: &'a Token) -> ValidatorFuture<'a>;
}

/// Default validator that accepts every token.
///
/// With this validator the client never refreshes on its own; callers refresh explicitly, for
/// example after the resource server answers 401.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysValid;
impl TokenValidator for AlwaysValid {
	fn validate<'a>(&'a self, _token: &'a Token) -> ValidatorFuture<'a> {
		Box::pin(async { true })
	}
}

/// Adapter turning a synchronous predicate into a [`TokenValidator`].
pub struct FnValidator<F>(pub F);
impl<F> Debug for FnValidator<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FnValidator(..)")
	}
}
impl<F> TokenValidator for FnValidator<F>
where
	F: Fn(&Token) -> bool + Send + Sync,
{
	fn validate<'a>(&'a self, token: &'a Token) -> ValidatorFuture<'a> {
		let valid = (self.0)(token);

		Box::pin(async move { valid })
	}
}
