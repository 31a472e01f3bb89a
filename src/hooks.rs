//! Pluggable collaborators consulted by the token client: response extraction and token
//! validation.

mod extractor;
mod validator;

pub use extractor::*;
pub use validator::*;
