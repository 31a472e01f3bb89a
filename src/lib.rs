//! Attach OAuth 2.0 bearer tokens to outgoing requests and refresh them transparently.
//!
//! A [`client::TokenClient`] obtains tokens through pluggable [`grant::GrantStrategy`]
//! implementations, keeps the current one in a [`store::TokenStore`], and checks it with a
//! [`hooks::TokenValidator`] before use. The [`interceptor::TokenInterceptor`] asks the client
//! for the current token right before a request leaves and stamps it as a bearer credential.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod grant;
pub mod hooks;
pub mod http;
pub mod interceptor;
pub mod obs;
pub mod store;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
