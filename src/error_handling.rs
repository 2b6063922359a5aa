pub mod types;

pub use types::{ConfigError, FetchError, SessionError, WebError};
