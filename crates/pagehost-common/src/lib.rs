pub mod errors;
pub mod types;

pub use errors::{BridgeError, ConfigError, HostError, RequestError, SchemeError, SurfaceError};
pub use types::{Appearance, Color};

pub type Result<T> = std::result::Result<T, HostError>;
