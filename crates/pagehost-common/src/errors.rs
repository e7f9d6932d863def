use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures reported by a browser surface implementation.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("browser engine error: {0}")]
    Engine(String),

    #[error("browser surface is closed")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("bridge has been disposed")]
    Disposed,

    #[error("bridge is busy handling a page request")]
    Busy,
}

/// Errors returned by page request handlers. Sent back to the page as the
/// rejection reason of the originating request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("no handler registered for request kind '{0}'")]
    UnknownKind(String),

    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("invalid scheme host: {0}")]
    InvalidHost(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Scheme(#[from] SchemeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("page.scheme is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: page.scheme is empty"
        );
    }

    #[test]
    fn surface_error_display() {
        let err = SurfaceError::Engine("webview crashed".into());
        assert_eq!(err.to_string(), "browser engine error: webview crashed");
        assert_eq!(SurfaceError::Closed.to_string(), "browser surface is closed");
    }

    #[test]
    fn bridge_error_from_surface() {
        let err: BridgeError = SurfaceError::Closed.into();
        assert!(matches!(err, BridgeError::Surface(_)));
        assert_eq!(err.to_string(), "browser surface is closed");
    }

    #[test]
    fn request_error_display() {
        let err = RequestError::UnknownKind("openFile".into());
        assert_eq!(
            err.to_string(),
            "no handler registered for request kind 'openFile'"
        );
        assert_eq!(RequestError::Failed("boom".into()).to_string(), "boom");
    }

    #[test]
    fn host_error_from_variants() {
        let err: HostError = SchemeError::InvalidScheme("HTTP".into()).into();
        assert!(matches!(err, HostError::Scheme(_)));
        assert!(err.to_string().contains("HTTP"));

        let err: HostError = BridgeError::Disposed.into();
        assert!(matches!(err, HostError::Bridge(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HostError = io_err.into();
        assert!(matches!(err, HostError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
