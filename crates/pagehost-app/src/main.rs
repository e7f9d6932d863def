mod app_state;
mod cli;

use std::process::ExitCode;

use pagehost_common::ConfigError;
use pagehost_config::{toml_loader, PageHostConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};
use winit::event_loop::EventLoop;

use crate::cli::Args;

/// Filter used until the config is loaded.
const DEFAULT_DIRECTIVE: &str = "pagehost=info";

fn load_config(args: &Args) -> Result<PageHostConfig, ConfigError> {
    match &args.config {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Startup filter: `--log-level`, then `RUST_LOG`, then the default.
fn initial_filter(args: &Args) -> EnvFilter {
    match &args.log_level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

/// Directive from the config file, applied only when neither the CLI nor
/// `RUST_LOG` chose a filter.
fn config_directive(args: &Args, rust_log_set: bool, config: &PageHostConfig) -> Option<String> {
    if args.log_level.is_some() || rust_log_set {
        return None;
    }
    Some(config.logging.directive())
}

fn main() -> ExitCode {
    let args = cli::parse();

    let (filter, filter_handle) = reload::Layer::new(initial_filter(&args));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    tracing::info!("pagehost v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args) {
        Ok(config) => {
            tracing::info!(url = %config.page.bootstrap_url(), "config loaded");
            config
        }
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e}");
            PageHostConfig::default()
        }
    };

    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if let Some(directive) = config_directive(&args, rust_log_set, &config) {
        if let Err(e) = filter_handle.reload(EnvFilter::new(&directive)) {
            tracing::warn!("failed to apply log level from config: {e}");
        }
    }

    let assets_dir = args
        .assets
        .clone()
        .unwrap_or_else(|| config.page.assets_dir.clone().into());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = app_state::PageHostApp::new(config, assets_dir);

    tracing::info!("entering event loop");
    let result = event_loop.run_app(&mut app);
    tracing::info!("event loop exited");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("event loop error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    fn debug_config() -> PageHostConfig {
        let mut config = PageHostConfig::default();
        config.logging.level = "debug".into();
        config
    }

    #[test]
    fn config_level_applies_without_overrides() {
        let directive = config_directive(&args(&["pagehost"]), false, &debug_config());
        assert_eq!(directive.as_deref(), Some("pagehost=debug"));
    }

    #[test]
    fn cli_and_env_take_precedence_over_config() {
        let cli = args(&["pagehost", "--log-level", "pagehost=trace"]);
        assert!(config_directive(&cli, false, &debug_config()).is_none());
        assert!(config_directive(&args(&["pagehost"]), true, &debug_config()).is_none());
    }

    #[test]
    fn loader_warnings_reach_the_installed_subscriber() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[page]\nscheme = \"http\"\n").unwrap();
        let cli = args(&["pagehost", "--config", path.to_str().unwrap()]);

        let capture = Capture::default();
        let writer = capture.clone();
        let (filter, _handle) = reload::Layer::new(EnvFilter::new(DEFAULT_DIRECTIVE));
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );

        let config = tracing::subscriber::with_default(subscriber, || load_config(&cli)).unwrap();
        assert_eq!(config.page.scheme, "http");

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("config validation warning"), "{output}");
    }
}
