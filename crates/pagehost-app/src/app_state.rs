//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler`: owns the window, the
//! browser surface and the embedded page host, and feeds OS theme and focus
//! changes into the host.

mod bounds;
mod core;
mod event_handler;
mod init;
mod polling;
mod requests;
mod shutdown;

pub use self::core::PageHostApp;
