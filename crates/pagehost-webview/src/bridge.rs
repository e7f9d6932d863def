//! Messaging bridges between the host and the embedded page.
//!
//! - [`HostToPageBridge`]: host calls named page functions.
//! - [`PageToHostBridge`]: page requests routed to a [`RequestHandler`],
//!   plus the bootstrap script run whenever the page becomes ready.
//! - [`Disposer`]: releases bridges together with their owner.

mod disposer;
mod inbound;
mod outbound;
mod router;

pub use disposer::{Disposable, Disposer};
pub use inbound::PageToHostBridge;
pub use outbound::HostToPageBridge;
pub use router::{RequestHandler, RequestRouter};
