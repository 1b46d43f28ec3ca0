//! Notification adapters

mod desktop;
mod noop;

pub use desktop::DesktopNotifier;
pub use noop::NoopNotifier;
