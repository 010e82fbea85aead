//! Run loop and cross-thread handles.

pub mod app;
pub mod wake;

pub use app::Application;
pub use wake::{AppHandle, ApplyFn, EventSink, Phase, RootFactory, SuspendFn};
