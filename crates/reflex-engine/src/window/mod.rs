//! Native host: a `winit` window as the surface, `glutin` for the context.
//!
//! Owns the event loop and drives one renderer per run.

mod app;
mod native;
mod runtime;

pub use app::{App, AppControl};
pub use native::{NativeProvider, NativeRenderer, NativeSurface};
pub use runtime::{Runtime, RuntimeConfig};
