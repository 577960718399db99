//! Presentation backend and frame loop.
//!
//! `System` owns the SDL window and its OpenGL context, `TickSource` feeds
//! periodic frame ticks into the SDL event queue and `RenderLoop` turns those
//! ticks into draw + present calls until the window is closed.

pub mod error;
pub mod glutils;
pub mod render_loop;
pub mod system;
pub mod ticker;

pub use error::{BackendInitError, RenderLoopError};
pub use render_loop::{EventSource, LoopEvent, LoopState, RenderLoop, TickPolicy};
pub use system::System;
pub use ticker::{SdlEventSource, TickSource, TickTag};
