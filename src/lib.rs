//! speed-story: interactive page-speed vs. conversion chart engine.
//!
//! The crate maps load times onto a logarithmic plot axis, smooths the
//! hardcoded story dataset into bezier curves, and turns pointer movement
//! into an interpolated data row plus the narrative zone it falls in.
//! Rendering is delegated to pluggable `Renderer` backends.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{StoryEngine, StoryEngineConfig};
pub use error::{ChartError, ChartResult};
