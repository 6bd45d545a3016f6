//! nnanim Batch Renderer
//!
//! Renders every scene file in a directory through an external renderer
//! (manim by default), one process per scene.
//!
//! # Flow
//!
//! ```text
//! animations/ ── discover ──► [a.py, b.py, c.py]
//!                                  │
//!                                  ▼
//!                 for each scene: renderer <scene> -qh
//!                                  │
//!                                  ▼
//!                 RenderResult per scene ──► BatchReport
//! ```
//!
//! A scene that fails to render, or whose renderer cannot be started, is
//! recorded and the batch continues. Only an unreadable scene directory
//! stops the run.

pub mod batch;
pub mod discovery;
pub mod renderer;
pub mod report;

pub use batch::*;
pub use discovery::*;
pub use renderer::*;
pub use report::*;
