//! Terminal-facing UI facade.
//!
//! Orchestration code depends on the [`render::RenderSink`] contract here
//! rather than on the concrete `tui` renderer.

pub mod render;
