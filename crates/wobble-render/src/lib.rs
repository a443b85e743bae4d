//! # wobble-render
//!
//! Output side of the simulation.
//!
//! The simulation never draws anything itself. After each step it fills a
//! [`RenderBuffers`] snapshot (flat per-triangle-vertex positions and
//! normals) that an external presenter uploads as-is. The [`Renderer`]
//! trait is the seam for such presenters; [`HeadlessRenderer`] size-checks
//! frames and [`JsonFrameExporter`] records them to a JSON file.

pub mod buffers;
pub mod json_exporter;
pub mod renderer;

pub use buffers::RenderBuffers;
pub use json_exporter::JsonFrameExporter;
pub use renderer::{HeadlessRenderer, RenderFrame, Renderer};
