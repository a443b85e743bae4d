//! Frame hand-off to whatever displays the simulation.
//!
//! A [`Renderer`] receives one [`RenderFrame`] per presented step. Display
//! itself is external; the renderers here check or record frames.

use serde::{Deserialize, Serialize};
use wobble_mesh::PolygonMesh;
use wobble_types::{WobbleError, WobbleResult};

use crate::buffers::RenderBuffers;

/// A single render frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Step index this frame corresponds to.
    pub step: u64,
    /// Simulated time (seconds) at this frame.
    pub sim_time: f64,
    /// Flat per-triangle-vertex positions.
    pub positions: Vec<f32>,
    /// Flat per-triangle-vertex normals.
    pub normals: Vec<f32>,
}

impl RenderFrame {
    /// Copies a frame out of the current render buffers.
    pub fn from_buffers(step: u64, sim_time: f64, buffers: &RenderBuffers) -> Self {
        Self {
            step,
            sim_time,
            positions: buffers.positions.clone(),
            normals: buffers.normals.clone(),
        }
    }
}

/// Trait for presenting simulation output.
///
/// # Implementations
/// - [`HeadlessRenderer`]: Discards frames (benchmarks, CI)
/// - [`JsonFrameExporter`](crate::json_exporter::JsonFrameExporter): Records frames to JSON
pub trait Renderer: Send {
    /// Initialize the renderer with the mesh being simulated.
    fn init(&mut self, mesh: &PolygonMesh) -> WobbleResult<()>;

    /// Submit a frame for rendering.
    fn submit_frame(&mut self, frame: &RenderFrame) -> WobbleResult<()>;

    /// Finalize rendering (flush buffers, close files, etc.).
    fn finalize(&mut self) -> WobbleResult<()>;

    /// Returns the renderer name.
    fn name(&self) -> &str;

    /// Returns the number of frames submitted.
    fn frame_count(&self) -> u32;
}

/// Headless renderer: checks frame sizes against the mesh, then drops them.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u32,
    /// Floats per buffer for the mesh given to `init`.
    expected_len: Option<usize>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, mesh: &PolygonMesh) -> WobbleResult<()> {
        self.expected_len = Some(mesh.triangle_count() * 9);
        self.frames = 0;
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> WobbleResult<()> {
        if let Some(expected) = self.expected_len {
            if frame.positions.len() != expected || frame.normals.len() != expected {
                return Err(WobbleError::InvalidMesh(format!(
                    "frame at step {} has {} position and {} normal floats, mesh needs {}",
                    frame.step,
                    frame.positions.len(),
                    frame.normals.len(),
                    expected
                )));
            }
        }
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> WobbleResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
