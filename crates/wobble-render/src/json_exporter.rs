//! JSON frame exporter: writes per-frame render buffers for inspection.
//!
//! Captures the flat position and normal buffers at each submitted frame
//! and serializes the whole animation to a JSON file on `finalize()`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wobble_mesh::PolygonMesh;
use wobble_types::{WobbleError, WobbleResult};

use crate::renderer::{RenderFrame, Renderer};

/// Complete animation data for JSON export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    /// Particle count of the source mesh.
    pub vertex_count: usize,
    /// Polygon count of the source mesh.
    pub face_count: usize,
    /// Fan triangles per frame; each frame holds `9 * triangle_count` floats
    /// per buffer.
    pub triangle_count: usize,
    pub frames: Vec<RenderFrame>,
}

impl AnimationData {
    /// Parses an animation previously written by [`JsonFrameExporter`].
    pub fn from_json_str(source: &str) -> WobbleResult<Self> {
        serde_json::from_str(source)
            .map_err(|e| WobbleError::Serialization(format!("JSON animation: {e}")))
    }
}

/// Exports simulation frames to a JSON file.
///
/// Usage:
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json");
/// exporter.init(&mesh)?;
/// // ... run simulation, calling submit_frame() each step ...
/// exporter.finalize()?; // Writes the JSON file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    data: AnimationData,
}

impl JsonFrameExporter {
    /// Creates a new exporter that will write to the given path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            data: AnimationData::default(),
        }
    }

    /// Frames captured so far.
    pub fn frames(&self) -> &[RenderFrame] {
        &self.data.frames
    }

    /// Serializes everything captured so far.
    pub fn to_json(&self) -> WobbleResult<String> {
        serde_json::to_string(&self.data)
            .map_err(|e| WobbleError::Serialization(format!("JSON serialization failed: {e}")))
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, mesh: &PolygonMesh) -> WobbleResult<()> {
        self.data = AnimationData {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            triangle_count: mesh.triangle_count(),
            frames: Vec::new(),
        };
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> WobbleResult<()> {
        self.data.frames.push(frame.clone());
        Ok(())
    }

    fn finalize(&mut self) -> WobbleResult<()> {
        let json = self.to_json()?;
        std::fs::write(&self.output_path, json)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.data.frames.len() as u32
    }
}
