//! WebGPU rendering module
//!
//! The simulation hands over a [`RenderFrame`] snapshot each frame; the
//! renderer never reads or mutates round state directly.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;

use crate::sim::RenderFrame;

/// Anything that can draw a frame snapshot
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);
}

/// Discards frames; used headless and before the GPU is ready
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn render(&mut self, _frame: &RenderFrame) {}
}

/// Draws snapshots through the wgpu pipeline
pub struct WgpuRenderer {
    pub state: RenderState,
    pub show_grid: bool,
}

impl WgpuRenderer {
    pub fn new(state: RenderState, show_grid: bool) -> Self {
        Self { state, show_grid }
    }
}

impl RenderSink for WgpuRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        let vertices = build_scene(frame, self.show_grid);
        match self.state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.state.size;
                self.state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
