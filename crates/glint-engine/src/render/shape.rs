use std::ops::Range;

use super::common::{triangle_pipeline, VertexBuffer, ViewportBinding};
use super::tessellate::ShapeVertex;

impl ShapeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Draws pre-tessellated, colored triangles.
pub(super) struct ShapeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: VertexBuffer<ShapeVertex>,
}

impl ShapeRenderer {
    pub(super) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        viewport: &ViewportBinding,
    ) -> Self {
        let pipeline = triangle_pipeline(
            device,
            "glint shape pipeline",
            include_str!("shaders/shape.wgsl"),
            &[&viewport.layout],
            ShapeVertex::layout(),
            format,
        );
        Self {
            pipeline,
            vertices: VertexBuffer::new("glint shape vbo"),
        }
    }

    pub(super) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[ShapeVertex]) {
        self.vertices.upload(device, queue, vertices);
    }

    /// Draws `range` of the uploaded vertices. Group 0 must already be bound.
    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(vbo) = self.vertices.buffer() else { return };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }
}
