use std::ops::Range;

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame};
use crate::draw::{DrawList, Primitive};
use crate::paint::Color;
use crate::text::FontSystem;

use super::common::ViewportBinding;
use super::glyph::{GlyphRenderer, GlyphVertex};
use super::shape::ShapeRenderer;
use super::tessellate::{tessellate, ShapeVertex};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BatchKind {
    Shape,
    Glyph,
}

/// Contiguous vertex range drawn with one pipeline.
#[derive(Debug, Clone, Eq, PartialEq)]
struct Batch {
    kind: BatchKind,
    range: Range<u32>,
}

/// Appends `range`, extending the last batch when it continues the same kind.
fn push_batch(batches: &mut Vec<Batch>, kind: BatchKind, range: Range<u32>) {
    if range.is_empty() {
        return;
    }
    if let Some(last) = batches.last_mut() {
        if last.kind == kind && last.range.end == range.start {
            last.range.end = range.end;
            return;
        }
    }
    batches.push(Batch { kind, range });
}

/// Renders a `DrawList` in call order within a single pass.
///
/// Shapes and glyphs live in two vertex streams uploaded once per frame; the pass
/// alternates pipelines at each switch between the two, so later primitives always
/// paint over earlier ones.
pub(crate) struct Renderer2D {
    viewport: ViewportBinding,
    shapes: ShapeRenderer,
    glyphs: GlyphRenderer,

    shape_vertices: Vec<ShapeVertex>,
    glyph_vertices: Vec<GlyphVertex>,
    batches: Vec<Batch>,
}

impl Renderer2D {
    pub(crate) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let viewport = ViewportBinding::new(device);
        Self {
            shapes: ShapeRenderer::new(device, format, &viewport),
            glyphs: GlyphRenderer::new(device, format, &viewport),
            viewport,
            shape_vertices: Vec::new(),
            glyph_vertices: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Records the list into `frame`, clearing the target to `clear` first.
    pub(crate) fn render(
        &mut self,
        gpu: &Gpu<'_>,
        frame: &mut GpuFrame,
        viewport: Viewport,
        list: &DrawList,
        fonts: &FontSystem,
        clear: Color,
    ) {
        self.prepare(gpu.queue(), list, fonts);

        self.viewport.write(gpu.queue(), viewport);
        self.shapes.upload(gpu.device(), gpu.queue(), &self.shape_vertices);
        self.glyphs.upload(gpu.device(), gpu.queue(), &self.glyph_vertices);

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.batches.is_empty() {
            return;
        }

        rpass.set_bind_group(0, &self.viewport.bind_group, &[]);
        for batch in &self.batches {
            match batch.kind {
                BatchKind::Shape => self.shapes.draw(&mut rpass, batch.range.clone()),
                BatchKind::Glyph => self.glyphs.draw(&mut rpass, batch.range.clone()),
            }
        }
    }

    /// Tessellates the list into the two vertex streams and the batch sequence.
    fn prepare(&mut self, queue: &wgpu::Queue, list: &DrawList, fonts: &FontSystem) {
        self.shape_vertices.clear();
        self.glyph_vertices.clear();
        self.batches.clear();

        for item in list.items() {
            match &item.primitive {
                Primitive::Text(cmd) => {
                    let start = self.glyph_vertices.len() as u32;
                    self.glyphs
                        .append_text(queue, fonts, cmd, item.rotation, &mut self.glyph_vertices);
                    let end = self.glyph_vertices.len() as u32;
                    push_batch(&mut self.batches, BatchKind::Glyph, start..end);
                }
                _ => {
                    let start = self.shape_vertices.len() as u32;
                    tessellate(item, &mut self.shape_vertices);
                    let end = self.shape_vertices.len() as u32;
                    push_batch(&mut self.batches, BatchKind::Shape, start..end);
                }
            }
        }
    }
}
