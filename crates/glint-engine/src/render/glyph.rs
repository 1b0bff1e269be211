use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::draw::{Rotation, TextCmd};
use crate::text::FontSystem;

use super::common::{triangle_pipeline, VertexBuffer, ViewportBinding};

// ── atlas packing ─────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

/// Shelf packer: glyphs fill rows left to right, a new row starts below the tallest
/// glyph of the current one.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w × h` cell and returns its top-left corner.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

// ── vertices ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct GlyphVertex {
    pos: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Text renderer backed by a 2048 × 2048 R8Unorm glyph atlas.
///
/// Glyphs are rasterized with fontdue on first use and cached for the renderer's
/// lifetime, keyed by `GlyphRasterConfig` (font, glyph index, pixel size). When the atlas
/// fills up, new glyphs are dropped with a single warning.
pub(super) struct GlyphRenderer {
    pipeline: wgpu::RenderPipeline,
    atlas_bind_group: wgpu::BindGroup,
    atlas_texture: wgpu::Texture,
    packer: ShelfPacker,
    warned_full: bool,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    vertices: VertexBuffer<GlyphVertex>,
    layout: Layout<()>,
}

impl GlyphRenderer {
    pub(super) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        viewport: &ViewportBinding,
    ) -> Self {
        let atlas_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glint glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let atlas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint glyph atlas bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint glyph atlas bind group"),
            layout: &atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = triangle_pipeline(
            device,
            "glint glyph pipeline",
            include_str!("shaders/glyph.wgsl"),
            &[&viewport.layout, &atlas_layout],
            GlyphVertex::layout(),
            format,
        );

        Self {
            pipeline,
            atlas_bind_group,
            atlas_texture,
            packer: ShelfPacker::new(ATLAS_SIZE),
            warned_full: false,
            glyph_cache: HashMap::new(),
            vertices: VertexBuffer::new("glint glyph vbo"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    /// Lays out `cmd` and appends one textured quad per visible glyph to `out`.
    ///
    /// Unknown fonts are skipped with a warning.
    pub(super) fn append_text(
        &mut self,
        queue: &wgpu::Queue,
        fonts: &FontSystem,
        cmd: &TextCmd,
        rotation: Option<Rotation>,
        out: &mut Vec<GlyphVertex>,
    ) {
        let Some(font) = fonts.get(cmd.format.font) else {
            log::warn!("unknown {:?}, text skipped", cmd.format.font);
            return;
        };

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x,
            y: cmd.origin.y,
            max_width: cmd.max_width,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.format.size, 0));

        let color = cmd.color.to_array();
        let rotation = rotation.filter(|r| !r.is_identity()).map(|r| {
            let (sin, cos) = r.sin_cos();
            (r.pivot.unwrap_or_default(), sin, cos)
        });

        // Copy positions out so the layout borrow ends before the atlas is mutated.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        for (key, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }
                match self.upload_glyph(queue, &bitmap, metrics.width as u32, metrics.height as u32) {
                    Some(entry) => {
                        self.glyph_cache.insert(key, entry);
                    }
                    None => continue,
                }
            }
            let Some(g) = self.glyph_cache.get(&key) else { continue };

            let corners = [
                (Vec2::new(x, y), [g.uv_min[0], g.uv_min[1]]),
                (Vec2::new(x + w as f32, y), [g.uv_max[0], g.uv_min[1]]),
                (Vec2::new(x + w as f32, y + h as f32), [g.uv_max[0], g.uv_max[1]]),
                (Vec2::new(x, y + h as f32), [g.uv_min[0], g.uv_max[1]]),
            ]
            .map(|(p, uv)| {
                let p = match rotation {
                    Some((pivot, sin, cos)) => p.rotated_about(pivot, sin, cos),
                    None => p,
                };
                GlyphVertex { pos: [p.x, p.y], uv, color }
            });

            out.extend_from_slice(&[
                corners[0], corners[1], corners[2],
                corners[0], corners[2], corners[3],
            ]);
        }
    }

    fn upload_glyph(
        &mut self,
        queue: &wgpu::Queue,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let Some((gx, gy)) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); new glyphs are dropped");
                self.warned_full = true;
            }
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.atlas_texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas, gy as f32 / atlas],
            uv_max: [(gx + w) as f32 / atlas, (gy + h) as f32 / atlas],
        })
    }

    pub(super) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[GlyphVertex]) {
        self.vertices.upload(device, queue, vertices);
    }

    /// Draws `range` of the uploaded vertices. Group 0 must already be bound.
    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(vbo) = self.vertices.buffer() else { return };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.atlas_bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 5), Some((1, 1)));
        assert_eq!(p.place(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: next row starts below the tallest glyph (8).
        assert_eq!(p.place(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(14, 14).is_some());
        assert_eq!(p.place(14, 14), None);
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_rejected_without_filling() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(20, 2), None);
        assert!(p.place(2, 2).is_some());
    }
}
