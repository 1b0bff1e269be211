use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::draw::DrawList;
use crate::input::platform::client_size;
use crate::paint::Color;
use crate::text::FontSystem;

use super::renderer::Renderer2D;

/// Frame-level contract between the frame loop and a rendering backend.
///
/// A frame is `begin_draw` followed, only when it returned `true`, by exactly one
/// `end_draw`.
pub trait GraphicsDevice {
    /// Acquires a render target. `false` means this frame must not be drawn.
    fn begin_draw(&mut self) -> bool;

    /// Renders `list` into the acquired target and presents it.
    fn end_draw(&mut self, list: &DrawList);

    /// Resizes the render target to `width × height` physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Drawable area in logical pixels.
    fn viewport(&self) -> Viewport;

    fn fonts_mut(&mut self) -> &mut FontSystem;

    /// Set once the device can no longer present; the owner should close.
    fn is_lost(&self) -> bool {
        false
    }
}

/// wgpu-backed graphics device for one window.
pub struct WgpuDevice<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    renderer: Renderer2D,
    fonts: FontSystem,

    /// Frame acquired by `begin_draw`, consumed by `end_draw`.
    frame: Option<GpuFrame>,

    /// Used when the draw list does not set its own clear color.
    clear_color: Color,
    lost: bool,
}

impl<'w> WgpuDevice<'w> {
    /// Creates the GPU context and renderer for `window`, blocking on adapter setup.
    pub fn new(window: &'w Window, init: GpuInit, clear_color: Color) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window, init))?;
        let renderer = Renderer2D::new(gpu.device(), gpu.surface_format());
        Ok(Self {
            window,
            gpu,
            renderer,
            fonts: FontSystem::new(),
            frame: None,
            clear_color,
            lost: false,
        })
    }

    /// Configured surface size in physical pixels.
    #[inline]
    pub fn surface_size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }}

impl GraphicsDevice for WgpuDevice<'_> {
    fn begin_draw(&mut self) -> bool {
        if self.lost {
            return false;
        }
        if self.frame.is_some() {
            log::warn!("begin_draw called twice without end_draw");
            return true;
        }

        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return false;
        }

        match self.gpu.begin_frame() {
            Ok(frame) => {
                self.frame = Some(frame);
                true
            }
            Err(err) => {
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    self.lost = true;
                }
                false
            }
        }
    }

    fn end_draw(&mut self, list: &DrawList) {
        let Some(mut frame) = self.frame.take() else {
            log::warn!("end_draw without a frame");
            return;
        };

        let viewport = self.viewport();
        let clear = list.clear_color().unwrap_or(self.clear_color);
        self.renderer
            .render(&self.gpu, &mut frame, viewport, list, &self.fonts, clear);

        self.window.pre_present_notify();
        self.gpu.submit(frame);
    }

    fn resize(&mut self, width: u32, height: u32) {
        // A pending frame refers to the old swapchain image.
        self.frame = None;
        self.gpu.resize(PhysicalSize::new(width, height));
    }

    fn viewport(&self) -> Viewport {
        client_size(self.window).into()
    }

    fn fonts_mut(&mut self) -> &mut FontSystem {
        &mut self.fonts
    }

    fn is_lost(&self) -> bool {
        self.lost
    }
}
