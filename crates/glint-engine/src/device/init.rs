/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Requested present mode. Falls back to a supported mode when the surface lacks it.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency; a hint only.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Present mode derived from the window's vsync setting.
    ///
    /// Vsync presents on vertical blank (`Fifo`); without it frames are presented as soon
    /// as they are ready (`Immediate`, or `Mailbox` where tearing is unavailable).
    pub fn with_vsync(vsync: bool) -> Self {
        Self {
            present_mode: if vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::Immediate
            },
            ..Self::default()
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        assert_eq!(GpuInit::with_vsync(true).present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(GpuInit::with_vsync(false).present_mode, wgpu::PresentMode::Immediate);
    }
}
