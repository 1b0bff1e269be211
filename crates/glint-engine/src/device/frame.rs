/// One acquired swapchain image plus the encoder recording into it.
///
/// Holding this blocks acquisition of the next image, so it lives only between
/// `begin_draw` and `end_draw`.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
