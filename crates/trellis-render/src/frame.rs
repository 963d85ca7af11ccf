use std::sync::Arc;

use trellis_core::profiling::profile_function;

use crate::context::GraphicsContext;

/// Counters for one presented frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub passes: u32,
    pub draw_calls: u32,
}

/// One acquired surface image and the encoder recording into it.
///
/// Nothing reaches the screen until [`present`](Self::present). A frame
/// dropped without presenting discards its commands.
pub struct Frame {
    pub(crate) context: Arc<GraphicsContext>,
    pub(crate) texture: wgpu::SurfaceTexture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) encoder: wgpu::CommandEncoder,
    pub(crate) size: [u32; 2],
    pub(crate) stats: FrameStats,
}

impl Frame {
    /// Target size in device pixels.
    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn encoder(&mut self) -> &mut wgpu::CommandEncoder {
        &mut self.encoder
    }

    pub fn graphics_context(&self) -> &Arc<GraphicsContext> {
        &self.context
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn record_draw(&mut self) {
        self.stats.draw_calls += 1;
    }

    /// Start a pass that clears the whole target to `color`.
    ///
    /// The pass is detached from the encoder borrow so callers can hand it to
    /// renderers expecting `RenderPass<'static>`; it must be dropped before
    /// [`present`](Self::present).
    pub fn clear_pass(&mut self, label: &str, color: wgpu::Color) -> wgpu::RenderPass<'static> {
        self.stats.passes += 1;
        self.encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime()
    }

    /// Submit `before`, then this frame's commands, and show the image.
    pub fn present(self, before: impl IntoIterator<Item = wgpu::CommandBuffer>) -> FrameStats {
        profile_function!();
        let Self {
            context,
            texture,
            encoder,
            stats,
            ..
        } = self;

        if stats.passes == 0 {
            tracing::warn!("presenting a frame with no render passes");
        }
        context
            .queue
            .submit(before.into_iter().chain(std::iter::once(encoder.finish())));
        texture.present();
        stats
    }
}
