use std::sync::Arc;

use crate::math::Vec2i;

use super::Surface;

#[derive(Debug, Clone)]
/// A texture living on the GPU, bound to the [RenderContext](super::RenderContext) that
/// created it
pub struct Texture(pub(crate) Arc<TextureHandle>);

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Texture {
    /// Upload a surface, ready to be sampled through `layout`
    pub(crate) fn new_from_surface(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        surface: &Surface,
    ) -> Self {
        let (width, height) = (surface.width(), surface.height());
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Bitmap texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            surface.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Copies are 1:1, nearest keeps pixels exact.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bitmap texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        Texture(Arc::new(TextureHandle {
            texture,
            _view: view,
            _sampler: sampler,
            bind_group,
        }))
    }
    /// Get the size of the texture, as reported by the GPU texture itself
    pub fn size(&self) -> Vec2i {
        Vec2i::from_dims(self.0.texture.width(), self.0.texture.height())
    }
}

#[derive(Debug)]
pub(crate) struct TextureHandle {
    pub(crate) texture: wgpu::Texture,
    _view: wgpu::TextureView,
    _sampler: wgpu::Sampler,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl Drop for TextureHandle {
    fn drop(&mut self) {
        log::debug!(
            "Releasing {}x{} texture",
            self.texture.width(),
            self.texture.height()
        );
        self.texture.destroy();
    }
}
