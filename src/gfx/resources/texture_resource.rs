//! Texture resource management for wgpu
//!
//! Creates and owns GPU textures, views, and samplers: the depth buffer,
//! image-file textures for the still-life surfaces, and small procedural
//! textures (the untextured-material fallback and the demo checkerboard).

use std::path::Path;

use thiserror::Error;

/// Errors from loading an image file into a GPU texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// GPU texture resource containing texture, view, and sampler
#[derive(Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Depth buffer format used throughout the viewer
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a depth texture matching the surface configuration
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Loads an image file and uploads it as an RGBA8 texture.
    ///
    /// Decoded images arrive in top-left-origin row order while texture
    /// space puts V = 0 at the bottom, so rows are flipped vertically
    /// before upload. Sampling repeats in both directions so the UV-scale
    /// uniform can tile surfaces like the desk top.
    pub fn from_image_file(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, TextureError> {
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut data = rgba.into_raw();
        flip_rows_vertically(&mut data, width, height, 4);

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image texture".to_string());
        Ok(Self::create_from_rgba_data(
            device, queue, &data, width, height, &label,
        ))
    }

    /// Creates a 2D texture from raw RGBA8 data (4 bytes per pixel)
    pub fn create_from_rgba_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
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
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// 1x1 white texture bound in place of a real one for flat-color
    /// materials, so a single bind group layout serves every draw.
    pub fn create_white_pixel(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::create_from_rgba_data(device, queue, &[255, 255, 255, 255], 1, 1, "white pixel")
    }

    /// Procedural two-color checkerboard, used by the demo scene when no
    /// image assets are on disk.
    pub fn create_checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_a: [u8; 4],
        color_b: [u8; 4],
        cells: u32,
        label: &str,
    ) -> Self {
        let cell_size = 8u32;
        let size = cells * cell_size;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / cell_size) + (y / cell_size)) % 2 == 0;
                data.extend_from_slice(if checker { &color_a } else { &color_b });
            }
        }
        Self::create_from_rgba_data(device, queue, &data, size, size, label)
    }
}

/// Flips pixel rows in place so the first row becomes the last.
///
/// Image decoders hand back top-left-origin rows; the renderer's texture
/// space has V increasing upward from the bottom-left.
pub fn flip_rows_vertically(data: &mut [u8], width: u32, height: u32, bytes_per_pixel: u32) {
    let row_len = (width * bytes_per_pixel) as usize;
    debug_assert_eq!(data.len(), row_len * height as usize);
    let (mut top, mut bottom) = (0, height as usize - 1);
    while top < bottom {
        let (head, tail) = data.split_at_mut(bottom * row_len);
        head[top * row_len..(top + 1) * row_len].swap_with_slice(&mut tail[..row_len]);
        top += 1;
        bottom -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_reverses_row_order() {
        // 1x4 image, 1 byte per pixel: rows 1,2,3,4 become 4,3,2,1.
        let mut data = vec![1, 2, 3, 4];
        flip_rows_vertically(&mut data, 1, 4, 1);
        assert_eq!(data, vec![4, 3, 2, 1]);
    }

    #[test]
    fn flip_preserves_pixels_within_a_row() {
        // 2x2 RGBA image: two distinguishable rows of 8 bytes each.
        let top: Vec<u8> = (0..8).collect();
        let bottom: Vec<u8> = (8..16).collect();
        let mut data = [top.clone(), bottom.clone()].concat();
        flip_rows_vertically(&mut data, 2, 2, 4);
        assert_eq!(data, [bottom, top].concat());
    }

    #[test]
    fn flip_is_an_involution_on_odd_heights() {
        let original: Vec<u8> = (0..5 * 3).collect();
        let mut data = original.clone();
        flip_rows_vertically(&mut data, 1, 5, 3);
        assert_ne!(data, original);
        flip_rows_vertically(&mut data, 1, 5, 3);
        assert_eq!(data, original);
    }
}
