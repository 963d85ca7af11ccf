use std::path::PathBuf;

use trellis_core::profiling::profile_function;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("invalid texture dimensions {width}x{height} for {len} bytes of RGBA data")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

/// Where texture pixels come from.
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// An encoded image (PNG or JPEG) held in memory.
    Encoded(Vec<u8>),
    /// An encoded image on disk.
    Path(PathBuf),
    /// Raw, unpremultiplied RGBA8 pixels.
    Rgba {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

impl From<PathBuf> for TextureSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// A texture uploaded to egui.
///
/// The GPU copy lives as long as any clone of the handle.
#[derive(Clone)]
pub struct Texture {
    handle: egui::TextureHandle,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn id(&self) -> egui::TextureId {
        self.handle.id()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size_vec2(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }

    pub fn handle(&self) -> &egui::TextureHandle {
        &self.handle
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.handle.id())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Decode `source` and upload it as a linearly filtered texture.
pub fn load_texture(
    ctx: &egui::Context,
    name: &str,
    source: TextureSource,
) -> Result<Texture, TextureError> {
    profile_function!();

    let (width, height, pixels) = match source {
        TextureSource::Encoded(bytes) => decode(&bytes)?,
        TextureSource::Path(path) => {
            let bytes = std::fs::read(&path).map_err(|source| TextureError::Io {
                path: path.clone(),
                source,
            })?;
            decode(&bytes)?
        }
        TextureSource::Rgba {
            width,
            height,
            pixels,
        } => (width, height, pixels),
    };

    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || pixels.len() != expected {
        return Err(TextureError::InvalidDimensions {
            width,
            height,
            len: pixels.len(),
        });
    }

    let image =
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], &pixels);
    let handle = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
    tracing::debug!("loaded texture {name} ({width}x{height})");

    Ok(Texture {
        handle,
        width,
        height,
    })
}

fn decode(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), TextureError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}
