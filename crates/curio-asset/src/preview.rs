//! Preview images, as seen from asset metadata
//!
//! Previews belong to content items, never to the metadata record. Metadata
//! only looks them up through [`PreviewSource`].

/// An RGBA8 thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PreviewImage {
    /// Create a preview from RGBA8 pixels. Returns `None` if the buffer size
    /// does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A preview filled with a single color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Anything that owns a preview image, keyed by its own identity
pub trait PreviewSource {
    fn preview(&self) -> Option<&PreviewImage>;
}
