//! # Raw Image Data
//!
//! FBInk can either decode an image file itself or take already decoded
//! pixels. [`RawImage`] is the latter: tightly packed 8-bit grayscale (one
//! channel) or RGBA (four channels) rows, decoded with the `image` crate.

use std::path::Path;

use image::DynamicImage;

use crate::error::{InkError, Result};

/// Decoded pixel data ready to hand to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    /// 1 (grayscale) or 4 (RGBA)
    pub channels: u8,
    pub data: Vec<u8>,
}

impl RawImage {
    /// Decode an image file.
    pub fn open<P: AsRef<Path>>(path: P, grayscale: bool) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| InkError::Image(format!("Failed to open {}: {}", path.display(), e)))?;
        Ok(Self::from_dynamic(img, grayscale))
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8], grayscale: bool) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| InkError::Image(format!("Failed to decode image: {}", e)))?;
        Ok(Self::from_dynamic(img, grayscale))
    }

    pub fn from_dynamic(img: DynamicImage, grayscale: bool) -> Self {
        if grayscale {
            let gray = img.to_luma8();
            Self {
                width: gray.width(),
                height: gray.height(),
                channels: 1,
                data: gray.into_raw(),
            }
        } else {
            let rgba = img.to_rgba8();
            Self {
                width: rgba.width(),
                height: rgba.height(),
                channels: 4,
                data: rgba.into_raw(),
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
