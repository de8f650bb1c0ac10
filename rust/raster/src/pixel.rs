// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded blueprint pixels.

use image::DynamicImage;
use replan_core::LoadError;

use crate::error::{Error, Result};

/// Host-provided fetch + decode of a blueprint image.
///
/// The engine calls this at most once per reconstruction; a failure
/// degrades to the default-box path instead of propagating.
pub trait ImageSource {
    fn load_image(&self, url: &str) -> std::result::Result<PixelBuffer, LoadError>;
}

/// An RGBA pixel buffer for one decoded blueprint image
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes (4 bytes per pixel, row-major)
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Convert any decoded image into an RGBA buffer
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        Self::from_rgba(rgba.into_raw(), width, height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The RGB channels at (x, y); alpha is irrelevant to classification
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Fill a solid-color buffer; handy for hosts and tests
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self::from_rgba(data, width, height)
    }

    /// Overwrite one pixel's RGB; handy for hosts and tests
    pub fn put_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[i] = rgb[0];
        self.data[i + 1] = rgb[1];
        self.data[i + 2] = rgb[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_size_check() {
        assert!(PixelBuffer::from_rgba(vec![0; 16], 2, 2).is_ok());
        assert!(matches!(
            PixelBuffer::from_rgba(vec![0; 15], 2, 2),
            Err(Error::BufferSize { .. })
        ));
        assert!(matches!(
            PixelBuffer::from_rgba(Vec::new(), 0, 2),
            Err(Error::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_rgb_access() {
        let mut buffer = PixelBuffer::solid(3, 2, [255, 255, 255]).unwrap();
        buffer.put_rgb(2, 1, [10, 20, 30]);
        assert_eq!(buffer.rgb(0, 0), [255, 255, 255]);
        assert_eq!(buffer.rgb(2, 1), [10, 20, 30]);
    }

    #[test]
    fn test_from_image() {
        let image = DynamicImage::new_rgb8(4, 3);
        let buffer = PixelBuffer::from_image(&image).unwrap();
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.rgb(0, 0), [0, 0, 0]);
    }
}
