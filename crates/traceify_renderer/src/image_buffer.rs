//! 24-bit image buffer and its writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use traceify_math::{Color, Rgb8};

use crate::{RenderError, RenderResult};

/// Fixed-size grid of 8-bit RGB pixels addressed by `(i, j)`, with `j = 0`
/// the bottom row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb8::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, i: u32, j: u32) -> RenderResult<usize> {
        if i >= self.width || j >= self.height {
            return Err(RenderError::PixelOutOfRange {
                i,
                j,
                width: self.width,
                height: self.height,
            });
        }
        Ok(j as usize * self.width as usize + i as usize)
    }

    pub fn get(&self, i: u32, j: u32) -> RenderResult<Rgb8> {
        let idx = self.index(i, j)?;
        Ok(self.pixels[idx])
    }

    pub fn set(&mut self, i: u32, j: u32, colour: Rgb8) -> RenderResult<()> {
        let idx = self.index(i, j)?;
        self.pixels[idx] = colour;
        Ok(())
    }

    /// Quantize and store a colour.
    pub fn set_colour(&mut self, i: u32, j: u32, colour: Color) -> RenderResult<()> {
        self.set(i, j, colour.into())
    }

    fn check_size(&self) -> RenderResult<()> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(RenderError::BufferSize {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Rows from top to bottom, each left to right.
    fn rows_top_down(&self) -> impl Iterator<Item = &[Rgb8]> + '_ {
        self.pixels.chunks(self.width.max(1) as usize).rev()
    }

    /// Write a binary PPM (P6), top row first.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> RenderResult<()> {
        self.check_size()?;
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for row in self.rows_top_down() {
            for pixel in row {
                out.write_all(&pixel.to_array())?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Convert to an `image` crate buffer, top row first.
    pub fn to_rgb_image(&self) -> RenderResult<image::RgbImage> {
        self.check_size()?;
        let bytes: Vec<u8> = self
            .rows_top_down()
            .flat_map(|row| row.iter().flat_map(|p| p.to_array()))
            .collect();
        image::RgbImage::from_raw(self.width, self.height, bytes).ok_or(RenderError::BufferSize {
            width: self.width,
            height: self.height,
            len: self.pixels.len(),
        })
    }

    /// Save to `path`. `.ppm` uses the P6 writer, other extensions go through
    /// the `image` crate encoders.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let mut out = BufWriter::new(File::create(path)?);
            self.write_ppm(&mut out)?;
        } else {
            self.to_rgb_image()?.save(path)?;
        }

        log::info!(
            "Wrote {}x{} image to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_black() {
        let img = ImageBuffer::new(3, 2);
        assert_eq!(img.get(2, 1).unwrap(), Rgb8::new(0, 0, 0));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut img = ImageBuffer::new(4, 3);
        assert!(matches!(
            img.set(4, 0, Rgb8::new(1, 2, 3)),
            Err(RenderError::PixelOutOfRange { i: 4, j: 0, width: 4, height: 3 })
        ));
        assert!(img.get(0, 3).is_err());
        assert!(img.set(3, 2, Rgb8::new(1, 2, 3)).is_ok());
    }

    #[test]
    fn test_set_colour_quantizes() {
        let mut img = ImageBuffer::new(1, 1);
        img.set_colour(0, 0, Color::new(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(img.get(0, 0).unwrap(), Rgb8::new(255, 128, 0));
    }

    #[test]
    fn test_ppm_header_and_row_order() {
        let mut img = ImageBuffer::new(2, 2);
        img.set(0, 0, Rgb8::new(1, 1, 1)).unwrap(); // bottom left
        img.set(1, 1, Rgb8::new(9, 9, 9)).unwrap(); // top right

        let mut out = Vec::new();
        img.write_ppm(&mut out).unwrap();

        let header = b"P6\n2 2\n255\n";
        assert_eq!(&out[..header.len()], header);
        let body = &out[header.len()..];
        assert_eq!(body.len(), 12);
        // Top row first: (0,1) then (1,1)
        assert_eq!(&body[0..6], &[0, 0, 0, 9, 9, 9]);
        assert_eq!(&body[6..12], &[1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_rgb_image_is_flipped() {
        let mut img = ImageBuffer::new(1, 2);
        img.set(0, 0, Rgb8::new(10, 20, 30)).unwrap();
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.get_pixel(0, 1).0, [10, 20, 30]);
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_save_ppm_and_png() {
        let dir = std::env::temp_dir().join(format!("traceify_image_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut img = ImageBuffer::new(3, 3);
        img.set(1, 1, Rgb8::new(200, 100, 50)).unwrap();

        let ppm = dir.join("out.ppm");
        img.save(&ppm).unwrap();
        let bytes = std::fs::read(&ppm).unwrap();
        assert!(bytes.starts_with(b"P6\n3 3\n255\n"));

        let png = dir.join("out.png");
        img.save(&png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(1, 1).0, [200, 100, 50]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let img = ImageBuffer {
            width: 2,
            height: 2,
            pixels: vec![Rgb8::default(); 3],
        };
        assert!(matches!(
            img.to_rgb_image(),
            Err(RenderError::BufferSize { len: 3, .. })
        ));
        let mut out = Vec::new();
        assert!(img.write_ppm(&mut out).is_err());
        assert!(out.is_empty());

        let path = std::env::temp_dir().join(format!("traceify_bad_{}.png", std::process::id()));
        assert!(img.save(&path).is_err());
        assert!(!path.exists());
    }
}
