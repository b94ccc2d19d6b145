use std::io::Cursor;
use std::sync::Arc;

use egui::{Color32, ColorImage};
use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while capturing or repainting snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("snapshot is {actual:?} but the surface is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),
}

/// An immutable PNG capture of the whole drawing surface at one instant.
///
/// Encoding and decoding are synchronous; dimensions are validated on both
/// sides so a stored snapshot can always be repainted onto the surface it
/// was taken from.
pub struct Snapshot {
    id: Uuid,
    width: u32,
    height: u32,
    png: Vec<u8>,
}

// Reference-counted type alias for sharing between history and the restore queue
pub type SnapshotRef = Arc<Snapshot>;

impl Snapshot {
    /// Captures `pixels` (row-major, `size[0] * size[1]` entries) as a PNG.
    pub fn encode(size: [usize; 2], pixels: &[Color32]) -> Result<Self, SnapshotError> {
        let expected = size[0] * size[1];
        if pixels.len() != expected {
            return Err(SnapshotError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let (width, height) = (size[0] as u32, size[1] as u32);
        let mut raw = Vec::with_capacity(expected * 4);
        for pixel in pixels {
            raw.extend_from_slice(&pixel.to_array());
        }
        let buffer = RgbaImage::from_raw(width, height, raw).ok_or(
            SnapshotError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            },
        )?;

        let mut png = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(SnapshotError::Encode)?;

        Ok(Self {
            id: Uuid::new_v4(),
            width,
            height,
            png,
        })
    }

    /// Decodes the stored PNG back into a pixel buffer.
    pub fn decode(&self) -> Result<ColorImage, SnapshotError> {
        let decoded = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(SnapshotError::Decode)?
            .to_rgba8();

        let (width, height) = decoded.dimensions();
        if (width, height) != (self.width, self.height) {
            return Err(SnapshotError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (width, height),
            });
        }

        Ok(ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            decoded.as_raw(),
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw PNG bytes, e.g. for submitting the drawing to a recognizer.
    pub fn png(&self) -> &[u8] {
        &self.png
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_rejects_wrong_buffer_length() {
        let pixels = vec![Color32::RED; 3];
        let err = Snapshot::encode([2, 2], &pixels).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn decode_returns_the_encoded_pixels() {
        let pixels = vec![
            Color32::RED,
            Color32::GREEN,
            Color32::BLUE,
            Color32::WHITE,
        ];
        let snapshot = Snapshot::encode([2, 2], &pixels).unwrap();
        assert_eq!(snapshot.dimensions(), (2, 2));

        let image = snapshot.decode().unwrap();
        assert_eq!(image.size, [2, 2]);
        assert_eq!(image.pixels, pixels);
    }
}
