use std::sync::Arc;

use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, TextureHandle, TextureOptions};

use crate::snapshot::{Snapshot, SnapshotError, SnapshotRef};
use crate::stroke::{MutableStroke, StrokeRef};
use crate::tool::BACKGROUND;

/// The raster drawing surface.
///
/// Strokes paint directly into a CPU pixel buffer; the buffer is mirrored
/// into a GPU texture when it changes and stretched onto the panel rect.
/// The buffer is allocated once, at the size the panel has on the first
/// frame, and keeps those dimensions afterwards.
pub struct Canvas {
    image: ColorImage,
    texture: Option<TextureHandle>,
    dirty: bool,
    active: Option<MutableStroke>,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            image: ColorImage::new([0, 0], BACKGROUND),
            texture: None,
            dirty: false,
            active: None,
        }
    }

    /// True once the surface has been given its size.
    pub fn is_allocated(&self) -> bool {
        self.image.size[0] > 0 && self.image.size[1] > 0
    }

    /// Allocates the pixel buffer, filled with the background color.
    /// Does nothing if the surface already has a size.
    pub fn allocate(&mut self, width: usize, height: usize) {
        if self.is_allocated() || width == 0 || height == 0 {
            return;
        }
        self.image = ColorImage::new([width, height], BACKGROUND);
        self.dirty = true;
        log::debug!("allocated {width}x{height} drawing surface");
    }

    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }

    /// Whether a stroke is currently in progress.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a stroke at `point`. Nothing is painted until the stroke
    /// extends, so a press with no motion leaves the surface unchanged.
    pub fn begin(&mut self, point: Pos2, color: Color32, thickness: f32) {
        if !self.is_allocated() {
            return;
        }
        let mut stroke = MutableStroke::new(color, thickness);
        stroke.add_point(point);
        self.active = Some(stroke);
    }

    /// Extends the active stroke to `point`, painting the segment
    /// immediately. No-op when no stroke is active.
    pub fn extend(&mut self, point: Pos2) {
        let (last, color, thickness) = match &self.active {
            Some(stroke) => match stroke.last_point() {
                Some(last) => (last, stroke.color(), stroke.thickness()),
                None => return,
            },
            None => return,
        };
        self.paint_segment(last, point, color, thickness);
        if let Some(stroke) = self.active.as_mut() {
            stroke.add_point(point);
        }
        self.dirty = true;
    }

    /// Finishes the active stroke. Returns `None` when no stroke was
    /// active; the caller snapshots the surface on `Some`.
    pub fn end(&mut self) -> Option<StrokeRef> {
        self.active.take().map(MutableStroke::into_stroke_ref)
    }

    /// Blanks the whole surface and drops any in-progress stroke.
    pub fn clear(&mut self) {
        for pixel in &mut self.image.pixels {
            *pixel = BACKGROUND;
        }
        self.active = None;
        self.dirty = true;
    }

    /// Captures the current pixels as an immutable snapshot.
    pub fn snapshot(&self) -> Result<SnapshotRef, SnapshotError> {
        Snapshot::encode(self.image.size, &self.image.pixels).map(Arc::new)
    }

    /// Repaints the whole surface from `snapshot`, replacing the current
    /// contents. Dimensions are validated before anything is decoded.
    pub fn apply(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let expected = (self.image.size[0] as u32, self.image.size[1] as u32);
        if snapshot.dimensions() != expected {
            return Err(SnapshotError::DimensionMismatch {
                expected,
                actual: snapshot.dimensions(),
            });
        }
        self.image = snapshot.decode()?;
        self.dirty = true;
        Ok(())
    }

    /// The pixel at `(x, y)`. Panics outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        self.image.pixels[y * self.image.size[0] + x]
    }

    /// Maps a screen position inside the panel `rect` to raster coordinates.
    pub fn to_raster(&self, pos: Pos2, rect: Rect) -> Pos2 {
        let [width, height] = self.image.size;
        let nx = ((pos.x - rect.left()) / rect.width().max(1.0)).clamp(0.0, 1.0);
        let ny = ((pos.y - rect.top()) / rect.height().max(1.0)).clamp(0.0, 1.0);
        Pos2::new(nx * width as f32, ny * height as f32)
    }

    /// Uploads the buffer to the GPU when dirty and draws it into `rect`.
    pub fn paint(&mut self, ctx: &Context, painter: &Painter, rect: Rect) {
        if !self.is_allocated() {
            return;
        }
        if self.texture.is_none() {
            self.texture = Some(ctx.load_texture(
                "whiteboard_surface",
                self.image.clone(),
                TextureOptions::LINEAR,
            ));
        } else if self.dirty {
            if let Some(texture) = self.texture.as_mut() {
                texture.set(self.image.clone(), TextureOptions::LINEAR);
            }
        }
        self.dirty = false;

        let Some(texture) = self.texture.as_ref() else {
            return;
        };
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(texture.id(), rect, uv, Color32::WHITE);
    }

    // Fills every pixel whose center lies within thickness/2 of the
    // segment, which gives round caps and joins.
    fn paint_segment(&mut self, a: Pos2, b: Pos2, color: Color32, thickness: f32) {
        let [width, height] = self.image.size;
        if width == 0 || height == 0 {
            return;
        }
        let radius = (thickness * 0.5).max(0.5);

        let min_x = (a.x.min(b.x) - radius).floor().max(0.0) as usize;
        let min_y = (a.y.min(b.y) - radius).floor().max(0.0) as usize;
        let max_x = ((a.x.max(b.x) + radius).ceil() as usize).min(width - 1);
        let max_y = ((a.y.max(b.y) + radius).ceil() as usize).min(height - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let radius_sq = radius * radius;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(center, a, b) <= radius_sq {
                    self.image.pixels[y * width + x] = color;
                }
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

fn distance_sq_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return ap.length_sq();
    }
    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (point - closest).length_sq()
}
