use egui::{Color32, Pos2};
use std::sync::Arc;

// Immutable stroke for sharing once finished
#[derive(Clone, Debug)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// One continuous pointer-down-to-pointer-up motion, accumulated while drawing
#[derive(Debug)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// Reference-counted type alias for finished strokes
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Color32, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Last recorded point, the anchor for the next painted segment.
    pub fn last_point(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    // Freeze into an immutable, shareable Stroke
    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke::new(self.color, self.thickness, self.points))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}
