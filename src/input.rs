use egui::{Pos2, Rect, Response};

/// Represents the location where a pointer event occurred
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer lifecycle events over the drawing surface
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Pointer pressed: a stroke starts here
    PointerDown { location: InputLocation },
    /// Pointer dragged while pressed: the stroke extends here
    PointerMove { location: InputLocation },
    /// Pointer released: the stroke is complete
    PointerUp { location: InputLocation },
}

impl InputEvent {
    pub fn location(&self) -> InputLocation {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerMove { location }
            | InputEvent::PointerUp { location } => *location,
        }
    }

    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        self.location().is_in_canvas
    }
}

/// Converts egui's pointer state on the canvas response into our
/// domain-specific InputEvents
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process this frame's pointer state and generate our InputEvents
    pub fn process_response(&mut self, response: &Response) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.last_pointer_pos = Some(pos);
                events.push(InputEvent::PointerDown {
                    location: self.make_location(pos),
                });
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                if Some(pos) != self.last_pointer_pos {
                    self.last_pointer_pos = Some(pos);
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
            }
        }

        if response.drag_stopped() {
            // The release may report no position; fall back to the last one seen.
            let pos = response.interact_pointer_pos().or(self.last_pointer_pos);
            if let Some(pos) = pos {
                events.push(InputEvent::PointerUp {
                    location: self.make_location(pos),
                });
            }
            self.last_pointer_pos = None;
        }

        events
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}
