use egui::{Color32, Rect, Response};
use futures::channel::oneshot;

use crate::canvas::Canvas;
use crate::history::History;
use crate::input::{InputEvent, InputHandler};
use crate::panels;
use crate::recognition::{
    GeneratedResult, NullRecognizer, RecognitionReply, Recognizer,
};
use crate::restore::RestoreQueue;
use crate::tool::{ToolConfig, ToolIntent};

fn default_recognizer() -> Box<dyn Recognizer> {
    Box::new(NullRecognizer)
}

/// The whiteboard application: one drawing surface, a tool palette and
/// snapshot-based undo/redo.
///
/// We derive Deserialize/Serialize so tool preferences persist across
/// restarts; the surface and its history are session-only.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct InkboardApp {
    tool: ToolConfig,
    #[serde(skip)]
    canvas: Canvas,
    #[serde(skip)]
    history: History,
    #[serde(skip)]
    restore_queue: RestoreQueue,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip, default = "default_recognizer")]
    recognizer: Box<dyn Recognizer>,
    #[serde(skip)]
    pending_recognition: Option<oneshot::Receiver<RecognitionReply>>,
    #[serde(skip)]
    result: Option<GeneratedResult>,
    // History gets its blank seed once, on the first sized frame.
    #[serde(skip)]
    seeded: bool,
}

impl Default for InkboardApp {
    fn default() -> Self {
        Self {
            tool: ToolConfig::default(),
            canvas: Canvas::new(),
            history: History::new(),
            restore_queue: RestoreQueue::new(),
            input: InputHandler::default(),
            recognizer: default_recognizer(),
            pending_recognition: None,
            result: None,
            seeded: false,
        }
    }
}

impl InkboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }
        Self::default()
    }

    /// Replaces the recognition collaborator.
    pub fn with_recognizer(mut self, recognizer: Box<dyn Recognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn tool(&self) -> ToolConfig {
        self.tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn result(&self) -> Option<&GeneratedResult> {
        self.result.as_ref()
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }

    // --- toolbar actions ---

    pub fn select_color(&mut self, color: Color32) {
        log::info!("swatch selected: {color:?}");
        self.tool = self.tool.apply(ToolIntent::SelectColor(color));
    }

    pub fn toggle_eraser(&mut self) {
        self.tool = self.tool.apply(ToolIntent::ToggleEraser);
        log::info!(
            "eraser {}",
            if self.tool.eraser { "enabled" } else { "disabled" }
        );
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.tool = self.tool.apply(ToolIntent::SetWidth(width));
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            log::info!("undo to snapshot {}", snapshot.id());
            self.restore_queue.request(snapshot.clone());
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            log::info!("redo to snapshot {}", snapshot.id());
            self.restore_queue.request(snapshot.clone());
        }
    }

    pub fn reset_canvas(&mut self) {
        self.canvas.clear();
        self.history.reset();
        self.restore_queue.clear();
        log::info!("canvas reset");
    }

    /// Submits the current drawing to the recognition collaborator.
    pub fn run_recognition(&mut self) {
        match self.canvas.snapshot() {
            Ok(snapshot) => {
                log::info!(
                    "submitting {} byte drawing for recognition",
                    snapshot.png().len()
                );
                self.pending_recognition =
                    Some(self.recognizer.recognize(snapshot.png().to_vec()));
            }
            Err(err) => log::error!("could not capture the surface for recognition: {err}"),
        }
    }

    // --- per-frame plumbing, driven by the panels ---

    /// Allocates the surface at the panel's first size and seeds the
    /// history with the blank snapshot.
    pub fn ensure_surface(&mut self, rect: Rect) {
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return;
        }
        if !self.canvas.is_allocated() {
            self.canvas.allocate(rect.width() as usize, rect.height() as usize);
        }
        if !self.seeded && self.canvas.is_allocated() {
            match self.canvas.snapshot() {
                Ok(snapshot) => {
                    self.history.push(snapshot);
                    self.seeded = true;
                }
                Err(err) => log::error!("failed to seed history: {err}"),
            }
        }
    }

    /// Converts this frame's pointer state into domain events.
    pub fn process_pointer(&mut self, response: &Response, rect: Rect) -> Vec<InputEvent> {
        self.input.set_canvas_rect(rect);
        self.input.process_response(response)
    }

    /// Routes one input event to the drawing surface.
    pub fn handle_input(&mut self, event: InputEvent, rect: Rect) {
        match event {
            InputEvent::PointerDown { location } if location.is_in_canvas => {
                let point = self.canvas.to_raster(location.position, rect);
                self.canvas
                    .begin(point, self.tool.stroke_color(), self.tool.thickness());
            }
            InputEvent::PointerMove { location } => {
                if self.canvas.is_drawing() && location.is_in_canvas {
                    let point = self.canvas.to_raster(location.position, rect);
                    self.canvas.extend(point);
                }
            }
            InputEvent::PointerUp { .. } => self.finish_stroke(),
            _ => {}
        }
    }

    fn finish_stroke(&mut self) {
        let Some(stroke) = self.canvas.end() else {
            return;
        };
        match self.canvas.snapshot() {
            Ok(snapshot) => {
                log::info!(
                    "stroke finished: {} point(s), snapshot {}",
                    stroke.points().len(),
                    snapshot.id()
                );
                self.history.push(snapshot);
            }
            Err(err) => log::error!("failed to capture stroke snapshot: {err}"),
        }
    }

    /// Applies the latest requested repaint, if any.
    pub fn drain_restore(&mut self) {
        let Some(snapshot) = self.restore_queue.take() else {
            return;
        };
        if let Err(err) = self.canvas.apply(&snapshot) {
            log::error!("failed to repaint from snapshot {}: {err}", snapshot.id());
        }
    }

    /// Draws the surface into the panel.
    pub fn paint_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        self.canvas.paint(ctx, painter, rect);
    }

    /// Picks up the recognizer's reply once it arrives.
    fn poll_recognition(&mut self) {
        let Some(receiver) = self.pending_recognition.as_mut() else {
            return;
        };
        match receiver.try_recv() {
            Ok(Some(Ok(responses))) => {
                self.pending_recognition = None;
                match responses.into_iter().next() {
                    Some(first) => {
                        let result = GeneratedResult::from(first);
                        log::info!("recognized: {} = {}", result.expression, result.answer);
                        self.result = Some(result);
                    }
                    None => log::warn!("recognition reply was empty"),
                }
            }
            Ok(Some(Err(err))) => {
                self.pending_recognition = None;
                log::warn!("recognition failed: {err}");
            }
            Ok(None) => {} // still pending
            Err(oneshot::Canceled) => {
                self.pending_recognition = None;
                log::warn!("recognition request was canceled");
            }
        }
    }
}

impl eframe::App for InkboardApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_recognition();

        panels::toolbar_panel(self, ctx);
        panels::canvas_panel(self, ctx);

        if self.pending_recognition.is_some() {
            ctx.request_repaint();
        }
    }
}
