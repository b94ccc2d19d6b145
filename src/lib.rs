#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod history;
pub mod input;
pub mod panels;
pub mod recognition;
pub mod restore;
pub mod snapshot;
pub mod stroke;
pub mod tool;

pub use app::InkboardApp;
pub use canvas::Canvas;
pub use history::History;
pub use input::{InputEvent, InputHandler, InputLocation};
pub use recognition::{GeneratedResult, NullRecognizer, RecognitionResponse, Recognizer};
pub use restore::RestoreQueue;
pub use snapshot::{Snapshot, SnapshotError, SnapshotRef};
pub use stroke::{MutableStroke, Stroke, StrokeRef};
pub use tool::{ToolConfig, ToolIntent};
