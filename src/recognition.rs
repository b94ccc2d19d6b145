use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One item of the external recognizer's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResponse {
    /// The expression the service read from the drawing.
    pub expr: String,
    /// Its evaluated value.
    pub result: String,
    /// Whether the expression assigns a variable.
    #[serde(default)]
    pub assign: bool,
}

/// What the UI displays for a recognized drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub expression: String,
    pub answer: String,
}

impl From<RecognitionResponse> for GeneratedResult {
    fn from(response: RecognitionResponse) -> Self {
        Self {
            expression: response.expr,
            answer: response.result,
        }
    }
}

/// Errors from the recognition collaborator
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    #[error("no recognition service is configured")]
    Unconfigured,

    #[error("recognition service failed: {0}")]
    Service(String),
}

pub type RecognitionReply = Result<Vec<RecognitionResponse>, RecognitionError>;

/// Seam for the external service that turns a drawing into expressions.
///
/// Implementations receive the PNG encoding of the full surface and
/// resolve the returned channel when the reply arrives. Dropping the
/// sender cancels the request.
pub trait Recognizer {
    fn recognize(&self, png: Vec<u8>) -> oneshot::Receiver<RecognitionReply>;
}

/// Placeholder collaborator used until a real service is wired in.
/// Resolves immediately with [`RecognitionError::Unconfigured`].
#[derive(Debug, Default)]
pub struct NullRecognizer;

impl Recognizer for NullRecognizer {
    fn recognize(&self, _png: Vec<u8>) -> oneshot::Receiver<RecognitionReply> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(RecognitionError::Unconfigured));
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_item_parses_from_wire_json() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{"expr": "2 + 2", "result": "4", "assign": false}"#).unwrap();
        assert_eq!(response.expr, "2 + 2");
        assert_eq!(response.result, "4");
        assert!(!response.assign);
    }

    #[test]
    fn assign_defaults_to_false_when_absent() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{"expr": "x = 5", "result": "5"}"#).unwrap();
        assert!(!response.assign);
    }

    #[test]
    fn reply_item_maps_to_displayed_result() {
        let response = RecognitionResponse {
            expr: "3 * 7".to_owned(),
            result: "21".to_owned(),
            assign: false,
        };
        let result = GeneratedResult::from(response);
        assert_eq!(
            result,
            GeneratedResult {
                expression: "3 * 7".to_owned(),
                answer: "21".to_owned(),
            }
        );
    }

    #[test]
    fn null_recognizer_resolves_unconfigured() {
        let mut rx = NullRecognizer.recognize(Vec::new());
        match rx.try_recv() {
            Ok(Some(Err(RecognitionError::Unconfigured))) => {}
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
