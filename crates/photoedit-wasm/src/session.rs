//! WASM bindings for the stateful edit session.
//!
//! Images returned to JavaScript are copies; the session keeps its own
//! history in WASM memory.

use std::sync::Arc;

use crate::types::{to_js_error, JsImage};
use photoedit_core::{EditOp, EditSession, EditorConfig, Image};
use wasm_bindgen::prelude::*;

fn to_js_image(image: Arc<Image>) -> JsImage {
    JsImage::from_image(Arc::unwrap_or_clone(image))
}

/// An editing session with undo history.
///
/// ```typescript
/// const session = new JsEditSession();
/// session.load_bytes(new Uint8Array(await file.arrayBuffer()));
/// session.apply_op({ op: "crop", ratio: 1.0 });
/// session.apply_op({ op: "filter", filter: "vintage" });
/// session.undo();
/// const jpeg = session.export_jpeg();
/// ```
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create an empty session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        JsEditSession {
            inner: EditSession::default(),
        }
    }

    /// Create an empty session from a config object such as
    /// `{ max_history: 20, jpeg_quality: 85 }`. Missing fields use defaults.
    ///
    /// # Errors
    /// Returns error if the config cannot be deserialized or is invalid
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        let inner = EditSession::new(config).map_err(to_js_error)?;
        Ok(JsEditSession { inner })
    }

    /// Start editing a copy of `image`.
    pub fn load(&mut self, image: &JsImage) -> Result<(), JsValue> {
        self.inner
            .load(image.image().clone())
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Decode JPEG or PNG bytes and start editing them.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<JsImage, JsValue> {
        self.inner
            .load_bytes(bytes)
            .map(to_js_image)
            .map_err(to_js_error)
    }

    /// Apply an edit operation object and commit it.
    pub fn apply_op(&mut self, op: JsValue) -> Result<JsImage, JsValue> {
        let op = parse_op(op)?;
        self.apply(&op)
    }

    /// Run an edit operation object without committing it.
    pub fn preview_op(&self, op: JsValue) -> Result<JsImage, JsValue> {
        let op = parse_op(op)?;
        self.inner
            .preview(&op)
            .map(JsImage::from_image)
            .map_err(to_js_error)
    }

    /// Rotate by the configured rotate-tool step.
    pub fn rotate_step(&mut self) -> Result<JsImage, JsValue> {
        self.inner
            .rotate_step()
            .map(to_js_image)
            .map_err(to_js_error)
    }

    /// Step back to the previous image.
    pub fn undo(&mut self) -> Result<JsImage, JsValue> {
        self.inner.undo().map(to_js_image).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn history_len(&self) -> usize {
        self.inner.history_len()
    }

    /// The image being edited, or `undefined` before a load.
    pub fn current(&self) -> Option<JsImage> {
        self.inner.current().map(to_js_image)
    }

    /// The image as loaded, or `undefined` before a load.
    pub fn original(&self) -> Option<JsImage> {
        self.inner.original().map(to_js_image)
    }

    /// Encode the current image as JPEG at the configured quality.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export_jpeg().map_err(to_js_error)
    }
}

impl JsEditSession {
    pub(crate) fn apply(&mut self, op: &EditOp) -> Result<JsImage, JsValue> {
        self.inner.apply(op).map(to_js_image).map_err(to_js_error)
    }
}

fn parse_op(op: JsValue) -> Result<EditOp, JsValue> {
    serde_wasm_bindgen::from_value(op)
        .map_err(|e| JsValue::from_str(&format!("Invalid edit operation: {}", e)))
}
