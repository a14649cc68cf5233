//! Photoedit WASM - WebAssembly bindings for photoedit
//!
//! This crate exposes the photoedit-core editing functionality to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - `JsImage`, the RGBA image wrapper
//! - `transform` - Stateless transforms (rotate, scale, crop, color)
//! - `session` - `JsEditSession`, editing with undo history and export
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@photoedit/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession();
//! const image = session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Loaded ${image.width}x${image.height}`);
//! ```

use js_sys::Array;
use photoedit_core::{AspectRatio, Filter, ScalePreset};
use wasm_bindgen::prelude::*;

mod session;
mod transform;
mod types;

pub use session::JsEditSession;
pub use transform::{brightness, contrast, crop, filter, rotate, scale};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Crop presets as `[label, ratio]` pairs, e.g. `["16:9", 1.777]`.
#[wasm_bindgen]
pub fn aspect_ratio_presets() -> Array {
    AspectRatio::ALL
        .iter()
        .map(|preset| {
            Array::of2(
                &JsValue::from_str(preset.label()),
                &JsValue::from_f64(preset.ratio()),
            )
        })
        .collect()
}

/// Scale tool factors.
#[wasm_bindgen]
pub fn scale_presets() -> Array {
    ScalePreset::ALL
        .iter()
        .map(|preset| JsValue::from_f64(preset.factor()))
        .collect()
}

/// Filter names accepted by `filter()` and edit operations.
#[wasm_bindgen]
pub fn filter_names() -> Array {
    Filter::ALL
        .iter()
        .map(|f| JsValue::from_str(filter_name(*f)))
        .collect()
}

fn filter_name(filter: Filter) -> &'static str {
    match filter {
        Filter::None => "none",
        Filter::Grayscale => "grayscale",
        Filter::Vintage => "vintage",
        Filter::CoolTone => "cool_tone",
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_presets_lengths() {
        assert_eq!(aspect_ratio_presets().length(), 5);
        assert_eq!(scale_presets().length(), 6);
        assert_eq!(filter_names().length(), 4);
    }
}
