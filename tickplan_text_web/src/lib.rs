// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web/WASM text measurement adapter.
//!
//! This crate provides a [`tickplan_text::TextMeasurer`] implementation for
//! `wasm32-*` targets using HTML Canvas `measureText`.
//!
//! Notes:
//! - This uses `web-sys`/`wasm-bindgen` only on `wasm32` targets.
//! - Non-`wasm32` builds fall back to a heuristic measurer.
//! - [`TextMeasurer::destroy`] shrinks the backing canvas to zero so browsers
//!   can reclaim its bitmap.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
use alloc::{format, string::String};
use tickplan_text::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};

/// A `wasm32` measurer backed by HTML Canvas 2D text metrics.
///
/// On non-`wasm32` targets, this type is still available but always falls back
/// to [`HeuristicTextMeasurer`].
#[derive(Clone, Debug)]
pub struct WebTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    ctx: web_sys::CanvasRenderingContext2d,
    destroyed: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for WebTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl WebTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    fn css_font(style: &TextStyle) -> String {
        let family = style.font_family.as_css_family();
        let weight = style.font_weight.0;
        let font_style = match style.font_style {
            tickplan_text::FontStyle::Normal => "normal",
            tickplan_text::FontStyle::Italic => "italic",
            tickplan_text::FontStyle::Oblique => "oblique",
        };
        format!("{font_style} {weight} {}px {family}", style.font_size)
    }

    /// Creates a web measurer using an offscreen canvas.
    ///
    /// This requires a browser-like environment with `window` and `document`.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Result<Self, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast as _;

        let window = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("tickplan_text_web: missing window"))?;
        let document = window.document().ok_or_else(|| {
            wasm_bindgen::JsValue::from_str("tickplan_text_web: missing document")
        })?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| {
                wasm_bindgen::JsValue::from_str("tickplan_text_web: missing 2d context")
            })?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            destroyed: false,
        })
    }

    /// Creates a web measurer that uses an existing canvas 2D context.
    ///
    /// The canvas is shrunk to zero size when the measurer is destroyed.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_canvas_context(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            destroyed: false,
        }
    }

    /// Creates a non-web measurer that always falls back to heuristics.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn new() -> Self {
        Self { destroyed: false }
    }

    /// Returns `true` once [`TextMeasurer::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl TextMeasurer for WebTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        #[cfg(target_arch = "wasm32")]
        {
            if self.destroyed {
                return HeuristicTextMeasurer.measure(text, style);
            }
            self.ctx.set_font(&Self::css_font(&style));
            let metrics = match self.ctx.measure_text(text) {
                Ok(m) => m,
                Err(_) => return HeuristicTextMeasurer.measure(text, style),
            };

            // Bounding box fields may be 0 in older engines; treat zeros as unknown.
            let width = metrics.width();
            let ascent = metrics.actual_bounding_box_ascent();
            let descent = metrics.actual_bounding_box_descent();

            let ascent = if ascent > 0.0 {
                ascent
            } else {
                0.8 * style.font_size
            };
            let descent = if descent > 0.0 {
                descent
            } else {
                0.2 * style.font_size
            };

            TextMetrics {
                advance_width: width,
                ascent,
                descent,
                leading: 0.0,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        HeuristicTextMeasurer.measure(text, style)
    }

    fn destroy(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(canvas) = self.ctx.canvas() {
            canvas.set_width(0);
            canvas.set_height(0);
        }
        self.destroyed = true;
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_fallback_matches_heuristic() {
        let m = WebTextMeasurer::new();
        let style = TextStyle::new(10.0);
        assert_eq!(
            m.measure("100", style.clone()),
            HeuristicTextMeasurer.measure("100", style)
        );
    }

    #[test]
    fn destroy_is_recorded() {
        let mut m = WebTextMeasurer::new();
        assert!(!m.is_destroyed(), "fresh measurer is live");
        m.destroy();
        assert!(m.is_destroyed(), "destroy should mark the measurer");
    }
}
