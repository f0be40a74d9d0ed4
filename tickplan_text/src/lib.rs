// Copyright 2025 the TickPlan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for axis layout.
//!
//! `TickPlan` needs to measure tick labels and titles to decide how much room
//! an axis takes and which ticks can be labeled without overlapping. Shaping
//! and glyph layout stay downstream, so layout code depends on a tiny text
//! measurement interface.
//!
//! This crate is intentionally:
//! - small and dependency-free,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (native shaping engines and web canvas measurement can
//!   both implement the same trait).
//!
//! Measurers may hold backing resources (an offscreen canvas, font caches).
//! Those are released through [`TextMeasurer::destroy`]; [`ScopedMeasurer`]
//! ties that call to a lexical scope.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use core::ops::{Deref, DerefMut};

/// A minimal text measurement interface used by axis layout.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine (e.g. Parley), or
/// - backed by web platform text measurement (e.g. HTML canvas).
///
/// Different implementations must be substitutable: the same text and style
/// should produce the same box, up to the precision of the backend.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;

    /// Release any backing resources held by this measurer.
    ///
    /// Called once at the end of a layout pass. Measuring after `destroy` is
    /// allowed but may re-acquire resources.
    fn destroy(&mut self) {}
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it’s just enough to make axis layout
/// consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }

    /// Parses a CSS-style family name.
    ///
    /// Generic keywords map to the generic variants; anything else is kept as
    /// a named family.
    #[must_use]
    pub fn from_css(family: &str) -> Self {
        match family.trim() {
            "serif" => Self::Serif,
            "sans-serif" | "" => Self::SansSerif,
            "monospace" => Self::Monospace,
            name => Self::Named(Arc::from(name)),
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty string.
    pub const ZERO: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns the `(width, height)` box of the measured line.
    #[must_use]
    pub fn bbox(&self) -> (f64, f64) {
        (self.advance_width, self.line_height())
    }
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        }
    }
}

/// Owns a measurer for the duration of a scope and destroys it on exit.
///
/// The guard calls [`TextMeasurer::destroy`] when dropped, so resources are
/// released on every exit path, including early returns and unwinding.
#[derive(Debug)]
pub struct ScopedMeasurer<M: TextMeasurer> {
    inner: M,
}

impl<M: TextMeasurer> ScopedMeasurer<M> {
    /// Takes ownership of `measurer` until the guard is dropped.
    #[must_use]
    pub fn new(measurer: M) -> Self {
        Self { inner: measurer }
    }
}

impl<M: TextMeasurer> Deref for ScopedMeasurer<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.inner
    }
}

impl<M: TextMeasurer> DerefMut for ScopedMeasurer<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.inner
    }
}

impl<M: TextMeasurer> Drop for ScopedMeasurer<M> {
    fn drop(&mut self) {
        self.inner.destroy();
    }
}

/// Runs `f` with a measurer that is destroyed as soon as `f` finishes.
pub fn with_scoped_measurer<M: TextMeasurer, R>(measurer: M, f: impl FnOnce(&M) -> R) -> R {
    let scoped = ScopedMeasurer::new(measurer);
    f(&scoped)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;

    struct CountingMeasurer {
        destroyed: Rc<Cell<u32>>,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
            HeuristicTextMeasurer.measure(text, style)
        }

        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    #[test]
    fn heuristic_measurer_scales_with_length_and_size() {
        let short = HeuristicTextMeasurer.measure("ab", TextStyle::new(10.0));
        let long = HeuristicTextMeasurer.measure("abcd", TextStyle::new(10.0));
        assert!((short.advance_width - 12.0).abs() < 1e-9);
        assert!((long.advance_width - 24.0).abs() < 1e-9);
        assert!((short.line_height() - 10.0).abs() < 1e-9);
        assert_eq!(short.bbox(), (short.advance_width, short.line_height()));
    }

    #[test]
    fn font_family_parses_css_keywords() {
        assert_eq!(FontFamily::from_css("serif"), FontFamily::Serif);
        assert_eq!(FontFamily::from_css(" monospace "), FontFamily::Monospace);
        assert_eq!(
            FontFamily::from_css("Arial"),
            FontFamily::Named(Arc::from("Arial"))
        );
        assert_eq!(FontFamily::from_css("Arial").as_css_family(), "Arial");
    }

    #[test]
    fn scoped_measurer_destroys_on_scope_exit() {
        let destroyed = Rc::new(Cell::new(0));
        let width = with_scoped_measurer(
            CountingMeasurer {
                destroyed: destroyed.clone(),
            },
            |m| m.measure("abc", TextStyle::new(10.0)).advance_width,
        );
        assert!(width > 0.0);
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn scoped_measurer_destroys_when_unwinding() {
        let destroyed = Rc::new(Cell::new(0));
        let counter = destroyed.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            with_scoped_measurer(CountingMeasurer { destroyed: counter }, |_m| {
                panic!("measurement failed");
            })
        }));
        assert!(result.is_err());
        assert_eq!(destroyed.get(), 1);
    }
}
