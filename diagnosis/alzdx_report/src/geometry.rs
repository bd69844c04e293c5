use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// Page size, margins and type sizes in PDF points. Defaults to A4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub title_font_size: f32,
    pub font_size: f32,
    /// Vertical advance of one line, also used as the gap between sections.
    pub line_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_top: 28.35,
            margin_bottom: 56.7,
            margin_left: 28.35,
            margin_right: 28.35,
            title_font_size: 14.0,
            font_size: 12.0,
            line_height: 18.0,
        }
    }
}

impl PageGeometry {
    /// Space a section needs before it is started on the current page:
    /// its heading plus its first line.
    pub fn break_threshold(&self) -> f32 {
        2.0 * self.line_height
    }

    /// Lowest cursor position (from the top edge) at which body text may
    /// start without crossing the bottom margin.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("title_font_size", self.title_font_size),
            ("font_size", self.font_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(RenderError::InvalidGeometry(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let margins = [
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ];
        if margins.iter().any(|m| !(m.is_finite() && *m >= 0.0)) {
            return Err(RenderError::InvalidGeometry(
                "margins must be non-negative".into(),
            ));
        }
        if self.content_width() <= 0.0 {
            return Err(RenderError::InvalidGeometry(
                "left and right margins leave no room for text".into(),
            ));
        }
        if self.content_bottom() - self.margin_top < self.break_threshold() {
            return Err(RenderError::InvalidGeometry(format!(
                "page body of {:.1}pt cannot hold a heading and one line",
                self.content_bottom() - self.margin_top
            )));
        }
        if self.line_height < self.title_font_size.max(self.font_size) {
            return Err(RenderError::InvalidGeometry(
                "line_height must be at least the largest font size".into(),
            ));
        }
        Ok(())
    }
}
