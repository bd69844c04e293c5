//! Report content and page layout.
//!
//! A [`Report`] is an ordered list of sections built from the schema's
//! section table. [`paginate`] places its lines on pages with a vertical
//! cursor, starting a new page only at section boundaries.

use crate::error::RenderError;
use crate::geometry::PageGeometry;
use crate::text::{encode_win_ansi, encoded_width, text_width, wrap, Font};
use alzdx_model::{format_confidence, label_for};
use alzdx_schema::{Field, Identity, PatientRecord, Section};

pub const REPORT_TITLE: &str = "Alzheimer's Disease Diagnosis Report";
pub const PREDICTION_CAPTION: &str = "Prediction (0: No Alzheimer's, 1: Alzheimer's)";
pub const CONFIDENCE_CAPTION: &str = "Confidence Score";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Centered document title.
    Title,
    Heading,
    /// Bold body line.
    Emphasis,
    Body,
    /// Body text wrapped to the content width.
    Paragraph,
}

impl LineStyle {
    fn font(self) -> Font {
        match self {
            LineStyle::Title | LineStyle::Heading | LineStyle::Emphasis => Font::Bold,
            LineStyle::Body | LineStyle::Paragraph => Font::Regular,
        }
    }

    fn size(self, geometry: &PageGeometry) -> f32 {
        match self {
            LineStyle::Title => geometry.title_font_size,
            _ => geometry.font_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub text: String,
    pub style: LineStyle,
}

impl ReportLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub name: String,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

/// Renders a raw field value. Whole numbers print without a fraction.
pub fn format_value(field: Field, value: f64) -> Result<String, RenderError> {
    if !value.is_finite() {
        return Err(RenderError::NonFiniteValue { field, value });
    }
    Ok(format!("{value}"))
}

pub fn prediction_line(probability: f64) -> String {
    format!("{PREDICTION_CAPTION}: {}", label_for(probability))
}

pub fn confidence_line(probability: f64) -> String {
    format!("{CONFIDENCE_CAPTION}: {}", format_confidence(probability))
}

impl Report {
    /// Builds the identity header, one section per schema section, and the
    /// closing prediction block.
    pub fn build(
        record: &PatientRecord,
        probability: f64,
        identity: &Identity,
        describe_sections: bool,
    ) -> Result<Self, RenderError> {
        if !(probability.is_finite() && (0.0..=1.0).contains(&probability)) {
            return Err(RenderError::InvalidProbability(probability));
        }

        let mut sections = Vec::with_capacity(Section::ALL.len() + 2);
        sections.push(ReportSection {
            name: "Identity".into(),
            lines: vec![
                ReportLine::new(REPORT_TITLE, LineStyle::Title),
                ReportLine::new(format!("Name: {}", identity.name), LineStyle::Emphasis),
                ReportLine::new(format!("Email: {}", identity.email), LineStyle::Emphasis),
            ],
        });

        for section in Section::ALL {
            let mut lines = vec![ReportLine::new(section.title(), LineStyle::Heading)];
            if describe_sections {
                lines.push(ReportLine::new(section.description(), LineStyle::Paragraph));
            }
            for &field in section.fields() {
                let value = format_value(field, record.get(field))?;
                lines.push(ReportLine::new(
                    format!("{}: {value}", field.label()),
                    LineStyle::Body,
                ));
            }
            sections.push(ReportSection {
                name: section.title().into(),
                lines,
            });
        }

        sections.push(ReportSection {
            name: "Prediction".into(),
            lines: vec![
                ReportLine::new(prediction_line(probability), LineStyle::Body),
                ReportLine::new(confidence_line(probability), LineStyle::Body),
            ],
        });

        Ok(Self { sections })
    }

    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.sections.iter().flat_map(|s| s.lines.iter())
    }
}

/// A line positioned on a page. `y` is the baseline in PDF coordinates
/// (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

/// Lays the report out on pages.
///
/// Before each section the remaining space above the bottom margin is
/// compared with the section's height, and never less than the break
/// threshold (heading plus one line). If it is short, the section starts on
/// a new page, so sections are never split. A section taller than a whole
/// page body may run into the bottom margin but not past the page edge.
pub fn paginate(report: &Report, geometry: &PageGeometry) -> Result<Vec<Page>, RenderError> {
    geometry.validate()?;

    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut cursor = geometry.margin_top;

    for (i, section) in report.sections.iter().enumerate() {
        let lines = shape_section(section, geometry)?;
        let needed = (lines.len() as f32 * geometry.line_height).max(geometry.break_threshold());

        if i > 0 {
            cursor += geometry.line_height;
        }
        let remaining = geometry.content_bottom() - cursor;
        if remaining < needed && !page.lines.is_empty() {
            log::debug!(
                "page {} has {remaining:.1}pt left, '{}' needs {needed:.1}pt; breaking",
                pages.len() + 1,
                section.name
            );
            pages.push(std::mem::take(&mut page));
            cursor = geometry.margin_top;
        }

        for (text, style, width) in lines {
            if cursor + geometry.line_height > geometry.height {
                return Err(RenderError::LayoutOverflow {
                    section: section.name.clone(),
                });
            }
            let size = style.size(geometry);
            let x = match style {
                LineStyle::Title => ((geometry.width - width) / 2.0).max(geometry.margin_left),
                _ => geometry.margin_left,
            };
            page.lines.push(PlacedLine {
                text,
                font: style.font(),
                size,
                x,
                y: geometry.height - cursor - size,
            });
            cursor += geometry.line_height;
        }
    }
    pages.push(page);
    Ok(pages)
}

/// Wraps any line except the title that is wider than the content width,
/// then measures the result. A word wider than the content width cannot be placed.
fn shape_section(
    section: &ReportSection,
    geometry: &PageGeometry,
) -> Result<Vec<(String, LineStyle, f32)>, RenderError> {
    let max_width = geometry.content_width();
    let mut shaped = Vec::with_capacity(section.lines.len());
    for line in &section.lines {
        let font = line.style.font();
        let size = line.style.size(geometry);
        let fits = text_width(&line.text, font, size)? <= max_width;
        let texts = if fits || line.style == LineStyle::Title {
            vec![line.text.clone()]
        } else {
            wrap(&line.text, font, size, max_width)?
        };
        for text in texts {
            let width = encoded_width(&encode_win_ansi(&text)?, font, size);
            if width > max_width {
                log::debug!("{width:.1}pt line in '{}' exceeds {max_width:.1}pt", section.name);
                return Err(RenderError::LayoutOverflow {
                    section: section.name.clone(),
                });
            }
            shaped.push((text, line.style, width));
        }
    }
    Ok(shaped)
}
