//! Diagnosis report rendering.
//!
//! One renderer, driven by the schema's section table, lays out the
//! identity header, every field section and the prediction outcome on
//! paginated pages and serializes them to PDF.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod pdf;
pub mod renderer;
pub mod text;

pub use error::RenderError;
pub use geometry::PageGeometry;
pub use layout::{
    confidence_line, paginate, prediction_line, Page, PlacedLine, Report, ReportLine,
    ReportSection, REPORT_TITLE,
};
pub use renderer::{RenderOptions, ReportRenderer, REPORT_FILE_NAME, REPORT_MIME_TYPE};
pub use text::Font;
