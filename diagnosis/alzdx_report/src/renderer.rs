use crate::error::RenderError;
use crate::geometry::PageGeometry;
use crate::layout::{paginate, Page, Report, REPORT_TITLE};
use crate::pdf::write_pdf;
use alzdx_schema::{Identity, PatientRecord};
use serde::{Deserialize, Serialize};

/// Suggested download name for the rendered document.
pub const REPORT_FILE_NAME: &str = "diagnosis_report.pdf";
pub const REPORT_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Print each section's explanatory sentence under its heading.
    pub describe_sections: bool,
}

/// Renders diagnosis reports with a fixed page geometry.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    geometry: PageGeometry,
    options: RenderOptions,
}

impl ReportRenderer {
    pub fn new(geometry: PageGeometry, options: RenderOptions) -> Result<Self, RenderError> {
        geometry.validate()?;
        Ok(Self { geometry, options })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Builds and paginates the report without serializing it.
    pub fn layout(
        &self,
        record: &PatientRecord,
        probability: f64,
        identity: &Identity,
    ) -> Result<Vec<Page>, RenderError> {
        let report = Report::build(record, probability, identity, self.options.describe_sections)?;
        paginate(&report, &self.geometry)
    }

    /// Produces the complete PDF document. The caller decides where the
    /// bytes go.
    pub fn render(
        &self,
        record: &PatientRecord,
        probability: f64,
        identity: &Identity,
    ) -> Result<Vec<u8>, RenderError> {
        let pages = self.layout(record, probability, identity)?;
        let bytes = write_pdf(&pages, &self.geometry, REPORT_TITLE)?;
        log::debug!("rendered report: {} pages, {} bytes", pages.len(), bytes.len());
        Ok(bytes)
    }
}
