//! Resume PDF export
//!
//! Renders the profile as a single-column A4 resume. Text is laid out
//! top-down with a moving cursor; a new page is started whenever the
//! cursor runs past the bottom margin.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::info;

use crate::errors::{FolioError, Result};
use crate::profile::ProfileData;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;

const BODY_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 13.0;
const TITLE_SIZE: f32 = 20.0;

/// Line advance in mm for a given font size
fn line_height(size: f32) -> f32 {
    size * 0.45
}

/// Characters that fit one body line inside the margins
const WRAP_COLUMNS: usize = 95;

/// Default output file next to the working directory
pub fn default_output_path(profile: &ProfileData) -> PathBuf {
    let stem = profile.full_name().replace(' ', "_");
    PathBuf::from(format!("{stem}_Resume.pdf"))
}

/// Write the profile as an A4 resume PDF
pub fn export_resume(profile: &ProfileData, path: &Path) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        format!("{} - Resume", profile.full_name()),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "content",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| FolioError::PdfExportError(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| FolioError::PdfExportError(e.to_string()))?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        cursor: PAGE_HEIGHT - MARGIN,
    };

    writer.heading(&bold, TITLE_SIZE, &profile.full_name());
    writer.line(&regular, BODY_SIZE, &profile.title);
    if let Some(ref github) = profile.social.github {
        writer.line(&regular, BODY_SIZE, github);
    }
    if let Some(ref linkedin) = profile.social.linkedin {
        writer.line(&regular, BODY_SIZE, linkedin);
    }
    writer.gap();

    writer.heading(&bold, HEADING_SIZE, "Summary");
    writer.paragraph(&regular, &profile.summary);
    writer.gap();

    if !profile.experiences.is_empty() {
        writer.heading(&bold, HEADING_SIZE, "Experience");
        for entry in &profile.experiences {
            writer.line(
                &bold,
                BODY_SIZE,
                &format!("{} at {} ({})", entry.role, entry.company, entry.period),
            );
            for item in &entry.description {
                writer.paragraph(&regular, item);
            }
            writer.gap();
        }
    }

    if !profile.projects.is_empty() {
        writer.heading(&bold, HEADING_SIZE, "Projects");
        for project in &profile.projects {
            writer.line(&bold, BODY_SIZE, &project.name);
            for item in &project.description {
                writer.paragraph(&regular, item);
            }
            if !project.skills.is_empty() {
                writer.line(
                    &regular,
                    BODY_SIZE,
                    &format!("Technologies: {}", project.skills.join(", ")),
                );
            }
            writer.gap();
        }
    }

    if !profile.education.is_empty() {
        writer.heading(&bold, HEADING_SIZE, "Education");
        for entry in &profile.education {
            writer.line(
                &regular,
                BODY_SIZE,
                &format!("{}, {} ({})", entry.degree, entry.institution, entry.period),
            );
        }
        writer.gap();
    }

    if !profile.skills.is_empty() {
        writer.heading(&bold, HEADING_SIZE, "Skills");
        writer.paragraph(&regular, &profile.skills.join(", "));
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| FolioError::PdfExportError(e.to_string()))?;

    info!("Resume exported to {}", path.display());
    Ok(())
}

/// Cursor-based writer that spills onto new pages as it fills
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor: f32,
}

impl PageWriter<'_> {
    fn advance(&mut self, amount: f32) {
        self.cursor -= amount;
        if self.cursor < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, font: &IndirectFontRef, size: f32, text: &str) {
        self.advance(line_height(size));
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.cursor), font);
    }

    fn heading(&mut self, font: &IndirectFontRef, size: f32, text: &str) {
        self.advance(line_height(size) * 0.6);
        self.line(font, size, text);
    }

    fn paragraph(&mut self, font: &IndirectFontRef, text: &str) {
        for wrapped in textwrap::wrap(text, WRAP_COLUMNS) {
            self.line(font, BODY_SIZE, &wrapped);
        }
    }

    fn gap(&mut self) {
        self.advance(line_height(BODY_SIZE) * 0.8);
    }
}
