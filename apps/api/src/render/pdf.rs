//! Styled PDF writer for resumes and cover letters.
//!
//! Layout mirrors the document styles used across the product: a centered
//! 28pt name header in ink blue, a 10pt slate contact line, 14pt bold
//! section headings, and 10pt body text on 14pt leading with indented
//! bullets. If the styled pass fails to write, the document is retried
//! with a plain single-face layout so a download is still produced.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use tracing::warn;

use crate::errors::AppError;
use crate::models::document::DocumentType;
use crate::models::profile::Profile;
use crate::render::blocks::{document_blocks, Block};
use crate::render::contact_line;
use crate::render::layout::{self, FontFace};

// ────────────────────────────────────────────────────────────────────────────
// Style constants (sizes and spacing in points)
// ────────────────────────────────────────────────────────────────────────────

const TITLE_SIZE: f32 = 28.0;
const TITLE_LEADING: f32 = 34.0;
const CONTACT_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 14.0;
const HEADING_LEADING: f32 = 17.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 14.0;

const SPACE_AFTER_TITLE: f32 = 6.0;
const SPACE_AFTER_CONTACT: f32 = 20.0;
const HEADER_GAP: f32 = 14.4;
const SPACE_BEFORE_HEADING: f32 = 12.0;
const SPACE_AFTER_HEADING: f32 = 8.0;
const SPACE_AFTER_LINE: f32 = 6.0;
const SPACE_AFTER_BULLET: f32 = 4.0;
const PARAGRAPH_GAP: f32 = 10.8;

const BULLET_MARKER_INDENT: f32 = 10.0;
const BULLET_TEXT_INDENT: f32 = 20.0;

/// #2c3e50, headings and the name header.
const INK: (f32, f32, f32) = (0.173, 0.243, 0.314);
/// #7f8c8d, the contact line.
const SLATE: (f32, f32, f32) = (0.498, 0.549, 0.553);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Renders a document to PDF bytes.
///
/// The styled layout is attempted first; on a write failure the plain
/// layout is used instead, so the caller only sees an error when no valid
/// PDF can be produced at all.
pub fn render_pdf(
    doc_type: DocumentType,
    content: &str,
    profile: &Profile,
) -> Result<Vec<u8>, AppError> {
    match styled_pdf(doc_type, content, profile) {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            warn!(error = %err, doc_type = doc_type.as_str(), "styled PDF write failed, retrying with plain layout");
            plain_pdf(doc_type, content, profile)
        }
    }
}

fn styled_pdf(
    doc_type: DocumentType,
    content: &str,
    profile: &Profile,
) -> Result<Vec<u8>, AppError> {
    let name = profile.contact.name.trim();
    let mut writer = PdfWriter::new(doc_type.label())?;

    writer.draw_centered(name, FontFace::HelveticaBold, TITLE_SIZE, TITLE_LEADING, INK);
    writer.space(SPACE_AFTER_TITLE);
    let contact = contact_line(profile);
    if !contact.is_empty() {
        writer.draw_centered(&contact, FontFace::Helvetica, CONTACT_SIZE, BODY_LEADING, SLATE);
        writer.space(SPACE_AFTER_CONTACT);
    }
    writer.space(HEADER_GAP);

    for block in document_blocks(doc_type, content, name) {
        match block {
            Block::Heading(text) => {
                writer.space(SPACE_BEFORE_HEADING);
                writer.draw_wrapped(&text, FontFace::HelveticaBold, HEADING_SIZE, HEADING_LEADING, 0.0, INK);
                writer.space(SPACE_AFTER_HEADING);
            }
            Block::Bullet(text) => {
                writer.draw_bullet(&text);
                writer.space(SPACE_AFTER_BULLET);
            }
            Block::Paragraph(text) => {
                writer.draw_wrapped(&text, FontFace::Helvetica, BODY_SIZE, BODY_LEADING, 0.0, BLACK);
                writer.space(paragraph_gap(doc_type));
            }
            Block::Signature(signer) => {
                writer.draw_wrapped(&signer, FontFace::HelveticaBold, BODY_SIZE, BODY_LEADING, 0.0, BLACK);
            }
        }
    }
    writer.finish()
}

/// Single-face fallback layout: everything in regular Helvetica, black,
/// body size. Still wraps and paginates.
fn plain_pdf(
    doc_type: DocumentType,
    content: &str,
    profile: &Profile,
) -> Result<Vec<u8>, AppError> {
    let name = profile.contact.name.trim();
    let mut writer = PdfWriter::new_plain(doc_type.label())?;

    writer.draw_wrapped(name, FontFace::Helvetica, BODY_SIZE, BODY_LEADING, 0.0, BLACK);
    let contact = contact_line(profile);
    if !contact.is_empty() {
        writer.draw_wrapped(&contact, FontFace::Helvetica, BODY_SIZE, BODY_LEADING, 0.0, BLACK);
    }
    writer.space(BODY_LEADING);

    for block in document_blocks(doc_type, content, name) {
        let text = match block {
            Block::Heading(text) => text,
            Block::Bullet(text) => format!("- {text}"),
            Block::Paragraph(text) | Block::Signature(text) => text,
        };
        writer.draw_wrapped(&text, FontFace::Helvetica, BODY_SIZE, BODY_LEADING, 0.0, BLACK);
        writer.space(SPACE_AFTER_LINE);
    }
    writer.finish()
}

fn paragraph_gap(doc_type: DocumentType) -> f32 {
    match doc_type {
        DocumentType::AtsResume => SPACE_AFTER_LINE,
        _ => PARAGRAPH_GAP,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

/// Tracks the current page, layer, and vertical cursor while writing.
///
/// `cursor_pt` is the distance in points from the top margin to the top of
/// the next line; the baseline sits one font size below it. printpdf's
/// origin is the bottom-left corner, so baselines are converted on draw.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_pt: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, AppError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(layout::PAGE_WIDTH_MM),
            Mm(layout::PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfWriter {
            doc,
            layer,
            regular,
            bold,
            cursor_pt: 0.0,
        })
    }

    /// Writer with the bold slot aliased to the regular face.
    fn new_plain(title: &str) -> Result<Self, AppError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(layout::PAGE_WIDTH_MM),
            Mm(layout::PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfWriter {
            doc,
            layer,
            bold: regular.clone(),
            regular,
            cursor_pt: 0.0,
        })
    }

    fn font(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Helvetica => &self.regular,
            FontFace::HelveticaBold => &self.bold,
        }
    }

    fn space(&mut self, pt: f32) {
        self.cursor_pt += pt;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(layout::PAGE_WIDTH_MM),
            Mm(layout::PAGE_HEIGHT_MM),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_pt = 0.0;
    }

    /// Returns the baseline offset for the next line of `size`, breaking to
    /// a new page first when the line would cross the bottom margin.
    fn line_baseline(&mut self, size: f32) -> f32 {
        let baseline = self.cursor_pt + size;
        if baseline > layout::printable_height_pt() {
            self.new_page();
            return self.cursor_pt + size;
        }
        baseline
    }

    fn set_fill(&self, (r, g, b): (f32, f32, f32)) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    /// Draws one pre-wrapped line at `x_pt` from the left margin.
    fn draw_line(
        &mut self,
        text: &str,
        face: FontFace,
        size: f32,
        leading: f32,
        x_pt: f32,
        color: (f32, f32, f32),
    ) {
        let baseline = self.line_baseline(size);
        self.set_fill(color);
        self.layer.use_text(
            text,
            size,
            Mm(x_to_mm(x_pt)),
            Mm(baseline_to_mm(baseline)),
            self.font(face),
        );
        self.cursor_pt = baseline + (leading - size);
    }

    /// Word-wraps `text` at the printable width minus `indent_pt` and draws
    /// each line.
    fn draw_wrapped(
        &mut self,
        text: &str,
        face: FontFace,
        size: f32,
        leading: f32,
        indent_pt: f32,
        color: (f32, f32, f32),
    ) {
        let avail = layout::printable_width_pt() - indent_pt;
        for line in layout::wrap_text(text, face, size, avail) {
            self.draw_line(&line, face, size, leading, indent_pt, color);
        }
    }

    /// Draws a bullet item with a hanging marker: the glyph sits at the
    /// marker indent, the text (and its wrap lines) at the text indent.
    fn draw_bullet(&mut self, text: &str) {
        let avail = layout::printable_width_pt() - BULLET_TEXT_INDENT;
        let lines = layout::wrap_text(text, FontFace::Helvetica, BODY_SIZE, avail);
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                let baseline = self.line_baseline(BODY_SIZE);
                self.set_fill(BLACK);
                self.layer.use_text(
                    "•",
                    BODY_SIZE,
                    Mm(x_to_mm(BULLET_MARKER_INDENT)),
                    Mm(baseline_to_mm(baseline)),
                    &self.regular,
                );
                self.layer.use_text(
                    line.as_str(),
                    BODY_SIZE,
                    Mm(x_to_mm(BULLET_TEXT_INDENT)),
                    Mm(baseline_to_mm(baseline)),
                    &self.regular,
                );
                self.cursor_pt = baseline + (BODY_LEADING - BODY_SIZE);
            } else {
                self.draw_line(line, FontFace::Helvetica, BODY_SIZE, BODY_LEADING, BULLET_TEXT_INDENT, BLACK);
            }
        }
    }

    /// Wraps and draws `text` centered between the margins.
    fn draw_centered(
        &mut self,
        text: &str,
        face: FontFace,
        size: f32,
        leading: f32,
        color: (f32, f32, f32),
    ) {
        let metrics = layout::get_metrics(face);
        for line in layout::wrap_text(text, face, size, layout::printable_width_pt()) {
            let width = metrics.width_pt(&line, size);
            let x_pt = ((layout::printable_width_pt() - width) / 2.0).max(0.0);
            self.draw_line(&line, face, size, leading, x_pt, color);
        }
    }

    fn finish(self) -> Result<Vec<u8>, AppError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

fn x_to_mm(x_pt: f32) -> f32 {
    layout::SIDE_MARGIN_MM + x_pt * layout::MM_PER_PT
}

fn baseline_to_mm(baseline_pt: f32) -> f32 {
    layout::PAGE_HEIGHT_MM - layout::TOP_MARGIN_MM - baseline_pt * layout::MM_PER_PT
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
