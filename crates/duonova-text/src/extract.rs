//! Local document extraction (PDF and DOCX)

use crate::{Anchor, LayoutLine, StructuredDocument, TextError, TextNormalizer};
use duonova_domain::FileType;
use lopdf::{Dictionary, Object};
use tracing::{debug, info, warn};

/// Document type for a file name, by extension
pub fn detect_file_type(file_name: &str) -> Result<FileType, TextError> {
    FileType::from_file_name(file_name)
        .ok_or_else(|| TextError::UnsupportedType(file_name.to_string()))
}

/// Read a document into positioned lines and link anchors
///
/// PDF pages are separated by form feeds in the extracted text; each line's
/// `top` is its row on the page. PDF link annotations with a URI action become
/// anchors, placed on the row their rectangle's top edge maps to. DOCX paragraphs and table rows each become
/// one line on page 0, with external hyperlinks recorded as anchors.
pub fn extract_document(bytes: &[u8], file_type: FileType) -> Result<StructuredDocument, TextError> {
    debug!("Extracting {} document ({} bytes)", file_type.as_str(), bytes.len());

    let document = match file_type {
        FileType::Pdf => extract_pdf(bytes)?,
        FileType::Docx => extract_docx(bytes)?,
    };

    info!(
        "Extracted {} lines and {} anchors from {} document",
        document.lines.len(),
        document.anchors.len(),
        file_type.as_str()
    );
    Ok(document)
}

/// Read a document and return normalized text
///
/// Returns [`TextError::Empty`] when the document has no visible text.
pub fn extract_text(bytes: &[u8], file_type: FileType) -> Result<String, TextError> {
    let document = extract_document(bytes, file_type)?;
    if document.is_blank() && document.anchors.is_empty() {
        return Err(TextError::Empty);
    }

    let text = TextNormalizer::new().normalize_document(&document);
    if text.is_empty() {
        return Err(TextError::Empty);
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<StructuredDocument, TextError> {
    // pdf-extract can panic on malformed fonts
    let raw = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    })) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {}", e);
            return Err(TextError::Pdf(e.to_string()));
        }
        Err(_) => {
            warn!("PDF extraction panicked, likely a malformed font");
            return Err(TextError::Pdf("parser panicked on malformed content".to_string()));
        }
    };

    let mut document = StructuredDocument::default();
    let mut rows_per_page = Vec::new();
    for (page, content) in raw.split('\u{c}').enumerate() {
        let mut rows = 0;
        for (row, line) in content.lines().enumerate() {
            document
                .lines
                .push(LayoutLine::new(page as u32, row as f32, 0.0, line));
            rows += 1;
        }
        rows_per_page.push(rows);
    }

    document.anchors = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_link_anchors(bytes, &rows_per_page)
    }))
    .unwrap_or_else(|_| {
        warn!("PDF link scan panicked, continuing without anchors");
        Vec::new()
    });
    Ok(document)
}

/// URI link annotations, one anchor per link
///
/// `rows_per_page` maps each page's height onto its extracted line rows.
fn pdf_link_anchors(bytes: &[u8], rows_per_page: &[usize]) -> Vec<Anchor> {
    let pdf = match lopdf::Document::load_mem(bytes) {
        Ok(pdf) => pdf,
        Err(e) => {
            debug!("Skipping PDF link scan: {}", e);
            return Vec::new();
        }
    };

    let mut anchors = Vec::new();
    for (index, page_id) in pdf.get_pages().into_values().enumerate() {
        let Ok(page) = pdf.get_object(page_id).and_then(Object::as_dict) else {
            continue;
        };
        let height = page_height(&pdf, page);
        let rows = rows_per_page.get(index).copied().unwrap_or(0).max(1) as f32;

        let Some(annotations) = page
            .get(b"Annots")
            .ok()
            .and_then(|annots| resolve(&pdf, annots).as_array().ok())
        else {
            continue;
        };

        for annotation in annotations {
            let Ok(annotation) = resolve(&pdf, annotation).as_dict() else {
                continue;
            };
            let Some(uri) = annotation
                .get(b"A")
                .ok()
                .and_then(|action| resolve(&pdf, action).as_dict().ok())
                .and_then(|action| action.get(b"URI").ok())
                .and_then(|uri| resolve(&pdf, uri).as_str().ok())
                .map(|uri| String::from_utf8_lossy(uri).trim().to_string())
                .filter(|uri| !uri.is_empty())
            else {
                continue;
            };

            let top_edge = annotation
                .get(b"Rect")
                .ok()
                .and_then(|rect| resolve(&pdf, rect).as_array().ok())
                .map(|rect| {
                    rect.iter()
                        .skip(1)
                        .step_by(2)
                        .filter_map(|y| number(resolve(&pdf, y)))
                        .fold(0.0_f32, f32::max)
                })
                .unwrap_or(height);
            let row = ((height - top_edge).max(0.0) * rows / height).round().min(rows - 1.0);

            anchors.push(Anchor::new(index as u32, row, uri));
        }
    }
    anchors
}

fn page_height(pdf: &lopdf::Document, page: &Dictionary) -> f32 {
    page.get(b"MediaBox")
        .ok()
        .and_then(|media_box| resolve(pdf, media_box).as_array().ok())
        .and_then(|media_box| {
            let bottom = number(resolve(pdf, media_box.get(1)?))?;
            let top = number(resolve(pdf, media_box.get(3)?))?;
            Some((top - bottom).abs())
        })
        .filter(|height| *height > 0.0)
        .unwrap_or(792.0)
}

fn resolve<'a>(pdf: &'a lopdf::Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => pdf.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value as f32),
        _ => None,
    }
}

fn extract_docx(bytes: &[u8]) -> Result<StructuredDocument, TextError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| {
        warn!("DOCX parse failed: {}", e);
        TextError::Docx(e.to_string())
    })?;

    let mut document = StructuredDocument::default();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => {
                let row = document.lines.len() as f32;
                let text = paragraph_text(paragraph, row, &mut document.anchors);
                document.lines.push(LayoutLine::new(0, row, 0.0, text));
            }
            docx_rs::DocumentChild::Table(table) => {
                for table_row in &table.rows {
                    let docx_rs::TableChild::TableRow(tr) = table_row;
                    let row = document.lines.len() as f32;
                    let mut cells = Vec::new();
                    for cell in &tr.cells {
                        let docx_rs::TableRowChild::TableCell(tc) = cell;
                        let mut parts = Vec::new();
                        for content in &tc.children {
                            if let docx_rs::TableCellContent::Paragraph(paragraph) = content {
                                parts.push(paragraph_text(paragraph, row, &mut document.anchors));
                            }
                        }
                        let cell_text = parts.join(" ");
                        if !cell_text.trim().is_empty() {
                            cells.push(cell_text);
                        }
                    }
                    document
                        .lines
                        .push(LayoutLine::new(0, row, 0.0, cells.join(" | ")));
                }
            }
            _ => {}
        }
    }
    Ok(document)
}

fn paragraph_text(paragraph: &docx_rs::Paragraph, row: f32, anchors: &mut Vec<Anchor>) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run(run, &mut text),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run(run, &mut text);
                    }
                }
                if let docx_rs::HyperlinkData::External { path, .. } = &link.link {
                    if !path.is_empty() {
                        anchors.push(Anchor::new(0, row, path.clone()));
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text) => out.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => out.push(' '),
            _ => {}
        }
    }
}
