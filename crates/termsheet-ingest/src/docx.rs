use docx_rs::{
    DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild, read_docx,
};
use tracing::debug;

use crate::IngestError;

/// Extracts the raw text of a Word document, one line per paragraph.
///
/// Formatting is discarded. Table cells are walked in document order so
/// labelled fields laid out in tables still reach the parser.
pub fn extract_docx(bytes: &[u8]) -> Result<String, IngestError> {
    let docx = read_docx(bytes).map_err(|e| IngestError::ExtractionFailure(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => push_paragraph(&para.children, &mut lines),
            DocumentChild::Table(table) => push_table(&table.rows, &mut lines),
            _ => {}
        }
    }

    debug!(lines = lines.len(), "extracted docx text");
    Ok(lines.join("\n"))
}

fn push_paragraph(children: &[ParagraphChild], lines: &mut Vec<String>) {
    let mut text = String::new();
    for child in children {
        if let ParagraphChild::Run(run) = child {
            for piece in &run.children {
                if let RunChild::Text(t) = piece {
                    text.push_str(&t.text);
                }
            }
        }
    }
    if !text.is_empty() {
        lines.push(text);
    }
}

fn push_table(rows: &[TableChild], lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => push_paragraph(&para.children, lines),
                    TableCellContent::Table(inner) => push_table(&inner.rows, lines),
                    _ => {}
                }
            }
        }
    }
}
