//! WordprocessingML assembly
//!
//! Maps a [`Document`] onto a `docx_rs::Docx`: one section with the page
//! layout of [`Options`], body paragraphs and tables in document order.

use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, LineSpacingType, PageMargin, Paragraph as DocxParagraph,
    Run as DocxRun, RunFonts, Table as DocxTable, TableCell as DocxTableCell, TableRow as DocxTableRow,
    WidthType,
};

use crate::ast::{Alignment, Block, Document, Paragraph, Run, Spacing, Table};
use crate::options::Options;

const HEADER_FOOTER_DISTANCE: i32 = 708;

/// Build the word-processor document for `document`
pub fn build_docx(document: &Document, options: &Options) -> Docx {
    let page = &options.page;
    let margins = &page.margins;

    let mut docx = Docx::new()
        .page_size(page.width, page.height)
        .page_margin(
            PageMargin::new()
                .top(margins.top as i32)
                .bottom(margins.bottom as i32)
                .left(margins.left as i32)
                .right(margins.right as i32)
                .header(HEADER_FOOTER_DISTANCE)
                .footer(HEADER_FOOTER_DISTANCE)
                .gutter(0),
        )
        .default_fonts(fonts(&options.font_family))
        .default_size(options.font_size as usize);

    for block in &document.blocks {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(docx_paragraph(p)),
            Block::Table(t) => docx.add_table(docx_table(t, options)),
        };
    }

    docx
}

fn docx_paragraph(paragraph: &Paragraph) -> DocxParagraph {
    let mut para = DocxParagraph::new().align(alignment_type(paragraph.alignment));
    if let Some(spacing) = paragraph.spacing {
        para = para.line_spacing(line_spacing(spacing));
    }

    paragraph
        .runs
        .iter()
        .fold(para, |para, run| para.add_run(docx_run(run)))
}

fn line_spacing(spacing: Spacing) -> LineSpacing {
    LineSpacing::new()
        .before(spacing.before)
        .after(spacing.after)
        .line(spacing.line as i32)
        .line_rule(LineSpacingType::Auto)
}

fn docx_run(run: &Run) -> DocxRun {
    let mut docx_run = DocxRun::new().fonts(fonts(&run.font)).size(run.size as usize);
    if run.bold {
        docx_run = docx_run.bold();
    }
    if run.italic {
        docx_run = docx_run.italic();
    }
    for _ in 0..run.breaks_before {
        docx_run = docx_run.add_break(BreakType::TextWrapping);
    }
    docx_run.add_text(xml_text(&run.text))
}

fn fonts(family: &str) -> RunFonts {
    RunFonts::new()
        .ascii(family)
        .hi_ansi(family)
        .cs(family)
        .east_asia(family)
}

fn docx_table(table: &Table, options: &Options) -> DocxTable {
    let text_width = options
        .page
        .width
        .saturating_sub(options.page.margins.left + options.page.margins.right);
    let col_width = (text_width * options.cell_width_pct / 100) as usize;
    let cell_width = pct_value(options.cell_width_pct);

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let cells = row
                .cells
                .iter()
                .map(|cell| {
                    let mut docx_cell = DocxTableCell::new().width(cell_width, WidthType::Pct);
                    if cell.paragraphs.is_empty() {
                        // A cell must end with a paragraph.
                        docx_cell = docx_cell.add_paragraph(DocxParagraph::new());
                    }
                    cell.paragraphs
                        .iter()
                        .fold(docx_cell, |docx_cell, p| docx_cell.add_paragraph(docx_paragraph(p)))
                })
                .collect();
            DocxTableRow::new(cells)
        })
        .collect();

    DocxTable::new(rows)
        .width(pct_value(options.table_width_pct), WidthType::Pct)
        .set_grid(vec![col_width; table.column_count()])
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Start => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::End => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

/// Percentages are written in fiftieths of a percent
fn pct_value(percent: u32) -> usize {
    percent as usize * 50
}

/// Drop characters outside the XML 1.0 character range.
///
/// Markup escaping is left to the writer.
pub fn xml_text(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || !((c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_types() {
        assert!(matches!(alignment_type(Alignment::Start), AlignmentType::Left));
        assert!(matches!(alignment_type(Alignment::Center), AlignmentType::Center));
        assert!(matches!(alignment_type(Alignment::End), AlignmentType::Right));
        assert!(matches!(alignment_type(Alignment::Justify), AlignmentType::Both));
    }

    #[test]
    fn test_pct_value() {
        assert_eq!(pct_value(100), 5000);
        assert_eq!(pct_value(50), 2500);
    }

    #[test]
    fn test_xml_text() {
        assert_eq!(xml_text("bad\u{0001}char"), "badchar");
        assert_eq!(xml_text("a\tb\nc"), "a\tb\nc");
        assert_eq!(xml_text("x\u{FFFE}"), "x");
        assert_eq!(xml_text("a < b & c"), "a < b & c");
        assert_eq!(xml_text("Hà Nội"), "Hà Nội");
    }
}
