//! Convert an HTML node tree to document blocks
//!
//! This module walks a parsed HTML preview top-down and builds the block
//! sequence defined in vanban-core: paragraphs from block containers, tables
//! from `table` elements, runs from the text inside them.

use vanban_core::{
    Alignment, Block, Options, Paragraph, Run, RunFlags, Spacing, Table, TableCell, TableRow,
};

use crate::node::{Element, Node};
use crate::utilities::{
    collapse_whitespace, is_block_container, is_bold_element, is_cell, is_inline, is_italic_element,
    is_nested_block, is_skipped,
};

/// Run styling used by the conversion walk
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Font family of every run
    pub font_family: String,

    /// Run size in half-points when no pixel `font-size` applies
    pub default_size: u32,

    /// Spacing carried by every body paragraph
    pub spacing: Spacing,
}

impl ConvertOptions {
    pub fn from_document(options: &Options) -> Self {
        Self {
            font_family: options.font_family.clone(),
            default_size: options.font_size,
            spacing: Spacing::default(),
        }
    }

    fn run(&self, text: String, size: Option<u32>, flags: RunFlags) -> Run {
        Run::new(text, self.font_family.as_str(), size.unwrap_or(self.default_size), flags)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::from_document(&Options::default())
    }
}

/// Styling inherited down the walk.
///
/// A paragraph leaf or table cell starts from an empty context, so nothing
/// above it leaks into its runs.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    flags: RunFlags,
    font_size: Option<u32>,
    alignment: Alignment,
}

impl Context {
    fn enter(&self, element: &Element) -> Context {
        let style = element.style();
        Context {
            flags: RunFlags::combine(self.flags, own_flags(element)),
            font_size: style.font_size_half_points().or(self.font_size),
            alignment: self.alignment,
        }
    }

    /// Context of a block element: its own style only
    fn block(element: &Element) -> Context {
        Context {
            alignment: element.style().text_align(),
            ..Context::default().enter(element)
        }
    }
}

/// Flags an element sets through its tag or its inline style
fn own_flags(element: &Element) -> RunFlags {
    let tag = element.tag_name();
    let style = element.style();
    RunFlags::new(
        is_bold_element(tag) || style.is_bold(),
        is_italic_element(tag) || style.is_italic(),
    )
}

/// Convert a parsed HTML tree to document blocks.
///
/// Only the element children of the root are walked; text directly under the
/// root is not block content, so plain-text input yields no blocks.
pub fn convert(root: &Node, options: &ConvertOptions) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Node::Element(root) = root {
        let ctx = Context::default();
        for child in root.element_children() {
            convert_element(child, options, &ctx, &mut blocks);
        }
    }

    tracing::debug!(blocks = blocks.len(), "converted html tree");
    blocks
}

fn convert_element(element: &Element, options: &ConvertOptions, ctx: &Context, blocks: &mut Vec<Block>) {
    let tag = element.tag_name();

    if is_skipped(tag) {
        return;
    }

    if tag == "table" {
        if let Some(table) = convert_table(element, options) {
            blocks.push(Block::Table(table));
        }
        return;
    }

    if is_block_container(tag) {
        if element.has_descendant(|e| is_nested_block(e.tag_name())) {
            convert_children(element, options, &Context::block(element), blocks);
        } else if let Some(paragraph) = convert_paragraph(element, options) {
            blocks.push(Block::Paragraph(paragraph));
        }
        return;
    }

    convert_children(element, options, &ctx.enter(element), blocks);
}

/// Walk the children of an element that is not a paragraph leaf.
///
/// Text and inline elements met here ("loose" content) are gathered into one
/// paragraph per stretch between block-level siblings, so no text is dropped.
fn convert_children(element: &Element, options: &ConvertOptions, ctx: &Context, blocks: &mut Vec<Block>) {
    let mut loose = RunCollector::default();

    for child in element.children() {
        match child {
            Node::Text(text) => loose.push_text(text, options, ctx),
            Node::Element(e) if is_skipped(e.tag_name()) => {}
            Node::Element(e) if e.tag_name() == "br" => loose.push_break(),
            Node::Element(e) if is_inline(e.tag_name()) && !e.has_descendant(|d| !is_inline(d.tag_name()) && !is_skipped(d.tag_name())) => {
                loose.collect(e, options, &ctx.enter(e));
            }
            Node::Element(e) => {
                flush_loose(&mut loose, options, ctx, blocks);
                convert_element(e, options, ctx, blocks);
            }
        }
    }

    flush_loose(&mut loose, options, ctx, blocks);
}

fn flush_loose(loose: &mut RunCollector, options: &ConvertOptions, ctx: &Context, blocks: &mut Vec<Block>) {
    let runs = std::mem::take(loose).finish();
    if runs.iter().any(|r| !r.is_blank()) {
        blocks.push(Block::Paragraph(
            Paragraph::new(ctx.alignment, runs).with_spacing(options.spacing),
        ));
    }
}

/// Convert a block container without nested blocks into a paragraph
fn convert_paragraph(element: &Element, options: &ConvertOptions) -> Option<Paragraph> {
    let mut runs = collect_runs(element, options);

    if runs.is_empty() {
        let text = collapse_whitespace(element.visible_text().trim());
        if text.is_empty() {
            return None;
        }
        let flags = RunFlags::new(own_flags(element).bold, false);
        runs.push(options.run(text, element.style().font_size_half_points(), flags));
    }

    Some(Paragraph::new(element.style().text_align(), runs).with_spacing(options.spacing))
}

fn convert_table(table: &Element, options: &ConvertOptions) -> Option<Table> {
    let rows: Vec<TableRow> = table
        .find_descendants(|e| e.tag_name() == "tr", |e| e.tag_name() == "table")
        .into_iter()
        .filter_map(|tr| {
            let cells: Vec<TableCell> = tr
                .element_children()
                .filter(|c| is_cell(c.tag_name()))
                .map(|c| convert_cell(c, options))
                .collect();
            (!cells.is_empty()).then(|| TableRow::new(cells))
        })
        .collect();

    (!rows.is_empty()).then(|| Table::new(rows))
}

fn convert_cell(cell: &Element, options: &ConvertOptions) -> TableCell {
    let runs = collect_runs(cell, options);
    let paragraph = if runs.is_empty() {
        Paragraph::empty()
    } else {
        Paragraph::new(cell.style().text_align(), runs)
    };
    TableCell::new(vec![paragraph])
}

/// Collect the runs of a paragraph or cell element, trimmed at both edges
fn collect_runs(element: &Element, options: &ConvertOptions) -> Vec<Run> {
    let mut collector = RunCollector::default();
    collector.collect(element, options, &Context::block(element));
    collector.finish()
}

#[derive(Default)]
struct RunCollector {
    runs: Vec<Run>,
    pending_breaks: u32,
}

impl RunCollector {
    fn collect(&mut self, element: &Element, options: &ConvertOptions, ctx: &Context) {
        for child in element.children() {
            match child {
                Node::Text(text) => self.push_text(text, options, ctx),
                Node::Element(e) if is_skipped(e.tag_name()) => {}
                Node::Element(e) if e.tag_name() == "br" => self.push_break(),
                Node::Element(e) => self.collect(e, options, &ctx.enter(e)),
            }
        }
    }

    fn push_text(&mut self, text: &str, options: &ConvertOptions, ctx: &Context) {
        if text.trim().is_empty() {
            self.separate(text);
            return;
        }

        let mut run = options.run(collapse_whitespace(text), ctx.font_size, ctx.flags);
        let breaks = std::mem::take(&mut self.pending_breaks);
        if breaks > 0 {
            if let Some(last) = self.runs.last_mut() {
                last.text.truncate(last.text.trim_end().len());
                run = run.with_breaks(breaks);
                run.text = run.text.trim_start().to_string();
            }
        }
        self.runs.push(run);
    }

    fn push_break(&mut self) {
        self.pending_breaks += 1;
    }

    /// Whitespace between inline elements still separates words
    fn separate(&mut self, whitespace: &str) {
        if whitespace.is_empty() || self.pending_breaks > 0 {
            return;
        }
        if let Some(last) = self.runs.last_mut() {
            if !last.text.ends_with(' ') {
                last.text.push(' ');
            }
        }
    }

    fn finish(mut self) -> Vec<Run> {
        if let Some(first) = self.runs.first_mut() {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = self.runs.last_mut() {
            last.text = last.text.trim_end().to_string();
        }
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;

    fn convert_html(html: &str) -> Vec<Block> {
        convert(&parse_html(html), &ConvertOptions::default())
    }

    fn paragraphs(blocks: &[Block]) -> Vec<&Paragraph> {
        blocks.iter().filter_map(Block::as_paragraph).collect()
    }

    #[test]
    fn test_centered_bold_heading() {
        let blocks = convert_html(r#"<div style="text-align:center"><b>QUYẾT ĐỊNH</b></div>"#);
        assert_eq!(blocks.len(), 1);

        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.alignment, Alignment::Center);
        assert_eq!(p.runs.len(), 1);
        assert_eq!(p.runs[0].text, "QUYẾT ĐỊNH");
        assert!(p.runs[0].bold);
        assert!(!p.runs[0].italic);
        assert_eq!(p.runs[0].size, 28);
        assert_eq!(p.runs[0].font, "Times New Roman");
        assert_eq!(p.spacing, Some(Spacing::default()));
    }

    #[test]
    fn test_paragraph_count_and_order() {
        let blocks = convert_html(
            "<div><p>Một</p><p>  </p><h1>Hai</h1><p><i>Ba</i></p><h2></h2><h3>Bốn</h3></div>",
        );
        let texts: Vec<String> = paragraphs(&blocks).iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["Một", "Hai", "Ba", "Bốn"]);
    }

    #[test]
    fn test_multiple_top_level_elements() {
        let blocks = convert_html("<p>A</p><p>B</p>");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_font_size_mapping() {
        let blocks = convert_html(
            r#"<div><p style="font-size: 16px">a</p><p style="font-size:14px">b</p><p>c</p></div>"#,
        );
        let sizes: Vec<u32> = paragraphs(&blocks).iter().map(|p| p.runs[0].size).collect();
        assert_eq!(sizes, vec![24, 21, 28]);
    }

    #[test]
    fn test_nearest_font_size_wins() {
        let blocks = convert_html(
            r#"<p style="font-size: 20px">a <span style="font-size: 12px">b</span> <b>c</b></p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        let sizes: Vec<u32> = p.runs.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![30, 18, 30]);
    }

    #[test]
    fn test_flags_propagate_downward() {
        let blocks = convert_html(
            r#"<p><strong>Điều 1. <span>Phạm vi</span> <em>điều chỉnh</em></strong> thường</p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        let flags: Vec<(String, bool, bool)> = p
            .runs
            .iter()
            .map(|r| (r.text.clone(), r.bold, r.italic))
            .collect();

        assert_eq!(
            flags,
            vec![
                ("Điều 1. ".to_string(), true, false),
                ("Phạm vi ".to_string(), true, false),
                ("điều chỉnh".to_string(), true, true),
                (" thường".to_string(), false, false),
            ]
        );
    }

    #[test]
    fn test_flags_never_propagate_upward() {
        let blocks = convert_html(r#"<p>trước <i>nghiêng</i> sau</p>"#);
        let p = blocks[0].as_paragraph().unwrap();
        assert!(!p.runs[0].italic);
        assert!(p.runs[1].italic);
        assert!(!p.runs[2].italic);
    }

    #[test]
    fn test_style_flags() {
        let blocks = convert_html(
            r#"<p><span style="font-weight: 700">a</span><span style="font-style: italic">b</span><span style="font-weight: bolder">c</span></p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        assert!(p.runs[0].bold);
        assert!(p.runs[1].italic && !p.runs[1].bold);
        assert!(!p.runs[2].bold);
    }

    #[test]
    fn test_paragraph_own_style_applies_to_runs() {
        let blocks = convert_html(r#"<p style="font-weight: bold">Kính gửi: <span>Sở Nội vụ</span></p>"#);
        let p = blocks[0].as_paragraph().unwrap();
        assert!(p.runs.iter().all(|r| r.bold));
    }

    #[test]
    fn test_alignment_not_inherited() {
        let blocks = convert_html(
            r#"<div style="text-align: center"><p>Trái</p><p style="text-align: right">Phải</p><p style="text-align: justify">Đều</p></div>"#,
        );
        let alignments: Vec<Alignment> = paragraphs(&blocks).iter().map(|p| p.alignment).collect();
        assert_eq!(alignments, vec![Alignment::Start, Alignment::End, Alignment::Justify]);
    }

    #[test]
    fn test_unknown_alignment_defaults_to_start() {
        let blocks = convert_html(r#"<p style="text-align: inherit">x</p>"#);
        assert_eq!(blocks[0].as_paragraph().unwrap().alignment, Alignment::Start);
    }

    #[test]
    fn test_script_and_style_skipped() {
        let blocks = convert_html(
            "<div><style>p { margin: 0 }</style><script>alert(1)</script><p>Nội dung<script>x()</script></p></div>",
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_paragraph().unwrap().text(), "Nội dung");
    }

    #[test]
    fn test_table_structure() {
        let blocks = convert_html(
            "<table><tr><td>Nơi nhận:</td><td>KT. CHỦ TỊCH</td></tr><tr><td>- Như trên;</td><td>PHÓ CHỦ TỊCH</td></tr></table>",
        );
        assert_eq!(blocks.len(), 1);

        let table = blocks[0].as_table().unwrap();
        assert_eq!(table.rows.len(), 2);
        for row in &table.rows {
            assert_eq!(row.cells.len(), 2);
            for cell in &row.cells {
                assert_eq!(cell.paragraphs.len(), 1);
                assert!(!cell.paragraphs[0].is_blank());
                assert_eq!(cell.paragraphs[0].spacing, None);
            }
        }
    }

    #[test]
    fn test_empty_cells_get_placeholder() {
        let blocks = convert_html("<table><tr><th></th><td>  </td><td style='text-align:center'>x</td></tr></table>");
        let table = blocks[0].as_table().unwrap();
        let cells = &table.rows[0].cells;

        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].paragraphs, vec![Paragraph::empty()]);
        assert_eq!(cells[1].paragraphs, vec![Paragraph::empty()]);
        assert_eq!(cells[2].paragraphs[0].alignment, Alignment::Center);
    }

    #[test]
    fn test_rows_without_cells_and_empty_tables_dropped() {
        let blocks = convert_html("<div><table><tr></tr></table><p>x</p></div>");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].as_paragraph().is_some());
    }

    #[test]
    fn test_nested_table_rows_stay_nested() {
        let blocks = convert_html(
            "<table><tr><td>a<table><tr><td>b</td></tr></table></td></tr></table>",
        );
        let table = blocks[0].as_table().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells[0].paragraphs[0].text(), "ab");
    }

    #[test]
    fn test_table_inside_container() {
        let blocks = convert_html("<div><p>Trước</p><table><tr><td>1</td></tr></table><p>Sau</p></div>");
        assert_eq!(blocks.len(), 3);
        assert!(blocks[1].as_table().is_some());
    }

    #[test]
    fn test_loose_text_is_kept() {
        let blocks = convert_html("<div>Căn cứ Luật<p>Điều 1</p><ul><li><b>Mục</b></li></ul></div>");
        let texts: Vec<String> = paragraphs(&blocks).iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["Căn cứ Luật", "Điều 1", "Mục"]);
        assert!(paragraphs(&blocks)[2].runs[0].bold);
    }

    #[test]
    fn test_line_breaks_become_run_breaks() {
        let blocks = convert_html(
            r#"<div style="text-align:center"><b>ỦY BAN NHÂN DÂN</b><br>TỈNH BẮC NINH</div>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.runs.len(), 2);
        assert_eq!(p.runs[0].breaks_before, 0);
        assert_eq!(p.runs[1].breaks_before, 1);
        assert_eq!(p.runs[1].text, "TỈNH BẮC NINH");
    }

    #[test]
    fn test_consecutive_line_breaks_are_counted() {
        let blocks = convert_html("<p>Nơi nhận:<br><br>  - Như trên;<br>- Lưu: VT.<br></p>");
        let p = blocks[0].as_paragraph().unwrap();
        let breaks: Vec<(String, u32)> = p.runs.iter().map(|r| (r.text.clone(), r.breaks_before)).collect();
        assert_eq!(
            breaks,
            vec![
                ("Nơi nhận:".to_string(), 0),
                ("- Như trên;".to_string(), 2),
                ("- Lưu: VT.".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_loose_inline_siblings_share_a_paragraph() {
        let blocks = convert_html("<div><b>Căn cứ</b> Luật tổ chức <i>chính quyền</i><p>Điều 1</p>Cuối</div>");
        let ps = paragraphs(&blocks);
        let texts: Vec<String> = ps.iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["Căn cứ Luật tổ chức chính quyền", "Điều 1", "Cuối"]);

        let first = ps[0];
        assert_eq!(first.runs.len(), 3);
        assert_eq!(first.runs[0].flags(), RunFlags::new(true, false));
        assert_eq!(first.runs[1].flags(), RunFlags::NONE);
        assert_eq!(first.runs[2].flags(), RunFlags::new(false, true));
        assert_eq!(first.spacing, Some(Spacing::default()));
    }

    #[test]
    fn test_loose_line_breaks_kept() {
        let blocks = convert_html("<div>Số: 12/UBND<br><br>V/v báo cáo<p>Kính gửi</p></div>");
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.text(), "Số: 12/UBNDV/v báo cáo");
        assert_eq!(p.runs[1].breaks_before, 2);
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        let blocks = convert_html("<p>\n    Kính gửi:\n    <b>UBND</b>\n  </p>");
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.text(), "Kính gửi: UBND");
    }

    #[test]
    fn test_plain_text_yields_no_blocks() {
        assert!(convert_html("DỰ THẢO\nNội dung chi tiết.").is_empty());
        assert!(convert_html("").is_empty());
        assert!(convert_html("<div>   </div>").is_empty());
    }

    #[test]
    fn test_hand_built_tree() {
        let root = Element::new("html").child(
            Element::styled("p", "text-align: right; font-size: 12px").text("Hà Nội, ngày 15 tháng 10 năm 2026"),
        );

        let blocks = convert(&root.into(), &ConvertOptions::default());
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.alignment, Alignment::End);
        assert_eq!(p.runs[0].size, 18);
    }

    #[test]
    fn test_deterministic() {
        let html = r#"<div><p style="text-align:center"><b>A</b></p><table><tr><td>1</td><td></td></tr></table></div>"#;
        assert_eq!(convert_html(html), convert_html(html));
    }
}
