//! Plain-text segmentation for content the HTML walk could not structure.

use vanban_core::{Alignment, Block, Paragraph, Run, RunFlags};

use crate::convert::ConvertOptions;
use crate::utilities::{is_heading_line, strip_tags};

/// Pick the plain text to segment: the original text when it has content,
/// otherwise the HTML with every tag turned into a line break.
pub fn fallback_source(html: &str, plain_text: Option<&str>) -> String {
    match plain_text {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => strip_tags(html),
    }
}

/// Turn each non-empty line into a paragraph.
///
/// Fully uppercase lines shorter than 100 characters are taken as headings
/// and come out centered and bold; everything else is start-aligned.
pub fn segment_lines(text: &str, options: &ConvertOptions) -> Vec<Block> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let heading = is_heading_line(line);
            let alignment = if heading { Alignment::Center } else { Alignment::Start };
            let run = Run::new(
                line,
                options.font_family.as_str(),
                options.default_size,
                RunFlags::new(heading, false),
            );
            Block::Paragraph(Paragraph::new(alignment, vec![run]).with_spacing(options.spacing))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanban_core::Spacing;

    #[test]
    fn test_heading_and_body_lines() {
        let blocks = segment_lines("DỰ THẢO\nNội dung chi tiết.", &ConvertOptions::default());
        assert_eq!(blocks.len(), 2);

        let heading = blocks[0].as_paragraph().unwrap();
        assert_eq!(heading.text(), "DỰ THẢO");
        assert_eq!(heading.alignment, Alignment::Center);
        assert!(heading.runs[0].bold);

        let body = blocks[1].as_paragraph().unwrap();
        assert_eq!(body.text(), "Nội dung chi tiết.");
        assert_eq!(body.alignment, Alignment::Start);
        assert!(!body.runs[0].bold);

        for block in &blocks {
            let p = block.as_paragraph().unwrap();
            assert_eq!(p.runs[0].size, 28);
            assert!(!p.runs[0].italic);
            assert_eq!(p.spacing, Some(Spacing::default()));
        }
    }

    #[test]
    fn test_blank_lines_skipped_and_trimmed() {
        let blocks = segment_lines("\r\n  Điều 1.  \n\n   \nĐiều 2.\r\n", &ConvertOptions::default());
        let texts: Vec<String> = blocks
            .iter()
            .map(|b| b.as_paragraph().unwrap().text())
            .collect();
        assert_eq!(texts, vec!["Điều 1.", "Điều 2."]);
    }

    #[test]
    fn test_long_uppercase_line_is_body() {
        let line = "A".repeat(120);
        let blocks = segment_lines(&line, &ConvertOptions::default());
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.alignment, Alignment::Start);
        assert!(!p.runs[0].bold);
    }

    #[test]
    fn test_source_prefers_plain_text() {
        assert_eq!(fallback_source("<p>x</p>", Some("gốc")), "gốc");
        assert_eq!(fallback_source("<p>x</p>", Some("   ")), "\nx\n");
        assert_eq!(fallback_source("<b>A</b>B", None), "\nA\nB");
    }
}
