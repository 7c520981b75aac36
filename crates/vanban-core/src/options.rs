//! Page layout and default style options for serialization

use crate::standard::{mm_to_twips, DocStandard, ND30};

/// Page margins in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// Page size and margins in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
}

impl PageLayout {
    /// A4 portrait
    pub const A4_WIDTH: u32 = 11906;
    pub const A4_HEIGHT: u32 = 16838;

    /// A4 portrait page with the margins of a regulatory standard
    pub fn a4(standard: &DocStandard) -> Self {
        Self {
            width: Self::A4_WIDTH,
            height: Self::A4_HEIGHT,
            margins: Margins {
                top: mm_to_twips(standard.top_margin),
                bottom: mm_to_twips(standard.bottom_margin),
                left: mm_to_twips(standard.left_margin),
                right: mm_to_twips(standard.right_margin),
            },
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4(&ND30)
    }
}

/// Options for document serialization
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Page size and margins
    pub page: PageLayout,

    /// Document-wide default font family
    pub font_family: String,

    /// Document-wide default font size in half-points
    pub font_size: u32,

    /// Table width as a percentage of the text area
    pub table_width_pct: u32,

    /// Width of every table cell as a percentage of the table.
    /// Applied regardless of column count.
    pub cell_width_pct: u32,
}

impl Options {
    /// Options following a regulatory standard
    pub fn from_standard(standard: &DocStandard) -> Self {
        Self {
            page: PageLayout::a4(standard),
            font_family: standard.font_family.to_string(),
            font_size: standard.font_size * 2,
            table_width_pct: 100,
            cell_width_pct: 50,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::from_standard(&ND30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_regulatory_a4() {
        let options = Options::default();
        assert_eq!(options.page.width, 11906);
        assert_eq!(options.page.height, 16838);
        assert_eq!(
            options.page.margins,
            Margins {
                top: 1134,
                bottom: 1134,
                left: 1701,
                right: 850,
            }
        );
    }

    #[test]
    fn test_default_run_style() {
        let options = Options::default();
        assert_eq!(options.font_family, "Times New Roman");
        assert_eq!(options.font_size, 28);
        assert_eq!(options.cell_width_pct, 50);
    }
}
