//! Regulatory presentation standards
//!
//! Decree 30/2020/NĐ-CP governs general administrative documents and
//! Regulation 399-QĐ/TW governs Party documents. Both prescribe the same page
//! geometry and body font; they differ in header layout, which is the concern
//! of the text generator rather than of the exporter.

/// Page and body-text requirements of a regulatory standard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocStandard {
    /// Short name of the regulation
    pub name: &'static str,
    /// Margins in millimetres
    pub top_margin: u32,
    pub bottom_margin: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    /// Body font size in points
    pub font_size: u32,
    pub font_family: &'static str,
    /// Body line spacing as a multiple of single spacing
    pub line_spacing: f32,
}

/// Decree 30/2020/NĐ-CP
pub const ND30: DocStandard = DocStandard {
    name: "Nghị định 30/2020/NĐ-CP",
    top_margin: 20,
    bottom_margin: 20,
    left_margin: 30,
    right_margin: 15,
    font_size: 14,
    font_family: "Times New Roman",
    line_spacing: 1.5,
};

/// Regulation 399-QĐ/TW
pub const QD399: DocStandard = DocStandard {
    name: "Quy định 399-QĐ/TW",
    top_margin: 20,
    bottom_margin: 20,
    left_margin: 30,
    right_margin: 15,
    font_size: 14,
    font_family: "Times New Roman",
    line_spacing: 1.5,
};

impl DocStandard {
    /// Line spacing in 240ths of a line
    pub fn line_twips(&self) -> u32 {
        (self.line_spacing * 240.0).round() as u32
    }
}

/// Convert millimetres to twips (1/1440 inch), rounded to the nearest twip
pub fn mm_to_twips(mm: u32) -> u32 {
    (f64::from(mm) * 1440.0 / 25.4).round() as u32
}
