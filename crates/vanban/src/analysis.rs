//! Contract of the remote analysis collaborator.
//!
//! The analysis itself (compliance scoring, rewriting, HTML rendering) is done
//! by a generative model behind [`AnalysisService`]. This module only fixes
//! the shapes exchanged with it and the cleanup applied to generated text.

use std::fmt;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use vanban_core::{DocStandard, ND30, QD399};

use crate::Result;

/// Score at or above which a document counts as compliant
pub const COMPLIANT_SCORE: f64 = 90.0;

static PREAMBLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.*Dưới đây là mã HTML.*$").expect("valid preamble regex"));

/// Kind of administrative document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    #[serde(rename = "Nghị quyết")]
    NghiQuyet,
    #[serde(rename = "Quyết định")]
    QuyetDinh,
    #[serde(rename = "Công văn")]
    CongVan,
    #[serde(rename = "Báo cáo")]
    BaoCao,
    #[serde(rename = "Tờ trình")]
    ToTrinh,
    #[serde(rename = "Biên bản")]
    BienBan,
    #[serde(rename = "Kế hoạch")]
    KeHoach,
    #[serde(rename = "Khác")]
    Khac,
}

impl DocType {
    pub const ALL: [DocType; 8] = [
        DocType::NghiQuyet,
        DocType::QuyetDinh,
        DocType::CongVan,
        DocType::BaoCao,
        DocType::ToTrinh,
        DocType::BienBan,
        DocType::KeHoach,
        DocType::Khac,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocType::NghiQuyet => "Nghị quyết",
            DocType::QuyetDinh => "Quyết định",
            DocType::CongVan => "Công văn",
            DocType::BaoCao => "Báo cáo",
            DocType::ToTrinh => "Tờ trình",
            DocType::BienBan => "Biên bản",
            DocType::KeHoach => "Kế hoạch",
            DocType::Khac => "Khác",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Regulatory family a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocCategory {
    /// Governed by Decree 30/2020/NĐ-CP
    #[default]
    #[serde(rename = "Văn bản hành chính")]
    HanhChinh,
    /// Governed by Regulation 399-QĐ/TW
    #[serde(rename = "Văn bản công tác Đảng")]
    CongTacDang,
}

impl DocCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DocCategory::HanhChinh => "Văn bản hành chính",
            DocCategory::CongTacDang => "Văn bản công tác Đảng",
        }
    }

    /// The presentation standard governing this category
    pub fn standard(&self) -> &'static DocStandard {
        match self {
            DocCategory::HanhChinh => &ND30,
            DocCategory::CongTacDang => &QD399,
        }
    }
}

impl fmt::Display for DocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Document details extracted by the analysis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Structured result of a compliance analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_standard: bool,
    pub score: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    /// Reformatted plain text of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standardized_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl AnalysisResult {
    pub fn meets_standard(&self) -> bool {
        self.score >= COMPLIANT_SCORE
    }
}

/// Decode the JSON body returned by the analysis model
pub fn parse_analysis(json: &str) -> Result<AnalysisResult> {
    Ok(serde_json::from_str(json)?)
}

/// Strip Markdown fences and the "here is the HTML" preamble models add
/// around generated text.
pub fn clean_generated_text(text: &str) -> String {
    let text = text.replace("```html", "").replace("```", "");
    PREAMBLE_LINE.replace_all(&text, "").trim().to_string()
}

/// The remote analysis collaborator.
///
/// Implementations own their transport, credentials and retry policy; errors
/// are reported as [`crate::Error::Analysis`] and passed to callers unchanged.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Analyze raw document text against the standard of `category`
    async fn analyze(
        &self,
        content: &str,
        doc_type: DocType,
        category: DocCategory,
    ) -> Result<AnalysisResult>;

    /// Render document text as a single styled A4 page `<div>`
    async fn render_preview(&self, content: &str, category: DocCategory) -> Result<String>;
}
