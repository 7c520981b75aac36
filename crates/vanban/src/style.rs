//! Inline style parsing.
//!
//! The `style` attribute is parsed once into an ordered map of declarations;
//! the conversion walk only ever inspects this map.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use vanban_core::Alignment;

static FONT_SIZE_PX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)px$").expect("valid font-size regex"));

/// Parsed CSS declarations from an inline `style` attribute
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleMap {
    declarations: IndexMap<String, String>,
}

impl StyleMap {
    /// Parse a `key: value; key: value` declaration list.
    ///
    /// Property names are lowercased, values trimmed and stripped of
    /// `!important`. A later declaration of the same property wins.
    pub fn parse(style: &str) -> Self {
        let mut declarations = IndexMap::new();

        for declaration in style.split(';') {
            let Some((key, value)) = declaration.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);

            if key.is_empty() || value.is_empty() {
                continue;
            }
            // Re-insert so the winning declaration also takes the last position.
            declarations.shift_remove(&key);
            declarations.insert(key, value.to_string());
        }

        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Lowercased value of a keyword property
    fn keyword(&self, property: &str) -> Option<String> {
        self.get(property).map(str::to_ascii_lowercase)
    }

    /// Paragraph alignment from `text-align`; unrecognized or absent values
    /// mean start alignment
    pub fn text_align(&self) -> Alignment {
        match self.keyword("text-align").as_deref() {
            Some("center") => Alignment::Center,
            Some("right") => Alignment::End,
            Some("justify") => Alignment::Justify,
            _ => Alignment::Start,
        }
    }

    /// Font size in half-points from a pixel `font-size`.
    ///
    /// `1px = 0.75pt`, so `round(px * 0.75 * 2)`. Other units are ignored.
    pub fn font_size_half_points(&self) -> Option<u32> {
        let value = self.keyword("font-size")?;
        let px: f64 = FONT_SIZE_PX.captures(&value)?.get(1)?.as_str().parse().ok()?;
        Some(px_to_half_points(px))
    }

    /// `font-weight: bold` or `font-weight: 700`
    pub fn is_bold(&self) -> bool {
        matches!(self.keyword("font-weight").as_deref(), Some("bold" | "700"))
    }

    /// `font-style: italic`
    pub fn is_italic(&self) -> bool {
        self.keyword("font-style").as_deref() == Some("italic")
    }
}

/// Convert CSS pixels to half-points
pub fn px_to_half_points(px: f64) -> u32 {
    (px * 0.75 * 2.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let style = StyleMap::parse("Text-Align: center ; font-size:16px;;color: red !important");
        assert_eq!(style.len(), 3);
        assert_eq!(style.get("text-align"), Some("center"));
        assert_eq!(style.get("font-size"), Some("16px"));
        assert_eq!(style.get("color"), Some("red"));
    }

    #[test]
    fn test_last_declaration_wins() {
        let style = StyleMap::parse("font-weight: normal; font-weight: bold");
        assert!(style.is_bold());
    }

    #[test]
    fn test_ignores_malformed() {
        let style = StyleMap::parse("garbage; : nothing; color:");
        assert!(style.is_empty());
    }

    #[test]
    fn test_text_align() {
        assert_eq!(StyleMap::parse("text-align:center").text_align(), Alignment::Center);
        assert_eq!(StyleMap::parse("text-align: right").text_align(), Alignment::End);
        assert_eq!(StyleMap::parse("text-align: JUSTIFY").text_align(), Alignment::Justify);
        assert_eq!(StyleMap::parse("text-align: left").text_align(), Alignment::Start);
        assert_eq!(StyleMap::parse("text-align: start").text_align(), Alignment::Start);
        assert_eq!(StyleMap::default().text_align(), Alignment::Start);
    }

    #[test]
    fn test_font_size() {
        assert_eq!(StyleMap::parse("font-size: 16px").font_size_half_points(), Some(24));
        assert_eq!(StyleMap::parse("font-size:14px").font_size_half_points(), Some(21));
        assert_eq!(StyleMap::parse("font-size: 18.5px").font_size_half_points(), Some(28));
        assert_eq!(StyleMap::parse("font-size: 14pt").font_size_half_points(), None);
        assert_eq!(StyleMap::default().font_size_half_points(), None);
    }

    #[test]
    fn test_bold_exact_match() {
        assert!(StyleMap::parse("font-weight: bold").is_bold());
        assert!(StyleMap::parse("font-weight:700").is_bold());
        assert!(!StyleMap::parse("font-weight: bolder").is_bold());
        assert!(!StyleMap::parse("font-weight: 600").is_bold());
    }

    #[test]
    fn test_italic() {
        assert!(StyleMap::parse("font-style: italic").is_italic());
        assert!(!StyleMap::parse("font-style: oblique").is_italic());
    }
}
