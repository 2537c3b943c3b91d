//! Document export configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::document::PageGeometry;
use crate::domain::generation::DEFAULT_RAW_PREVIEW_CHARS;

/// Export settings shared by the renderer and the recovery parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Body font size for paginated export, in points
    #[serde(default = "default_font_size")]
    pub font_size_pt: f32,

    /// Uniform page margin for paginated export, in millimetres
    #[serde(default = "default_margin")]
    pub margin_mm: f32,

    /// Upper bound on raw reply characters kept after a parse failure
    #[serde(default = "default_raw_preview_chars")]
    pub raw_preview_chars: usize,
}

impl ExportConfig {
    /// Page geometry derived from these settings (A4 page size).
    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::a4(self.font_size_pt, self.margin_mm)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.font_size_pt.is_finite() && self.font_size_pt > 0.0) {
            return Err(ValidationError::InvalidFontSize);
        }
        if !self.page_geometry().has_printable_area() {
            return Err(ValidationError::InvalidMargins);
        }
        if self.raw_preview_chars == 0 {
            return Err(ValidationError::InvalidPreviewBound);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            font_size_pt: default_font_size(),
            margin_mm: default_margin(),
            raw_preview_chars: default_raw_preview_chars(),
        }
    }
}

fn default_font_size() -> f32 {
    10.0
}

fn default_margin() -> f32 {
    20.0
}

fn default_raw_preview_chars() -> usize {
    DEFAULT_RAW_PREVIEW_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.font_size_pt, 10.0);
        assert_eq!(config.margin_mm, 20.0);
        assert_eq!(config.raw_preview_chars, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_margins_wider_than_page_are_rejected() {
        let config = ExportConfig {
            margin_mm: 120.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidMargins)));
    }

    #[test]
    fn test_zero_font_size_is_rejected() {
        let config = ExportConfig {
            font_size_pt: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidFontSize)));
    }

    #[test]
    fn test_zero_preview_bound_is_rejected() {
        let config = ExportConfig {
            raw_preview_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
