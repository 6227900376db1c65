//! Style tokens for drawing a classified trend.
//!
//! Both presentations read the same [`TrendClassification`]; they differ only
//! in the class prefix and where the label ends up.

use serde::Serialize;

use super::{classify, Arrow, Polarity, TrendClassification, TrendDescriptor};

/// How a trend marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Colored badge with the label inline.
    #[default]
    Badge,
    /// Small inline caret, label as tooltip.
    Compact,
}

/// Renderable trend: CSS class, icon glyph and label placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendMarker {
    pub class_name: String,
    pub glyph: &'static str,
    /// Text drawn next to the glyph, badge only.
    pub label: Option<String>,
    /// Hover text, compact only.
    pub title: Option<String>,
    #[serde(flatten)]
    pub classification: TrendClassification,
}

pub fn color(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Good => "success",
        Polarity::Bad => "danger",
        Polarity::Neutral | Polarity::Unknown => "warning",
    }
}

pub fn glyph(arrow: Arrow) -> &'static str {
    match arrow {
        Arrow::Up => "caret-up",
        Arrow::Down => "caret-down",
        Arrow::Flat => "caret-right",
    }
}

impl TrendMarker {
    pub fn from_classification(classification: TrendClassification, mode: Presentation) -> Self {
        let color = color(classification.polarity);
        let glyph = glyph(classification.arrow);
        let (class_name, label, title) = match mode {
            Presentation::Badge => (
                format!("badge bg-{color}"),
                Some(classification.text.clone()),
                None,
            ),
            Presentation::Compact => (
                format!("trend text-{color}"),
                None,
                Some(classification.text.clone()),
            ),
        };
        Self {
            class_name,
            glyph,
            label,
            title,
            classification,
        }
    }

    /// One-line plain text form, used by the CLI.
    pub fn to_plain(&self) -> String {
        let symbol = match self.classification.arrow {
            Arrow::Up => '▲',
            Arrow::Down => '▼',
            Arrow::Flat => '▶',
        };
        match &self.label {
            Some(label) => format!("{symbol} {label}"),
            None => symbol.to_string(),
        }
    }
}

/// Classify and style a trend in one step.
pub fn marker(descriptor: Option<&TrendDescriptor>, mode: Presentation) -> TrendMarker {
    TrendMarker::from_classification(classify(descriptor), mode)
}
