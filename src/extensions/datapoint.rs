//! Labelled metric line: icon, name, value and an optional trend.

use serde::Serialize;

use crate::trend::presentation::TrendMarker;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Datapoint {
    pub name: String,
    pub value: Option<String>,
    pub value_label: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub title: Option<String>,
    pub trend: Option<TrendMarker>,
}

impl Datapoint {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Nothing is drawn when there is neither a value nor a label.
    pub fn is_visible(&self) -> bool {
        self.value.is_some() || self.value_label.is_some()
    }

    pub fn color_class(&self) -> Option<String> {
        self.color.as_deref().map(color_class)
    }

    pub fn title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!(
                "{} is {}",
                self.name,
                self.value.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Plain text line, `None` when the datapoint is hidden.
    pub fn render_plain(&self) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        let mut line = self.name.clone();
        if let Some(value) = &self.value {
            line.push_str(": ");
            line.push_str(value);
            if let Some(label) = &self.value_label {
                line.push_str(&format!(" ({label})"));
            }
            if let Some(trend) = &self.trend {
                line.push(' ');
                line.push_str(&trend.to_plain());
            }
        }
        Some(line)
    }
}

/// Colors may arrive with or without the `col-` prefix.
pub fn color_class(color: &str) -> String {
    if color.starts_with("col-") {
        color.to_string()
    } else {
        format!("col-{color}")
    }
}
