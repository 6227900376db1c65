//! Plugin extension data: cards made of tabs, values and tables.
//!
//! Each value carries a `type` tag. The set of tags is closed; anything the
//! dashboard does not know how to draw is rejected while parsing instead of
//! being rendered as a plain datapoint.

pub mod datapoint;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use datapoint::Datapoint;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("unknown extension value type '{0}'")]
    UnknownValueType(String),
    #[error("unknown tab element '{0}'")]
    UnknownElement(String),
    #[error("component value of '{name}' is not valid chat JSON: {source}")]
    InvalidComponent {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed extension data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Body of `/v1/extensionData`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtensionData {
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl ExtensionData {
    pub fn from_json(value: Value) -> Result<Self, ExtensionError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub extension_information: ExtensionInformation,
    #[serde(default)]
    pub wide: bool,
    #[serde(default)]
    pub only_generic_tab: bool,
    #[serde(default)]
    pub tabs: Vec<ExtensionTab>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInformation {
    pub plugin_name: String,
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    #[serde(default)]
    pub family_class: String,
    #[serde(default)]
    pub icon_name: String,
    pub color_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionTab {
    pub tab_information: TabInformation,
    #[serde(default)]
    pub values: Vec<ExtensionValue>,
    #[serde(default)]
    pub table_data: Vec<ExtensionTable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInformation {
    pub tab_name: String,
    pub icon: Option<Icon>,
    #[serde(default)]
    pub element_order: Vec<TabElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TabElement {
    Values,
    Table,
}

impl TryFrom<String> for TabElement {
    type Error = ExtensionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "VALUES" => Ok(TabElement::Values),
            "TABLE" => Ok(TabElement::Table),
            _ => Err(ExtensionError::UnknownElement(value)),
        }
    }
}

/// Declared value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    String,
    Boolean,
    Number,
    Double,
    Percentage,
    TimeMilliseconds,
    Html,
    Component,
}

impl FromStr for ValueKind {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "STRING" => ValueKind::String,
            "BOOLEAN" => ValueKind::Boolean,
            "NUMBER" => ValueKind::Number,
            "DOUBLE" => ValueKind::Double,
            "PERCENTAGE" => ValueKind::Percentage,
            "TIME_MILLISECONDS" => ValueKind::TimeMilliseconds,
            "HTML" => ValueKind::Html,
            "COMPONENT" => ValueKind::Component,
            other => return Err(ExtensionError::UnknownValueType(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueDescription {
    pub text: String,
    pub description: Option<String>,
    pub icon: Option<Icon>,
}

#[derive(Debug, Deserialize)]
pub struct RawExtensionValue {
    #[serde(rename = "type")]
    kind: String,
    description: ValueDescription,
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawExtensionValue")]
pub struct ExtensionValue {
    pub kind: ValueKind,
    pub description: ValueDescription,
    pub value: Value,
}

impl TryFrom<RawExtensionValue> for ExtensionValue {
    type Error = ExtensionError;

    fn try_from(raw: RawExtensionValue) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: raw.kind.parse()?,
            description: raw.description,
            value: raw.value,
        })
    }
}

/// Drawable form of an extension value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueLine {
    /// Trusted markup produced by the plugin.
    Markup {
        name: String,
        title: Option<String>,
        html: String,
    },
    /// Minecraft chat component tree.
    Component {
        name: String,
        title: Option<String>,
        component: Value,
    },
    Datapoint(Datapoint),
}

impl ExtensionValue {
    fn value_text(&self) -> Option<String> {
        match &self.value {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn render(&self) -> Result<ValueLine, ExtensionError> {
        let name = self.description.text.clone();
        let title = self.description.description.clone();
        match self.kind {
            ValueKind::Html => Ok(ValueLine::Markup {
                name,
                title,
                html: self.value_text().unwrap_or_default(),
            }),
            ValueKind::Component => {
                let raw = self.value_text().unwrap_or_default();
                let component = serde_json::from_str(&raw)
                    .map_err(|source| ExtensionError::InvalidComponent {
                        name: name.clone(),
                        source,
                    })?;
                Ok(ValueLine::Component {
                    name,
                    title,
                    component,
                })
            }
            _ => {
                let icon = self.description.icon.as_ref();
                Ok(ValueLine::Datapoint(Datapoint {
                    name,
                    title,
                    value: self.value_text(),
                    icon: icon.map(|i| format!("{} {}", i.family_class, i.icon_name)),
                    color: icon.and_then(|i| i.color_class.clone()),
                    ..Datapoint::default()
                }))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableColumn {
    pub text: String,
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtensionTable {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl ExtensionTable {
    /// Rows with every cell present; partially filled rows are not drawn.
    pub fn complete_rows(&self) -> impl Iterator<Item = &[Value]> {
        let width = self.columns.len();
        self.rows
            .iter()
            .filter(move |row| row.len() >= width && row.iter().all(|cell| !cell.is_null()))
            .map(Vec::as_slice)
    }
}

/// One rendered tab section, in the tab's element order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum TabSection {
    Values { lines: Vec<ValueLine> },
    Table { columns: Vec<String>, rows: Vec<Vec<Value>> },
}

impl ExtensionTab {
    pub fn render(&self) -> Result<Vec<TabSection>, ExtensionError> {
        let mut sections = Vec::new();
        for element in &self.tab_information.element_order {
            match element {
                TabElement::Values if !self.values.is_empty() => {
                    let lines = self
                        .values
                        .iter()
                        .map(ExtensionValue::render)
                        .collect::<Result<Vec<_>, _>>()?;
                    sections.push(TabSection::Values { lines });
                }
                TabElement::Values => {}
                TabElement::Table => {
                    for table in &self.table_data {
                        sections.push(TabSection::Table {
                            columns: table.columns.iter().map(|c| c.text.clone()).collect(),
                            rows: table.complete_rows().map(<[Value]>::to_vec).collect(),
                        });
                    }
                }
            }
        }
        Ok(sections)
    }
}
