//! Trend classification for metric deltas shown next to datapoints.

pub mod presentation;

use serde::{Deserialize, Deserializer, Serialize};

/// Label used when the backend did not provide a trend at all.
pub const UNKNOWN_TREND_TEXT: &str = "?";

/// Trend as delivered by the backend alongside a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDescriptor {
    /// `+`, `-`, or anything else for "no meaningful change".
    #[serde(default, deserialize_with = "null_as_default")]
    pub direction: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// An increase is undesirable for this metric (downtime, low TPS spikes...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub reversed: bool,
}

/// The backend sends `null` for fields it has no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TrendDescriptor {
    pub fn new(direction: impl Into<String>, text: impl Into<String>, reversed: bool) -> Self {
        Self {
            direction: direction.into(),
            text: text.into(),
            reversed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Good,
    Bad,
    Neutral,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    Up,
    Down,
    Flat,
}

/// Semantic reading of a trend, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendClassification {
    pub polarity: Polarity,
    pub arrow: Arrow,
    pub text: String,
}

/// Classify a trend descriptor. Total over its input: an absent descriptor is
/// the only way to obtain [`Polarity::Unknown`].
pub fn classify(descriptor: Option<&TrendDescriptor>) -> TrendClassification {
    let Some(trend) = descriptor else {
        return TrendClassification {
            polarity: Polarity::Unknown,
            arrow: Arrow::Flat,
            text: UNKNOWN_TREND_TEXT.to_string(),
        };
    };

    let (arrow, polarity) = match (trend.direction.as_str(), trend.reversed) {
        ("+", false) => (Arrow::Up, Polarity::Good),
        ("+", true) => (Arrow::Up, Polarity::Bad),
        ("-", false) => (Arrow::Down, Polarity::Bad),
        ("-", true) => (Arrow::Down, Polarity::Good),
        _ => (Arrow::Flat, Polarity::Neutral),
    };

    TrendClassification {
        polarity,
        arrow,
        text: trend.text.clone(),
    }
}
