use std::fmt;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

pub const SCORE_MIN: u8 = 0;
pub const SCORE_MAX: u8 = 40;
pub const INDICATOR_COUNT: usize = 12;

/// One of the twelve fixed assessment indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Conversation,
    Interaction,
    Wellbeing,
    Expression,
    Empathy,
    Respect,
    Harmony,
    Disclosure,
    Creativity,
    Independence,
    Sensitivity,
    Fulfilment,
}

/// Registry order. Form inputs, validation, the summary table and the request body
/// all follow it.
pub const INDICATORS: [Indicator; INDICATOR_COUNT] = [
    Indicator::Conversation,
    Indicator::Interaction,
    Indicator::Wellbeing,
    Indicator::Expression,
    Indicator::Empathy,
    Indicator::Respect,
    Indicator::Harmony,
    Indicator::Disclosure,
    Indicator::Creativity,
    Indicator::Independence,
    Indicator::Sensitivity,
    Indicator::Fulfilment,
];

impl Indicator {
    pub fn label(self) -> &'static str {
        match self {
            Self::Conversation => "会話性",
            Self::Interaction => "交流性",
            Self::Wellbeing => "幸福性",
            Self::Expression => "表出性",
            Self::Empathy => "共感性",
            Self::Respect => "尊重性",
            Self::Harmony => "融和性",
            Self::Disclosure => "開示性",
            Self::Creativity => "創造性",
            Self::Independence => "自立性",
            Self::Sensitivity => "感受性",
            Self::Fulfilment => "充実性",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        INDICATORS.into_iter().find(|indicator| indicator.label() == label)
    }

    pub fn position(self) -> usize {
        INDICATORS
            .iter()
            .position(|indicator| *indicator == self)
            .unwrap_or_default()
    }

    /// Element id of the score input for this indicator.
    pub fn input_id(self) -> String {
        format!("score-{}", self.label())
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw score text per indicator, as typed by the user.
///
/// Values stay strings: the generation service receives exactly what was entered.
/// Serialises as a JSON object keyed by indicator label in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreEntry {
    values: [String; INDICATOR_COUNT],
}

impl ScoreEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, indicator: Indicator, raw: impl Into<String>) {
        self.values[indicator.position()] = raw.into();
    }

    pub fn get(&self, indicator: Indicator) -> &str {
        &self.values[indicator.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, &str)> {
        INDICATORS
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl FromIterator<(Indicator, String)> for ScoreEntry {
    fn from_iter<T: IntoIterator<Item = (Indicator, String)>>(iter: T) -> Self {
        let mut entry = Self::new();
        for (indicator, raw) in iter {
            entry.set(indicator, raw);
        }
        entry
    }
}

impl Serialize for ScoreEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(INDICATOR_COUNT))?;
        for (indicator, raw) in self.iter() {
            map.serialize_entry(indicator.label(), raw)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Standard,
    Elevated,
}

impl SessionMode {
    pub fn from_role(role: Option<&str>) -> Self {
        match role {
            Some(ADMIN_ROLE) => Self::Elevated,
            _ => Self::Standard,
        }
    }

    pub fn is_elevated(self) -> bool {
        self == Self::Elevated
    }
}

pub const ADMIN_ROLE: &str = "admin";

/// Feedback rating scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::One,
        Rating::Two,
        Rating::Three,
        Rating::Four,
        Rating::Five,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.value() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_labels() {
        let labels: Vec<_> = INDICATORS.iter().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            [
                "会話性", "交流性", "幸福性", "表出性", "共感性", "尊重性", "融和性", "開示性",
                "創造性", "自立性", "感受性", "充実性",
            ]
        );
        assert_eq!(Indicator::from_label("充実性"), Some(Indicator::Fulfilment));
        assert_eq!(Indicator::Fulfilment.position(), 11);
    }

    #[test]
    fn score_entry_serializes_in_registry_order() {
        let entry: ScoreEntry = INDICATORS
            .into_iter()
            .enumerate()
            .map(|(i, indicator)| (indicator, i.to_string()))
            .collect();
        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(json.starts_with(r#"{"会話性":"0","交流性":"1""#));
        assert!(json.ends_with(r#""充実性":"11"}"#));
    }

    #[test]
    fn only_admin_role_elevates() {
        assert_eq!(SessionMode::from_role(Some("admin")), SessionMode::Elevated);
        assert_eq!(SessionMode::from_role(Some("user")), SessionMode::Standard);
        assert_eq!(SessionMode::from_role(None), SessionMode::Standard);
    }
}
