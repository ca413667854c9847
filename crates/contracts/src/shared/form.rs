//! Input shapes shared by the entity forms.

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Ordered list input. Accepts either a JSON array or legacy comma-separated
/// text; both normalize the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Text(String),
}

impl Default for ListInput {
    fn default() -> Self {
        ListInput::Items(Vec::new())
    }
}

impl ListInput {
    /// Trimmed entries with blanks dropped, original order kept
    pub fn normalize(&self) -> Vec<String> {
        match self {
            ListInput::Items(items) => normalize_items(items),
            ListInput::Text(text) => split_list(text),
        }
    }
}

impl From<Vec<String>> for ListInput {
    fn from(items: Vec<String>) -> Self {
        ListInput::Items(items)
    }
}

impl From<&str> for ListInput {
    fn from(text: &str) -> Self {
        ListInput::Text(text.to_string())
    }
}

pub fn split_list(text: &str) -> Vec<String> {
    normalize_items(text.split(','))
}

pub fn normalize_items<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Price as typed in a form field or sent as a JSON number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl Default for PriceInput {
    fn default() -> Self {
        PriceInput::Text(String::new())
    }
}

impl PriceInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, PriceInput::Text(t) if t.trim().is_empty())
    }

    /// Finite, non-negative decimal
    pub fn parse(&self) -> Result<f64, ValidationError> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(t) => t
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidPrice(t.clone()))?,
        };

        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::InvalidPrice(value.to_string()))
        }
    }
}

impl From<f64> for PriceInput {
    fn from(n: f64) -> Self {
        PriceInput::Number(n)
    }
}

impl From<&str> for PriceInput {
    fn from(text: &str) -> Self {
        PriceInput::Text(text.to_string())
    }
}

/// Empty or whitespace-only optional text is treated as absent
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_text_is_split_trimmed_and_compacted() {
        assert_eq!(
            split_list(" ميكب عرائس , , ميكب سهرات,تسريحات ,"),
            vec!["ميكب عرائس", "ميكب سهرات", "تسريحات"]
        );
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
    }

    #[test]
    fn array_and_text_inputs_deserialize() {
        let items: ListInput = serde_json::from_str(r#"["wifi", " ", " mirrors "]"#).unwrap();
        assert_eq!(items.normalize(), vec!["wifi", "mirrors"]);

        let text: ListInput = serde_json::from_str(r#""wifi, mirrors""#).unwrap();
        assert_eq!(text.normalize(), vec!["wifi", "mirrors"]);
    }

    #[test]
    fn price_parsing() {
        assert_eq!(PriceInput::from("50").parse().unwrap(), 50.0);
        assert_eq!(PriceInput::from(" 12.5 ").parse().unwrap(), 12.5);
        assert_eq!(PriceInput::from(0.0).parse().unwrap(), 0.0);
        assert!(PriceInput::from("abc").parse().is_err());
        assert!(PriceInput::from("-1").parse().is_err());
        assert!(PriceInput::from("NaN").parse().is_err());
        assert!(PriceInput::from("inf").parse().is_err());
        assert!(PriceInput::from(-3.0).parse().is_err());
    }

    #[test]
    fn blank_price_detection() {
        assert!(PriceInput::default().is_blank());
        assert!(PriceInput::from("  ").is_blank());
        assert!(!PriceInput::from(0.0).is_blank());
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(non_blank(&Some("  ".into())), None);
        assert_eq!(non_blank(&Some(" bio ".into())), Some("bio".into()));
        assert_eq!(non_blank(&None), None);
    }
}
