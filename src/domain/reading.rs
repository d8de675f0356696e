use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// First unsigned decimal number in a piece of text. `\d` is any Unicode
/// decimal digit, so full-width `１５.５` matches as well as `15.5`.
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Code point of the zero in each run of Unicode decimal digits (`Nd`),
/// ascending. Every run holds ten consecutive digits.
const DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

fn digit_value(c: char) -> Option<u32> {
    let cp = c as u32;
    let runs = DIGIT_ZEROS.partition_point(|&zero| zero <= cp);
    let zero = DIGIT_ZEROS[..runs].last()?;
    let value = cp - zero;
    (value < 10).then_some(value)
}

/// Rewrite a matched number with ASCII digits so `f64::from_str` accepts it.
fn to_ascii_number(matched: &str) -> Option<String> {
    matched
        .chars()
        .map(|c| match c {
            '.' => Some('.'),
            _ => digit_value(c).and_then(|d| char::from_digit(d, 10)),
        })
        .collect()
}

/// Result of one successful poll.
///
/// The upstream reports the balance as free text (e.g. `"15.5kWh"`), so a
/// reading is either the first number found in that text or, when there is
/// none, the text itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Kwh(f64),
    Text(String),
}

impl Reading {
    /// Extract a reading from the upstream balance message.
    pub fn from_message(message: &str) -> Self {
        NUMBER
            .find(message)
            .and_then(|m| to_ascii_number(m.as_str()))
            .and_then(|n| n.parse::<f64>().ok())
            .map(Reading::Kwh)
            .unwrap_or_else(|| Reading::Text(message.to_string()))
    }

    pub fn as_kwh(&self) -> Option<f64> {
        match self {
            Reading::Kwh(v) => Some(*v),
            Reading::Text(_) => None,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Kwh(v) => write!(f, "{v}"),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("15.5kWh", 15.5)]
    #[case("7", 7.0)]
    #[case("剩余电量:32.07度", 32.07)]
    #[case("房间剩余电量 0", 0.0)]
    #[case("12.5 then 40.1", 12.5)]
    #[case("-3.2", 3.2)]
    #[case("8.", 8.0)]
    #[case("1.2.3", 1.2)]
    #[case(".5", 5.0)]
    #[case("剩余１５.５度", 15.5)]
    #[case("７", 7.0)]
    #[case("余量 ٣٤ kWh", 34.0)]
    #[case("剩余电量：２0.25度", 20.25)]
    fn test_numeric_messages(#[case] message: &str, #[case] expected: f64) {
        assert_eq!(Reading::from_message(message), Reading::Kwh(expected));
    }

    #[rstest]
    #[case("余额不足")]
    #[case("未知电量")]
    #[case("")]
    #[case("电量: 约十度")]
    fn test_non_numeric_messages(#[case] message: &str) {
        assert_eq!(
            Reading::from_message(message),
            Reading::Text(message.to_string())
        );
    }

    #[test]
    fn test_digit_values_across_scripts() {
        assert_eq!(digit_value('0'), Some(0));
        assert_eq!(digit_value('9'), Some(9));
        assert_eq!(digit_value('９'), Some(9));
        assert_eq!(digit_value('٣'), Some(3));
        assert_eq!(digit_value('३'), Some(3));
        assert_eq!(digit_value('a'), None);
        assert_eq!(digit_value('度'), None);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let a = Reading::from_message("剩余 21.3 度");
        let b = Reading::from_message("剩余 21.3 度");
        assert_eq!(a, b);
    }

    #[test]
    fn test_accessors() {
        let kwh = Reading::Kwh(10.25);
        assert_eq!(kwh.as_kwh(), Some(10.25));
        assert_eq!(kwh.to_string(), "10.25");

        let text = Reading::Text("余额不足".into());
        assert_eq!(text.as_kwh(), None);
        assert_eq!(text.to_string(), "余额不足");
    }

    #[test]
    fn test_serializes_as_plain_value() {
        assert_eq!(serde_json::to_string(&Reading::Kwh(7.0)).unwrap(), "7.0");
        assert_eq!(
            serde_json::to_string(&Reading::Text("余额不足".into())).unwrap(),
            "\"余额不足\""
        );
    }
}
