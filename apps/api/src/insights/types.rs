use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of insight requested. Selects the prompt template and the
/// response list a saved insight lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightType {
    MockInterview,
    Suitability,
    Tips,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unsupported insight type '{0}'. Expected one of: mockInterview, suitability, tips")]
pub struct UnsupportedInsightType(pub String);

impl InsightType {
    pub const ALL: [InsightType; 3] = [
        InsightType::MockInterview,
        InsightType::Suitability,
        InsightType::Tips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::MockInterview => "mockInterview",
            InsightType::Suitability => "suitability",
            InsightType::Tips => "tips",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = UnsupportedInsightType;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsightType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnsupportedInsightType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!("mockInterview".parse::<InsightType>(), Ok(InsightType::MockInterview));
        assert_eq!("suitability".parse::<InsightType>(), Ok(InsightType::Suitability));
        assert_eq!("tips".parse::<InsightType>(), Ok(InsightType::Tips));
    }

    #[test]
    fn test_parse_rejects_unknown_and_miscased() {
        for raw in ["", "coverLetter", "Tips", "mock_interview", " tips"] {
            let err = raw.parse::<InsightType>().unwrap_err();
            assert_eq!(err, UnsupportedInsightType(raw.to_string()));
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        for t in InsightType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(InsightType::MockInterview.to_string(), "mockInterview");
    }
}
