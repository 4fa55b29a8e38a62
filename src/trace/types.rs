//! Walkthrough Data Structures
//!
//! @module trace/types

use serde::{Deserialize, Serialize};

/// One annotated, line-ranged excerpt judged relevant to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkthroughStep {
    /// Position within the trace run
    pub index: usize,
    /// Root-relative file path
    pub file: String,
    /// 1-based inclusive `[start, end]`
    pub line_range: [usize; 2],
    /// Literal text of the line range
    pub code: String,
    pub explanation: String,
    pub why_relevant: String,
    /// Raw import targets found on the matched line
    pub links_to: Vec<String>,
}

impl WalkthroughStep {
    pub fn start_line(&self) -> usize {
        self.line_range[0]
    }

    pub fn end_line(&self) -> usize {
        self.line_range[1]
    }

    /// Number of lines covered by the step
    pub fn line_count(&self) -> usize {
        self.end_line() + 1 - self.start_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let step = WalkthroughStep {
            index: 0,
            file: "src/a.ts".to_string(),
            line_range: [1, 3],
            code: "a\nb\nc".to_string(),
            explanation: "e".to_string(),
            why_relevant: "w".to_string(),
            links_to: vec!["./b".to_string()],
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["lineRange"], serde_json::json!([1, 3]));
        assert_eq!(json["whyRelevant"], "w");
        assert_eq!(json["linksTo"][0], "./b");
        assert_eq!(step.line_count(), 3);
    }
}
