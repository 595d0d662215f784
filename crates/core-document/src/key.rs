//! Grouping key extraction.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyPatternError {
    #[error("invalid grouping key pattern `{pattern}`")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("grouping key pattern `{pattern}` has no capture group")]
    NoCaptureGroup { pattern: String },
}

/// Extracts the grouping key (capture group 1) from the start of a raw line.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    re: Regex,
}

impl KeyExtractor {
    pub fn new(pattern: &str) -> Result<Self, KeyPatternError> {
        let re = Regex::new(pattern).map_err(|source| KeyPatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        })?;
        if re.captures_len() < 2 {
            return Err(KeyPatternError::NoCaptureGroup {
                pattern: pattern.to_string(),
            });
        }
        Ok(Self { re })
    }

    /// Key for `raw`, or `None` when the line carries no key.
    pub fn extract<'a>(&self, raw: &'a str) -> Option<&'a str> {
        self.re
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|k| !k.is_empty())
    }
}
