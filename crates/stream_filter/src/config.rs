//! Compiled stream settings

use contracts::{Message, Redirect, StreamSettings};
use regex::Regex;

use crate::error::{Result, StreamError};

/// Stream mode configuration, read-only after startup
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Read messages from the input stream
    pub enabled: bool,
    /// Lines must match to become messages; `None` passes every line
    pub matching: Option<Regex>,
    /// Echo target for every input line
    pub redirect: Option<Redirect>,
}

impl StreamConfig {
    /// Compile file settings
    ///
    /// # Errors
    /// Returns `InvalidPattern` if `matching` does not compile
    pub fn from_settings(settings: &StreamSettings) -> Result<Self> {
        let matching = settings
            .matching
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| StreamError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            enabled: settings.enabled,
            matching,
            redirect: settings.redirect,
        })
    }

    /// Build the message for one input line, if it qualifies.
    ///
    /// With a pattern, the message is the first capturing group that took
    /// part in the match, falling back to the whole match.
    pub fn extract(&self, line: &str) -> Option<Message> {
        let Some(pattern) = &self.matching else {
            return Some(Message::from(line));
        };

        let captures = pattern.captures(line)?;
        let matched = captures
            .iter()
            .skip(1)
            .flatten()
            .next()
            .or_else(|| captures.get(0))?;

        Some(Message::from(matched.as_str()))
    }
}
