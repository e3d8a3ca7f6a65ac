//! Ownership verification messages: `<address>:<unixSeconds>:starRegistry`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Literal suffix of every verification message.
pub const MESSAGE_TAG: &str = "starRegistry";

/// A verification message a claimant signs to prove control of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipMessage {
    address: String,
    timestamp: i64,
}

impl OwnershipMessage {
    pub fn new(address: impl Into<String>, timestamp: i64) -> Self {
        Self {
            address: address.into(),
            timestamp,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Unix seconds at which the message was issued.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Parse a message, requiring exactly three colon-separated fields.
    pub fn parse(message: &str) -> Result<Self> {
        let mut fields = message.split(':');
        let (Some(address), Some(timestamp), Some(tag), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(CoreError::MalformedMessage(
                "expected <address>:<timestamp>:starRegistry".into(),
            ));
        };

        if address.is_empty() {
            return Err(CoreError::MalformedMessage("empty address".into()));
        }
        if tag != MESSAGE_TAG {
            return Err(CoreError::MalformedMessage(format!("unexpected tag {tag:?}")));
        }
        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|e| CoreError::MalformedMessage(format!("bad timestamp: {e}")))?;

        Ok(Self::new(address, timestamp))
    }
}

impl fmt::Display for OwnershipMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.timestamp, MESSAGE_TAG)
    }
}

impl FromStr for OwnershipMessage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let message = OwnershipMessage::new("n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC", 1554145343);
        assert_eq!(
            message.to_string(),
            "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC:1554145343:starRegistry"
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let text = "moHNUnnRBCVWVPWdwiyuFifEckbm7GP8cJ:1554145943:starRegistry";
        let message: OwnershipMessage = text.parse().unwrap();
        assert_eq!(message.address(), "moHNUnnRBCVWVPWdwiyuFifEckbm7GP8cJ");
        assert_eq!(message.timestamp(), 1554145943);
        assert_eq!(message.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "",
            "addr:123",
            "addr:123:starRegistry:extra",
            ":123:starRegistry",
            "addr:abc:starRegistry",
            "addr:123:otherRegistry",
        ] {
            assert!(
                matches!(OwnershipMessage::parse(text), Err(CoreError::MalformedMessage(_))),
                "{text:?} should be rejected"
            );
        }
    }
}
