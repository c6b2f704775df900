use serde::{Deserialize, Serialize};

/// Standard instrument code as understood by the engine
///
/// Codes are dotted, exchange first: `SHFE.ag.HOT`, `CFFEX.IF.2306`,
/// `SSE.600000`. The context never interprets the code beyond splitting
/// off the exchange; it is an opaque key everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    /// Create a new instrument ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange prefix (`SHFE` for `SHFE.ag.HOT`), if the code is dotted
    pub fn exchange(&self) -> Option<&str> {
        self.0.split_once('.').map(|(exchange, _)| exchange)
    }

    /// Product part of the code (`ag` for `SHFE.ag.HOT`, `600000` for `SSE.600000`)
    pub fn product(&self) -> Option<&str> {
        self.0.split('.').nth(1)
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&InstrumentId> for InstrumentId {
    fn from(id: &InstrumentId) -> Self {
        id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parts() {
        let id = InstrumentId::new("SHFE.ag.HOT");
        assert_eq!(id.exchange(), Some("SHFE"));
        assert_eq!(id.product(), Some("ag"));
        assert_eq!(id.to_string(), "SHFE.ag.HOT");

        let bare = InstrumentId::from("ag");
        assert_eq!(bare.exchange(), None);
        assert_eq!(bare.product(), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = InstrumentId::new("CFFEX.IF.2306");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"CFFEX.IF.2306\"");
    }
}
