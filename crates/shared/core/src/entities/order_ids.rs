use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier assigned by the engine to a single order placement
pub type LocalOrderId = i64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid local order id '{token}' at position {position}")]
pub struct OrderIdParseError {
    pub token: String,
    pub position: usize,
}

/// Ordered set of local order ids decoded from an engine reply
///
/// The engine answers buy/sell/cancel-all with a comma-delimited list
/// such as `5,7,9`. An empty reply means no orders, never one empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderIdSet(Vec<LocalOrderId>);

impl OrderIdSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode an engine reply
    pub fn parse(reply: &str) -> Result<Self, OrderIdParseError> {
        if reply.trim().is_empty() {
            return Ok(Self::new());
        }

        reply
            .split(',')
            .enumerate()
            .map(|(position, token)| {
                token
                    .trim()
                    .parse::<LocalOrderId>()
                    .map_err(|_| OrderIdParseError {
                        token: token.to_string(),
                        position,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: LocalOrderId) -> bool {
        self.0.contains(&id)
    }

    pub fn first(&self) -> Option<LocalOrderId> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = LocalOrderId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[LocalOrderId] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<LocalOrderId> {
        self.0
    }
}

impl FromStr for OrderIdSet {
    type Err = OrderIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<LocalOrderId>> for OrderIdSet {
    fn from(ids: Vec<LocalOrderId>) -> Self {
        Self(ids)
    }
}

impl FromIterator<LocalOrderId> for OrderIdSet {
    fn from_iter<T: IntoIterator<Item = LocalOrderId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for OrderIdSet {
    type Item = LocalOrderId;
    type IntoIter = std::vec::IntoIter<LocalOrderId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Comma-joined, the same shape the engine replies with
impl fmt::Display for OrderIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reply_is_empty_set() {
        let ids = OrderIdSet::parse("").unwrap();
        assert!(ids.is_empty());
        assert_eq!(ids.len(), 0);

        assert!(OrderIdSet::parse("  ").unwrap().is_empty());
    }

    #[test]
    fn test_keeps_reply_order() {
        let ids = OrderIdSet::parse("5,7,9").unwrap();
        assert_eq!(ids.as_slice(), &[5, 7, 9]);

        let unordered = OrderIdSet::parse("9, 5,7").unwrap();
        assert_eq!(unordered.as_slice(), &[9, 5, 7]);
    }

    #[test]
    fn test_signed_ids() {
        let ids = OrderIdSet::parse("-1,3").unwrap();
        assert_eq!(ids.as_slice(), &[-1, 3]);
    }

    #[test]
    fn test_bad_token_reports_position() {
        let err = OrderIdParseError {
            token: "x".to_string(),
            position: 1,
        };
        assert_eq!(OrderIdSet::parse("5,x,9"), Err(err));
        assert!(OrderIdSet::parse("5,,9").is_err());
    }

    #[test]
    fn test_display_matches_reply_shape() {
        let ids = OrderIdSet::from(vec![5, 7, 9]);
        assert_eq!(ids.to_string(), "5,7,9");
        assert_eq!(OrderIdSet::new().to_string(), "");
    }
}
