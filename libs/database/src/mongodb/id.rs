//! Opaque document identifier
//!
//! Stored documents are keyed by BSON ObjectId, but that is a driver detail.
//! `DocumentId` keeps the ObjectId inside the database layer: callers parse
//! incoming strings explicitly and render outgoing ids as plain hex, so the
//! HTTP surface never carries driver types.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Identifier of a stored document.
///
/// Serde is transparent, so entities embedding a `DocumentId` round-trip
/// through BSON as native ObjectId keys. The string form is the canonical
/// 24-character lowercase hex rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(ObjectId);

/// Error returned when a string is not a well-formed document id.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid document id '{0}'")]
pub struct InvalidDocumentId(pub String);

impl DocumentId {
    /// Generate a fresh, unique id.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a 24-character hex string.
    ///
    /// Malformed input is an explicit error; there is no panicking
    /// conversion from strings anywhere in this type.
    pub fn parse(s: &str) -> Result<Self, InvalidDocumentId> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidDocumentId(s.to_string()))
    }

    /// Render as the canonical hex string.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DocumentId> for Bson {
    fn from(id: DocumentId) -> Self {
        Bson::ObjectId(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_bson;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }

    #[test]
    fn test_parse_display_round_trip() {
        let id = DocumentId::new();
        let hex = id.to_string();
        assert_eq!(hex.len(), 24);
        assert_eq!(DocumentId::parse(&hex).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "not-an-id", "123", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            let err = DocumentId::parse(bad).unwrap_err();
            assert!(err.to_string().contains(bad));
        }
    }

    #[test]
    fn test_from_str() {
        let id = DocumentId::new();
        let parsed: DocumentId = id.to_hex().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_converts_to_native_object_id_bson() {
        let id = DocumentId::new();
        match Bson::from(id) {
            Bson::ObjectId(oid) => assert_eq!(oid.to_hex(), id.to_hex()),
            other => panic!("expected ObjectId, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = DocumentId::new();
        let as_bson = to_bson(&id).unwrap();
        assert_eq!(as_bson, Bson::ObjectId(ObjectId::parse_str(id.to_hex()).unwrap()));
    }
}
