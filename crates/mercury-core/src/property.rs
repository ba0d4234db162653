//! # Event Property Bag
//!
//! Every [`Event`](crate::event::Event) carries a string-keyed map of typed
//! values. The bag is write-once: it is assembled while the event is built
//! and never mutated afterwards, so listeners can hold `&Event` across a
//! whole tick without defensive copies.
//!
//! ## Read Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  props.text("message")                                          │
//! │      │                                                          │
//! │      ├── key absent          ──► Err(PropertyError::Missing)    │
//! │      ├── key holds Int(..)   ──► Err(PropertyError::WrongType)  │
//! │      └── key holds Text(..)  ──► Ok(&str)                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absent and wrong-type are *different* failures: absent is usually a
//! protocol-level disagreement about which properties an event carries,
//! wrong-type is a caller bug. Error messages name both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Well-Known Property Keys
// =============================================================================

/// Property keys shared between event producers and consumers.
///
/// Kept as constants so a typo becomes a compile error instead of a
/// mysteriously absent property at runtime.
pub mod keys {
    /// Registry-assigned id of the lane that produced the event.
    pub const POS_SYSTEM_ID: &str = "posSystemId";
    /// Store name portion of the lane identity.
    pub const STORE_NAME: &str = "storeName";
    /// Lane number portion of the lane identity.
    pub const LANE_NUMBER: &str = "laneNumber";
    /// Human-readable text for LOG/ERROR events.
    pub const MESSAGE: &str = "message";
    /// Id of the live transaction a confirmation belongs to.
    pub const TRANSACTION_ID: &str = "transactionId";
    /// Per-lane sequence number of the live transaction.
    pub const SEQUENCE_NUMBER: &str = "sequenceNumber";
    /// Item SKU on scan requests/confirmations.
    pub const SKU: &str = "sku";
    /// Discount code on discount requests/confirmations.
    pub const DISCOUNT_CODE: &str = "discountCode";
    /// Tendered amount on payment requests/confirmations.
    pub const AMOUNT: &str = "amount";
    /// Masked card number on card payments.
    pub const CARD_NUMBER: &str = "cardNumber";
}

// =============================================================================
// Property Value
// =============================================================================

/// One typed value in an event's property bag.
///
/// The set of types is deliberately small: free text, counts, monetary
/// amounts, and flags cover everything the original views exchange. Decimal
/// amounts are [`Money`] (integer cents), never floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Identifiers and free text.
    Text(String),
    /// Integer counts (quantities, lane numbers).
    Int(i64),
    /// Monetary amounts in integer cents.
    Amount(Money),
    /// Boolean flags.
    Flag(bool),
}

impl PropertyValue {
    /// Name of the stored type, for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Int(_) => "int",
            PropertyValue::Amount(_) => "amount",
            PropertyValue::Flag(_) => "flag",
        }
    }
}

// Ergonomic conversions so call sites read `props.with(keys::SKU, "COKE-330")`
// rather than spelling the variant.

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        // Sequence numbers are u64 in the domain but stored as i64, matching
        // SQLite's integer affinity. Saturation instead of wrap keeps a
        // nonsensical giant sequence from becoming a negative one.
        PropertyValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<Money> for PropertyValue {
    fn from(value: Money) -> Self {
        PropertyValue::Amount(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Flag(value)
    }
}

// =============================================================================
// Property Error
// =============================================================================

/// Failure reading a property out of the bag.
///
/// `Missing` and `WrongType` are separate variants on purpose: callers that
/// treat a property as optional match on `Missing` and still surface
/// `WrongType`, which is always a bug somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The key is not present in the bag at all.
    #[error("property '{key}' is missing")]
    Missing { key: String },

    /// The key is present but holds a different type than requested.
    #[error("property '{key}' is {actual}, not {requested}")]
    WrongType {
        key: String,
        requested: &'static str,
        actual: &'static str,
    },
}

/// Convenience type alias for property reads.
pub type PropertyResult<T> = Result<T, PropertyError>;

// =============================================================================
// Properties
// =============================================================================

/// The string-keyed property bag carried by every event.
///
/// Backed by a `BTreeMap` so iteration and serialization order are
/// deterministic, which keeps journal output and test assertions stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, PropertyValue>,
}

impl Properties {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property, consuming and returning the bag (builder style).
    ///
    /// Inserting an existing key replaces the value; events are assembled in
    /// one place, so a replace during construction is a deliberate override,
    /// not a race.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Raw lookup. `None` means absent; typed accessors below distinguish
    /// absent from wrong-type.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Whether the key is present (any type).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of properties in the bag.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    /// Reads a text property.
    pub fn text(&self, key: &str) -> PropertyResult<&str> {
        match self.require(key, "text")? {
            PropertyValue::Text(value) => Ok(value),
            other => Err(self.wrong_type(key, "text", other)),
        }
    }

    /// Reads an integer property.
    pub fn int(&self, key: &str) -> PropertyResult<i64> {
        match self.require(key, "int")? {
            PropertyValue::Int(value) => Ok(*value),
            other => Err(self.wrong_type(key, "int", other)),
        }
    }

    /// Reads a monetary amount property.
    pub fn amount(&self, key: &str) -> PropertyResult<Money> {
        match self.require(key, "amount")? {
            PropertyValue::Amount(value) => Ok(*value),
            other => Err(self.wrong_type(key, "amount", other)),
        }
    }

    /// Reads a flag property.
    pub fn flag(&self, key: &str) -> PropertyResult<bool> {
        match self.require(key, "flag")? {
            PropertyValue::Flag(value) => Ok(*value),
            other => Err(self.wrong_type(key, "flag", other)),
        }
    }

    fn require(&self, key: &str, _requested: &'static str) -> PropertyResult<&PropertyValue> {
        self.entries.get(key).ok_or_else(|| PropertyError::Missing {
            key: key.to_string(),
        })
    }

    fn wrong_type(
        &self,
        key: &str,
        requested: &'static str,
        actual: &PropertyValue,
    ) -> PropertyError {
        PropertyError::WrongType {
            key: key.to_string(),
            requested,
            actual: actual.type_name(),
        }
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Properties {
        Properties::new()
            .with(keys::MESSAGE, "scanner offline")
            .with(keys::LANE_NUMBER, 4i64)
            .with(keys::AMOUNT, Money::from_cents(1099))
            .with("training", true)
    }

    #[test]
    fn test_typed_accessors_return_values() {
        let props = sample();
        assert_eq!(props.text(keys::MESSAGE).unwrap(), "scanner offline");
        assert_eq!(props.int(keys::LANE_NUMBER).unwrap(), 4);
        assert_eq!(props.amount(keys::AMOUNT).unwrap(), Money::from_cents(1099));
        assert!(props.flag("training").unwrap());
    }

    #[test]
    fn test_missing_key_is_distinct_from_wrong_type() {
        let props = sample();

        let missing = props.text("nope").unwrap_err();
        assert_eq!(
            missing,
            PropertyError::Missing {
                key: "nope".to_string()
            }
        );

        // Key exists but holds an Int; asking for text is a caller bug.
        let wrong = props.text(keys::LANE_NUMBER).unwrap_err();
        assert_eq!(
            wrong,
            PropertyError::WrongType {
                key: keys::LANE_NUMBER.to_string(),
                requested: "text",
                actual: "int",
            }
        );
    }

    #[test]
    fn test_error_messages_name_key_and_types() {
        let props = sample();
        let err = props.int(keys::MESSAGE).unwrap_err();
        assert_eq!(err.to_string(), "property 'message' is text, not int");

        let err = props.flag("ghost").unwrap_err();
        assert_eq!(err.to_string(), "property 'ghost' is missing");
    }

    #[test]
    fn test_with_replaces_existing_key() {
        let props = Properties::new()
            .with(keys::MESSAGE, "first")
            .with(keys::MESSAGE, "second");
        assert_eq!(props.len(), 1);
        assert_eq!(props.text(keys::MESSAGE).unwrap(), "second");
    }

    #[test]
    fn test_u64_sequence_saturates_instead_of_wrapping() {
        let props = Properties::new().with(keys::SEQUENCE_NUMBER, u64::MAX);
        assert_eq!(props.int(keys::SEQUENCE_NUMBER).unwrap(), i64::MAX);
    }

    #[test]
    fn test_serialization_is_tagged_and_ordered() {
        let props = Properties::new()
            .with("b", 2i64)
            .with("a", "one");
        let json = serde_json::to_string(&props).unwrap();
        // BTreeMap ordering: "a" before "b" regardless of insertion order.
        assert_eq!(
            json,
            r#"{"a":{"type":"text","value":"one"},"b":{"type":"int","value":2}}"#
        );

        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
