//! # Event Model
//!
//! Everything that happens on a lane is an [`Event`]: a kind tag plus an
//! immutable property bag. Views, hardware shims, and test drivers build
//! events and hand them to the lane controller; the controller buffers them
//! and fans them out to listeners on the next tick.
//!
//! ## Request / Confirmation Pairs
//! ```text
//! ┌────────────────────────────┬──────────────────────────────┐
//! │ Request intent             │ Confirmation (broadcast)     │
//! ├────────────────────────────┼──────────────────────────────┤
//! │ REQUEST_START_TRANSACTION  │ TRANSACTION_STARTED          │
//! │ REQUEST_SCAN_ITEM          │ ITEM_SCANNED                 │
//! │ REQUEST_APPLY_DISCOUNT     │ DISCOUNT_APPLIED             │
//! │ REQUEST_ENTER_PAYMENT      │ PAYMENT_ENTERED              │
//! │ REQUEST_COMPLETE_TRANSACTION│ TRANSACTION_COMPLETED       │
//! │ REQUEST_VOID_TRANSACTION   │ TRANSACTION_VOIDED           │
//! │ REQUEST_RESET_POS          │ POS_RESET                    │
//! └────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! A request says "I would like this to happen" and is subject to the guard
//! table in [`state`](crate::state). A confirmation says "this has happened"
//! and is recorded unconditionally. `POS_BOOTUP`/`POS_SHUTDOWN` are produced
//! by the controller life-cycle itself; `LOG`/`ERROR` are diagnostics for
//! the journal.
//!
//! ## Versioning
//! The kind set is closed and versioned through the wire names below: adding
//! a kind is backward compatible, removing or renaming one is not.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::LaneIdentity;
use crate::money::Money;
use crate::property::{keys, Properties, PropertyResult, PropertyValue};

// =============================================================================
// Event Kind
// =============================================================================

/// The closed set of event kinds.
///
/// Wire names are SCREAMING_SNAKE_CASE (`REQUEST_SCAN_ITEM`); the serde
/// rename keeps Rust variant naming conventions without breaking the format
/// the original journal consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    // Life-cycle notifications (produced by the controller, never requested)
    PosBootup,
    PosShutdown,
    PosReset,

    // Request intents (guarded)
    RequestStartTransaction,
    RequestScanItem,
    RequestApplyDiscount,
    RequestEnterPayment,
    RequestCompleteTransaction,
    RequestVoidTransaction,
    RequestResetPos,

    // Confirmations (broadcast after a guard passes)
    TransactionStarted,
    ItemScanned,
    DiscountApplied,
    PaymentEntered,
    TransactionCompleted,
    TransactionVoided,

    // Diagnostics
    Log,
    Error,
}

impl EventKind {
    /// Every kind, in declaration order. Used by listeners that want the
    /// full stream (the terminal's trace view) and by exhaustive tests.
    pub const ALL: [EventKind; 18] = [
        EventKind::PosBootup,
        EventKind::PosShutdown,
        EventKind::PosReset,
        EventKind::RequestStartTransaction,
        EventKind::RequestScanItem,
        EventKind::RequestApplyDiscount,
        EventKind::RequestEnterPayment,
        EventKind::RequestCompleteTransaction,
        EventKind::RequestVoidTransaction,
        EventKind::RequestResetPos,
        EventKind::TransactionStarted,
        EventKind::ItemScanned,
        EventKind::DiscountApplied,
        EventKind::PaymentEntered,
        EventKind::TransactionCompleted,
        EventKind::TransactionVoided,
        EventKind::Log,
        EventKind::Error,
    ];

    /// The wire name, e.g. `REQUEST_SCAN_ITEM`.
    pub const fn name(&self) -> &'static str {
        match self {
            EventKind::PosBootup => "POS_BOOTUP",
            EventKind::PosShutdown => "POS_SHUTDOWN",
            EventKind::PosReset => "POS_RESET",
            EventKind::RequestStartTransaction => "REQUEST_START_TRANSACTION",
            EventKind::RequestScanItem => "REQUEST_SCAN_ITEM",
            EventKind::RequestApplyDiscount => "REQUEST_APPLY_DISCOUNT",
            EventKind::RequestEnterPayment => "REQUEST_ENTER_PAYMENT",
            EventKind::RequestCompleteTransaction => "REQUEST_COMPLETE_TRANSACTION",
            EventKind::RequestVoidTransaction => "REQUEST_VOID_TRANSACTION",
            EventKind::RequestResetPos => "REQUEST_RESET_POS",
            EventKind::TransactionStarted => "TRANSACTION_STARTED",
            EventKind::ItemScanned => "ITEM_SCANNED",
            EventKind::DiscountApplied => "DISCOUNT_APPLIED",
            EventKind::PaymentEntered => "PAYMENT_ENTERED",
            EventKind::TransactionCompleted => "TRANSACTION_COMPLETED",
            EventKind::TransactionVoided => "TRANSACTION_VOIDED",
            EventKind::Log => "LOG",
            EventKind::Error => "ERROR",
        }
    }

    /// Whether this kind is a request intent (subject to a guard) rather
    /// than a notification.
    pub const fn is_request(&self) -> bool {
        matches!(
            self,
            EventKind::RequestStartTransaction
                | EventKind::RequestScanItem
                | EventKind::RequestApplyDiscount
                | EventKind::RequestEnterPayment
                | EventKind::RequestCompleteTransaction
                | EventKind::RequestVoidTransaction
                | EventKind::RequestResetPos
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Event
// =============================================================================

/// An immutable event: kind + property bag.
///
/// Construction is the only place properties are added; once an event has
/// been handed to `dispatch` it is never mutated, so the controller can
/// buffer it and every listener can read the same instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

impl Event {
    /// Creates an event with no properties.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            properties: Properties::new(),
        }
    }

    /// Creates an event carrying a pre-built property bag.
    pub fn with_properties(kind: EventKind, properties: Properties) -> Self {
        Self { kind, properties }
    }

    /// Adds a property during construction (builder style).
    ///
    /// ## Example
    /// ```rust
    /// use mercury_core::event::{Event, EventKind};
    /// use mercury_core::property::keys;
    ///
    /// let scan = Event::new(EventKind::RequestScanItem)
    ///     .with(keys::SKU, "COKE-330")
    ///     .with("quantity", 2i64);
    /// assert_eq!(scan.text(keys::SKU).unwrap(), "COKE-330");
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties = self.properties.with(key, value);
        self
    }

    // -------------------------------------------------------------------------
    // Helper constructors for the common shapes
    // -------------------------------------------------------------------------

    /// A `LOG` diagnostic carrying a message.
    pub fn log(message: impl Into<String>) -> Self {
        Event::new(EventKind::Log).with(keys::MESSAGE, message.into())
    }

    /// An `ERROR` diagnostic carrying a message.
    pub fn error(message: impl Into<String>) -> Self {
        Event::new(EventKind::Error).with(keys::MESSAGE, message.into())
    }

    /// The `POS_BOOTUP` notification a controller records when it boots,
    /// stamped with the lane identity.
    pub fn bootup(identity: &LaneIdentity) -> Self {
        Event::new(EventKind::PosBootup).with_identity(identity)
    }

    /// The `POS_SHUTDOWN` notification a controller records on shutdown.
    pub fn shutdown(identity: &LaneIdentity) -> Self {
        Event::new(EventKind::PosShutdown).with_identity(identity)
    }

    /// Stamps the three lane identity properties onto the event.
    pub fn with_identity(self, identity: &LaneIdentity) -> Self {
        self.with(keys::STORE_NAME, identity.store_name())
            .with(keys::LANE_NUMBER, identity.lane_number() as i64)
            .with(keys::POS_SYSTEM_ID, identity.pos_system_id().to_string())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The event's kind tag.
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// The full property bag.
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Whether this event is a request intent.
    pub const fn is_request(&self) -> bool {
        self.kind.is_request()
    }

    /// Reads a text property (see [`Properties::text`]).
    pub fn text(&self, key: &str) -> PropertyResult<&str> {
        self.properties.text(key)
    }

    /// Reads an integer property.
    pub fn int(&self, key: &str) -> PropertyResult<i64> {
        self.properties.int(key)
    }

    /// Reads a monetary amount property.
    pub fn amount(&self, key: &str) -> PropertyResult<Money> {
        self.properties.amount(key)
    }

    /// Reads a flag property.
    pub fn flag(&self, key: &str) -> PropertyResult<bool> {
        self.properties.flag(key)
    }

    // -------------------------------------------------------------------------
    // Wire format
    // -------------------------------------------------------------------------

    /// Serializes to the JSON wire format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from the JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if let Ok(message) = self.text(keys::MESSAGE) {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
