//! # Lane Identity
//!
//! Who a lane controller is: store name, lane number, and the
//! registry-assigned POS system id. Identity is supplied by the bootstrap
//! (after registering the lane with the [`PosRegistry`] implementation in
//! the persistence crate) and must be set before `boot()`; a controller
//! without an identity refuses to boot.
//!
//! [`PosRegistry`]: https://docs.rs/mercury-db

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Identity of one checkout lane within one store.
///
/// Immutable once constructed; a lane never changes store or number at
/// runtime. All three fields are stamped onto every life-cycle and
/// confirmation event the controller produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneIdentity {
    store_name: String,
    lane_number: u32,
    pos_system_id: Uuid,
}

impl LaneIdentity {
    /// Validates and builds a lane identity.
    ///
    /// ## Errors
    /// - [`CoreError::StoreNameRequired`] if the store name is empty or
    ///   whitespace-only
    /// - [`CoreError::LaneNumberOutOfRange`] if the lane number is zero
    ///   (lanes are numbered from 1, matching the signage on the floor)
    pub fn new(
        store_name: impl Into<String>,
        lane_number: u32,
        pos_system_id: Uuid,
    ) -> CoreResult<Self> {
        let store_name = store_name.into();
        if store_name.trim().is_empty() {
            return Err(CoreError::StoreNameRequired);
        }
        if lane_number == 0 {
            return Err(CoreError::LaneNumberOutOfRange { got: lane_number });
        }
        Ok(Self {
            store_name,
            lane_number,
            pos_system_id,
        })
    }

    /// The store this lane belongs to.
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// The lane's number within the store (1-based).
    pub const fn lane_number(&self) -> u32 {
        self.lane_number
    }

    /// The registry-assigned unique id of this lane.
    pub const fn pos_system_id(&self) -> Uuid {
        self.pos_system_id
    }
}

/// `Main Street/lane 4` — the form journal entries use.
impl fmt::Display for LaneIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/lane {}", self.store_name, self.lane_number)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
