//! Stop type.

use std::collections::BTreeSet;

use super::{BusId, Coordinates, StopId};

/// A named geographic point served by zero or more buses.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Interned stop name
    pub id: StopId,
    /// Location of the stop
    pub coordinates: Coordinates,
    /// Buses calling at this stop
    pub buses: BTreeSet<BusId>,
}

impl Stop {
    /// Create a stop that no bus serves yet.
    pub fn new(id: StopId, coordinates: Coordinates) -> Self {
        Self {
            id,
            coordinates,
            buses: BTreeSet::new(),
        }
    }
}
