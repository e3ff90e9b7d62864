//! Catalogue error types.
//!
//! These errors describe datasets that cannot form a valid catalogue.
//! Lookups of absent names are not errors; they return `None`.

/// Errors raised while populating or finalizing a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// A bus names a stop that was never added
    #[error("bus {bus} references unknown stop {stop}")]
    UnknownStop { bus: String, stop: String },

    /// Two consecutive stops of a bus have no registered road distance
    #[error("bus {bus} has no road distance from {from} to {to}")]
    MissingDistance {
        bus: String,
        from: String,
        to: String,
    },

    /// The summed road distance of a bus does not fit in 64 bits
    #[error("bus {bus} has a road distance too long to represent")]
    DistanceOverflow { bus: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogueError::UnknownStop {
            bus: "256".into(),
            stop: "Samara".into(),
        };
        assert_eq!(err.to_string(), "bus 256 references unknown stop Samara");

        let err = CatalogueError::MissingDistance {
            bus: "750".into(),
            from: "Marushkino".into(),
            to: "Rasskazovka".into(),
        };
        assert_eq!(
            err.to_string(),
            "bus 750 has no road distance from Marushkino to Rasskazovka"
        );

        let err = CatalogueError::DistanceOverflow { bus: "X1".into() };
        assert_eq!(
            err.to_string(),
            "bus X1 has a road distance too long to represent"
        );
    }
}
