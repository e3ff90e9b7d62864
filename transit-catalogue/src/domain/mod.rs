//! Domain types for the transit catalogue.
//!
//! Names are interned once in a [`NameRegistry`]; every other structure
//! refers to stops and buses through the small integer ids it hands out.

mod bus;
mod error;
mod geo;
mod names;
mod stop;

pub use bus::{Bus, BusInfo, expand_route};
pub use error::CatalogueError;
pub use geo::{Coordinates, EARTH_RADIUS_M};
pub use names::{BusId, NameId, NameRegistry, StopId};
pub use stop::Stop;
