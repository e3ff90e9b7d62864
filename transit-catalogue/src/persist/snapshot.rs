//! Snapshot records and the on-disk codec.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PersistError;
use crate::catalogue::{Catalogue, CatalogueBuilder};
use crate::config::{Color, RenderSettings, SerializationSettings};
use crate::domain::Coordinates;
use crate::router::{RouterError, RoutingSettings, TransportRouter};

/// Leading bytes of every snapshot file.
pub const MAGIC: [u8; 4] = *b"TCAT";

/// Version of the record layout below. Bump on any change to it.
pub const FORMAT_VERSION: u32 = 1;

/// Upper bound on the encoded size of one snapshot, in bytes.
///
/// Length prefixes are checked against it before anything is allocated.
pub const MAX_SNAPSHOT_BYTES: u64 = 256 * 1024 * 1024;

/// Fixed-width little-endian encoding bounded by [`MAX_SNAPSHOT_BYTES`].
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_SNAPSHOT_BYTES)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StopRecord {
    /// Index into [`Snapshot::stop_names`]
    pub(crate) name: u32,
    pub(crate) coordinates: Coordinates,
    /// Indices into [`Snapshot::bus_names`] of the buses calling here
    pub(crate) buses: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DistanceRecord {
    pub(crate) from: u32,
    pub(crate) to: u32,
    pub(crate) meters: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BusRecord {
    /// Index into [`Snapshot::bus_names`]
    pub(crate) name: u32,
    /// Stops the line was defined with; one-way lines are expanded on restore
    pub(crate) stops: Vec<u32>,
    pub(crate) is_roundtrip: bool,
}

/// Externally tagged form of [`Color`]; bincode cannot decode untagged enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ColorRecord {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<&Color> for ColorRecord {
    fn from(color: &Color) -> Self {
        match color {
            Color::Named(name) => Self::Named(name.clone()),
            Color::Rgb(r, g, b) => Self::Rgb(*r, *g, *b),
            Color::Rgba(r, g, b, a) => Self::Rgba(*r, *g, *b, *a),
        }
    }
}

impl From<ColorRecord> for Color {
    fn from(record: ColorRecord) -> Self {
        match record {
            ColorRecord::Named(name) => Self::Named(name),
            ColorRecord::Rgb(r, g, b) => Self::Rgb(r, g, b),
            ColorRecord::Rgba(r, g, b, a) => Self::Rgba(r, g, b, a),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RenderRecord {
    width: f64,
    height: f64,
    padding: f64,
    line_width: f64,
    stop_radius: f64,
    bus_label_font_size: u32,
    bus_label_offset: [f64; 2],
    stop_label_font_size: u32,
    stop_label_offset: [f64; 2],
    underlayer_color: ColorRecord,
    underlayer_width: f64,
    color_palette: Vec<ColorRecord>,
}

impl From<&RenderSettings> for RenderRecord {
    fn from(render: &RenderSettings) -> Self {
        Self {
            width: render.width,
            height: render.height,
            padding: render.padding,
            line_width: render.line_width,
            stop_radius: render.stop_radius,
            bus_label_font_size: render.bus_label_font_size,
            bus_label_offset: render.bus_label_offset,
            stop_label_font_size: render.stop_label_font_size,
            stop_label_offset: render.stop_label_offset,
            underlayer_color: ColorRecord::from(&render.underlayer_color),
            underlayer_width: render.underlayer_width,
            color_palette: render.color_palette.iter().map(ColorRecord::from).collect(),
        }
    }
}

impl From<RenderRecord> for RenderSettings {
    fn from(record: RenderRecord) -> Self {
        Self {
            width: record.width,
            height: record.height,
            padding: record.padding,
            line_width: record.line_width,
            stop_radius: record.stop_radius,
            bus_label_font_size: record.bus_label_font_size,
            bus_label_offset: record.bus_label_offset,
            stop_label_font_size: record.stop_label_font_size,
            stop_label_offset: record.stop_label_offset,
            underlayer_color: record.underlayer_color.into(),
            underlayer_width: record.underlayer_width,
            color_palette: record.color_palette.into_iter().map(Color::from).collect(),
        }
    }
}

/// Serializable image of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every interned stop name in id order, including distance-only names
    pub(crate) stop_names: Vec<String>,
    pub(crate) bus_names: Vec<String>,
    pub(crate) stops: Vec<StopRecord>,
    pub(crate) distances: Vec<DistanceRecord>,
    pub(crate) buses: Vec<BusRecord>,
    routing: RoutingSettings,
    render: RenderRecord,
}

/// A restored catalogue with the settings it was saved with.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalogue: Catalogue,
    pub routing: RoutingSettings,
    pub render: RenderSettings,
}

impl Dataset {
    /// Build a router over the restored catalogue.
    pub fn router(&self) -> Result<TransportRouter, RouterError> {
        TransportRouter::new(&self.catalogue, self.routing)
    }
}

impl Snapshot {
    /// Take a snapshot of a catalogue and its settings.
    pub fn capture(
        catalogue: &Catalogue,
        routing: &RoutingSettings,
        render: &RenderSettings,
    ) -> Self {
        let stop_names = catalogue
            .stop_names()
            .iter()
            .map(|(_, name)| name.to_string())
            .collect();
        let bus_names = catalogue
            .bus_names()
            .iter()
            .map(|(_, name)| name.to_string())
            .collect();

        let stops = catalogue
            .ordered_stops()
            .map(|stop| StopRecord {
                name: stop.id.0,
                coordinates: stop.coordinates,
                buses: stop.buses.iter().map(|bus| bus.0).collect(),
            })
            .collect();

        let mut distances: Vec<_> = catalogue
            .distance_table()
            .iter()
            .map(|(from, to, meters)| DistanceRecord {
                from: from.0,
                to: to.0,
                meters,
            })
            .collect();
        distances.sort_by_key(|record| (record.from, record.to));

        let buses = catalogue
            .ordered_buses()
            .map(|bus| BusRecord {
                name: bus.id.0,
                stops: bus.defining_stops().iter().map(|stop| stop.0).collect(),
                is_roundtrip: bus.is_roundtrip,
            })
            .collect();

        Self {
            stop_names,
            bus_names,
            stops,
            distances,
            buses,
            routing: *routing,
            render: RenderRecord::from(render),
        }
    }

    /// Write the header and records.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), PersistError> {
        writer
            .write_all(&MAGIC)
            .map_err(|e| PersistError::io("writing snapshot header", e))?;
        codec()
            .serialize_into(&mut writer, &FORMAT_VERSION)
            .map_err(PersistError::Encode)?;
        codec()
            .serialize_into(&mut writer, self)
            .map_err(PersistError::Encode)?;
        writer
            .flush()
            .map_err(|e| PersistError::io("flushing snapshot", e))
    }

    /// Read a snapshot written by [`write_to`](Self::write_to).
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, PersistError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                PersistError::Corrupt("file is shorter than the snapshot header".to_string())
            }
            _ => PersistError::io("reading snapshot header", e),
        })?;
        if magic != MAGIC {
            return Err(PersistError::Corrupt(
                "not a transit catalogue snapshot".to_string(),
            ));
        }

        let version: u32 = codec()
            .deserialize_from(&mut reader)
            .map_err(PersistError::Decode)?;
        if version != FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: version,
                expected: FORMAT_VERSION,
            });
        }

        codec().deserialize_from(reader).map_err(PersistError::Decode)
    }

    /// Write the snapshot to the configured file, replacing it.
    pub fn save(&self, settings: &SerializationSettings) -> Result<(), PersistError> {
        let path = &settings.file;
        let file = File::create(path).map_err(|e| {
            PersistError::io(format!("creating snapshot {}", path.display()), e)
        })?;
        self.write_to(BufWriter::new(file))?;

        debug!(
            path = %path.display(),
            stops = self.stops.len(),
            buses = self.buses.len(),
            distances = self.distances.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read the snapshot from the configured file.
    pub fn load(settings: &SerializationSettings) -> Result<Self, PersistError> {
        let path = &settings.file;
        let file = File::open(path).map_err(|e| {
            PersistError::io(format!("opening snapshot {}", path.display()), e)
        })?;
        let snapshot = Self::read_from(BufReader::new(file))?;

        debug!(
            path = %path.display(),
            stops = snapshot.stops.len(),
            buses = snapshot.buses.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Rebuild the catalogue and settings.
    ///
    /// Stops are added first, then every directed distance exactly as
    /// stored, then each bus from its defining stops. Bus statistics are
    /// recomputed by the catalogue build.
    pub fn restore(&self) -> Result<Dataset, PersistError> {
        let mut builder = CatalogueBuilder::new();

        for stop in &self.stops {
            let name = self.stop_name(stop.name)?;
            builder.add_stop(name, stop.coordinates);
        }

        for distance in &self.distances {
            let from = self.stop_name(distance.from)?;
            let to = self.stop_name(distance.to)?;
            builder.set_directed_distance(from, to, distance.meters);
        }

        for bus in &self.buses {
            let name = self.bus_name(bus.name)?;
            let stops = bus
                .stops
                .iter()
                .map(|&id| self.stop_name(id))
                .collect::<Result<Vec<_>, _>>()?;
            builder.add_bus(name, &stops, !bus.is_roundtrip)?;
        }

        let catalogue = builder.build()?;
        if catalogue.bus_count() != self.buses.len() {
            return Err(PersistError::Corrupt(format!(
                "{} bus records collapse into {} buses",
                self.buses.len(),
                catalogue.bus_count()
            )));
        }

        self.check_memberships(&catalogue)?;

        Ok(Dataset {
            catalogue,
            routing: self.routing,
            render: self.render.clone().into(),
        })
    }

    /// Stored memberships must match the ones the replayed buses produced.
    fn check_memberships(&self, catalogue: &Catalogue) -> Result<(), PersistError> {
        for stop in &self.stops {
            let name = self.stop_name(stop.name)?;
            let stored = stop
                .buses
                .iter()
                .map(|&id| self.bus_name(id))
                .collect::<Result<BTreeSet<_>, _>>()?;
            let rebuilt = catalogue.buses_by_stop(name).unwrap_or_default();
            if stored != rebuilt {
                return Err(PersistError::Corrupt(format!(
                    "stop {name} lists buses {stored:?} but its lines serve {rebuilt:?}"
                )));
            }
        }
        Ok(())
    }

    fn bus_name(&self, id: u32) -> Result<&str, PersistError> {
        self.bus_names
            .get(id as usize)
            .map(String::as_str)
            .ok_or_else(|| PersistError::Corrupt(format!("unknown bus name id {id}")))
    }

    fn stop_name(&self, id: u32) -> Result<&str, PersistError> {
        self.stop_names
            .get(id as usize)
            .map(String::as_str)
            .ok_or_else(|| PersistError::Corrupt(format!("unknown stop name id {id}")))
    }
}
