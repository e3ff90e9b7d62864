//! Datasets shared by tests.

use crate::catalogue::{Catalogue, CatalogueBuilder};
use crate::domain::Coordinates;

/// Stops, distances and buses 256, 750 and 828 of the reference dataset.
pub(crate) fn reference_builder() -> CatalogueBuilder {
    let mut builder = CatalogueBuilder::new();

    for (name, lat, lng) in [
        ("Tolstopaltsevo", 55.611087, 37.20829),
        ("Marushkino", 55.595884, 37.209755),
        ("Rasskazovka", 55.632761, 37.333324),
        ("Biryulyovo Zapadnoye", 55.574371, 37.6517),
        ("Biryusinka", 55.581065, 37.64839),
        ("Universam", 55.587655, 37.645687),
        ("Biryulyovo Tovarnaya", 55.592028, 37.653656),
        ("Biryulyovo Passazhirskaya", 55.580999, 37.659164),
        ("Rossoshanskaya ulitsa", 55.595579, 37.605757),
        ("Prazhskaya", 55.611678, 37.603831),
    ] {
        builder.add_stop(name, Coordinates::new(lat, lng));
    }

    builder.set_distances([
        ("Tolstopaltsevo", "Marushkino", 3900),
        ("Marushkino", "Rasskazovka", 9900),
        ("Marushkino", "Marushkino", 100),
        ("Rasskazovka", "Marushkino", 9500),
        ("Biryulyovo Zapadnoye", "Rossoshanskaya ulitsa", 7500),
        ("Biryulyovo Zapadnoye", "Biryusinka", 1800),
        ("Biryulyovo Zapadnoye", "Universam", 2400),
        ("Biryusinka", "Universam", 750),
        ("Universam", "Rossoshanskaya ulitsa", 5600),
        ("Universam", "Biryulyovo Tovarnaya", 900),
        ("Biryulyovo Tovarnaya", "Biryulyovo Passazhirskaya", 1300),
        ("Biryulyovo Passazhirskaya", "Biryulyovo Zapadnoye", 1200),
    ]);

    builder
        .add_bus(
            "256",
            &[
                "Biryulyovo Zapadnoye",
                "Biryusinka",
                "Universam",
                "Biryulyovo Tovarnaya",
                "Biryulyovo Passazhirskaya",
                "Biryulyovo Zapadnoye",
            ],
            false,
        )
        .unwrap();
    builder
        .add_bus(
            "750",
            &["Tolstopaltsevo", "Marushkino", "Marushkino", "Rasskazovka"],
            true,
        )
        .unwrap();
    builder
        .add_bus(
            "828",
            &[
                "Biryulyovo Zapadnoye",
                "Universam",
                "Rossoshanskaya ulitsa",
                "Biryulyovo Zapadnoye",
            ],
            false,
        )
        .unwrap();

    builder
}

pub(crate) fn reference_catalogue() -> Catalogue {
    reference_builder().build().unwrap()
}

/// A small network with round distances for routing tests.
///
/// At 60 km/h every 1000 m takes exactly one minute.
///
/// - bus 14, one-way: Airport - Bridge - Centre
/// - bus 27, one-way: Centre - Depot
/// - bus 99, round trip: East Gate > Farm > East Gate (disconnected)
/// - Quarry: no buses
pub(crate) fn routing_catalogue() -> Catalogue {
    let mut builder = CatalogueBuilder::new();

    for (name, lat, lng) in [
        ("Airport", 55.60, 37.60),
        ("Bridge", 55.61, 37.61),
        ("Centre", 55.62, 37.62),
        ("Depot", 55.63, 37.63),
        ("East Gate", 55.70, 37.70),
        ("Farm", 55.71, 37.71),
        ("Quarry", 55.80, 37.80),
    ] {
        builder.add_stop(name, Coordinates::new(lat, lng));
    }

    builder.set_distances([
        ("Airport", "Bridge", 1000),
        ("Bridge", "Centre", 2000),
        ("Centre", "Depot", 1000),
        ("East Gate", "Farm", 3000),
    ]);

    builder
        .add_bus("14", &["Airport", "Bridge", "Centre"], true)
        .unwrap();
    builder.add_bus("27", &["Centre", "Depot"], true).unwrap();
    builder
        .add_bus("99", &["East Gate", "Farm", "East Gate"], false)
        .unwrap();

    builder.build().unwrap()
}
