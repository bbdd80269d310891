//! Station registry: an immutable, index-addressed list of named stations.

use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use fnv::FnvHashMap;
use tracing::warn;

use crate::error::{RegistryError, RouteError};
use crate::geo::Coordinate;

pub type StationId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub name: String,
    pub coord: Coordinate,
}

/// Stations addressed by zero-based index. Never mutated after construction.
#[derive(Clone, Debug)]
pub struct StationRegistry {
    stations: Vec<Station>,
    // First index for each name; names are not required to be unique.
    by_name: FnvHashMap<String, StationId>,
}

const CHENNAI: [(&str, f64, f64); 20] = [
    ("Chennai Central", 13.0830, 80.2753),
    ("Chennai Egmore", 13.0832, 80.2658),
    ("Chennai Beach", 13.0733, 80.2783),
    ("Chennai Tambaram", 12.9276, 80.1116),
    ("Chennai Mambalam", 13.0392, 80.2201),
    ("Chennai Perambur", 13.1093, 80.2533),
    ("Chennai Kodambakkam", 13.0509, 80.2110),
    ("Chennai Fort", 13.0926, 80.2870),
    ("Chennai Park", 13.0742, 80.2654),
    ("Chennai Korukkupet", 13.1164, 80.2871),
    ("Chennai Royapuram", 13.1122, 80.2951),
    ("Chennai Nungambakkam", 13.0585, 80.2201),
    ("Chennai Chetpet", 13.0758, 80.2457),
    ("Chennai Vyasarpadi", 13.1183, 80.2595),
    ("Chennai Basin Bridge", 13.1087, 80.2703),
    ("Chennai Perambur Carriage Works", 13.1096, 80.2593),
    ("Chennai Ennore", 13.2144, 80.3273),
    ("Chennai Ambattur", 13.1127, 80.1646),
    ("Chennai Villivakkam", 13.1174, 80.2072),
    ("Chennai Pattaravakkam", 13.1402, 80.2479),
];

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Self {
        let mut by_name = FnvHashMap::default();
        for (idx, station) in stations.iter().enumerate() {
            if let Some(&first) = by_name.get(&station.name) {
                warn!(name = %station.name, first, duplicate = idx, "duplicate station name");
                continue;
            }
            by_name.insert(station.name.clone(), idx);
        }
        Self { stations, by_name }
    }

    /// The built-in suburban Chennai network.
    pub fn chennai() -> Self {
        Self::new(
            CHENNAI
                .iter()
                .map(|&(name, lat, lon)| Station {
                    name: name.to_owned(),
                    coord: Coordinate::new(lat, lon),
                })
                .collect(),
        )
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Reads `name,latitude,longitude` rows (with a header line).
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, RegistryError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut stations = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            if record.len() != 3 {
                return Err(RegistryError::BadRecord {
                    line,
                    message: format!("expected 3 fields, found {}", record.len()),
                });
            }
            let name = &record[0];
            if name.is_empty() {
                return Err(RegistryError::BadRecord {
                    line,
                    message: String::from("empty station name"),
                });
            }
            let parse = |field: &str, what: &str| {
                field.parse::<f64>().map_err(|e| RegistryError::BadRecord {
                    line,
                    message: format!("bad {what} {field:?}: {e}"),
                })
            };
            let lat = parse(&record[1], "latitude")?;
            let lon = parse(&record[2], "longitude")?;
            let coord = Coordinate::try_new(lat, lon)
                .ok_or(RegistryError::InvalidCoordinate { line, lat, lon })?;
            stations.push(Station {
                name: name.to_owned(),
                coord,
            });
        }

        if stations.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self::new(stations))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn check(&self, index: StationId) -> Result<StationId, RouteError> {
        if index < self.stations.len() {
            Ok(index)
        } else {
            Err(RouteError::InvalidIndex {
                index,
                count: self.stations.len(),
            })
        }
    }

    pub fn get(&self, index: StationId) -> Result<&Station, RouteError> {
        self.check(index).map(|i| &self.stations[i])
    }

    pub fn name(&self, index: StationId) -> Result<&str, RouteError> {
        self.get(index).map(|s| s.name.as_str())
    }

    pub fn coordinate(&self, index: StationId) -> Result<Coordinate, RouteError> {
        self.get(index).map(|s| s.coord)
    }

    pub fn find(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    /// Resolves a user-supplied station: a decimal index or an exact name.
    pub fn resolve(&self, query: &str) -> Result<StationId, RouteError> {
        let query = query.trim();
        match query.parse::<StationId>() {
            Ok(index) => self.check(index),
            Err(_) => self
                .find(query)
                .ok_or_else(|| RouteError::UnknownStation(query.to_owned())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StationId, &Station)> + '_ {
        self.stations.iter().enumerate()
    }

    /// Coordinates in index order, for the search loop.
    pub(crate) fn coordinates(&self) -> Vec<Coordinate> {
        self.stations.iter().map(|s| s.coord).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chennai_layout() {
        let registry = StationRegistry::chennai();
        assert_eq!(registry.len(), 20);
        assert_eq!(registry.name(0).unwrap(), "Chennai Central");
        assert_eq!(registry.name(3).unwrap(), "Chennai Tambaram");
        assert_eq!(registry.name(16).unwrap(), "Chennai Ennore");
        assert_eq!(registry.name(19).unwrap(), "Chennai Pattaravakkam");
        assert_eq!(
            registry.coordinate(1).unwrap(),
            Coordinate::new(13.0832, 80.2658)
        );
    }

    #[test]
    fn out_of_range() {
        let registry = StationRegistry::chennai();
        assert_eq!(
            registry.check(20),
            Err(RouteError::InvalidIndex {
                index: 20,
                count: 20
            })
        );
        assert!(registry.name(99).is_err());
        assert!(registry.coordinate(99).is_err());
    }

    #[test]
    fn resolve_index_or_name() {
        let registry = StationRegistry::chennai();
        assert_eq!(registry.resolve("5"), Ok(5));
        assert_eq!(registry.resolve(" Chennai Fort "), Ok(7));
        assert_eq!(
            registry.resolve("99"),
            Err(RouteError::InvalidIndex {
                index: 99,
                count: 20
            })
        );
        assert_eq!(
            registry.resolve("Chennai Airport"),
            Err(RouteError::UnknownStation("Chennai Airport".into()))
        );
        // Negative numbers are not indices; they fall through to a name lookup.
        assert!(matches!(
            registry.resolve("-1"),
            Err(RouteError::UnknownStation(_))
        ));
    }

    #[test]
    fn duplicate_names_keep_first() {
        let station = |name: &str, lat| Station {
            name: name.into(),
            coord: Coordinate::new(lat, 0.0),
        };
        let registry =
            StationRegistry::new(vec![station("A", 0.0), station("B", 1.0), station("A", 2.0)]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.find("A"), Some(0));
        assert_eq!(registry.name(2).unwrap(), "A");
    }

    #[test]
    fn csv_roundtrip() {
        let data = "name,latitude,longitude\n\
                    North, 13.2, 80.3\n\
                    South,12.9,80.1\n";
        let registry = StationRegistry::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("South"), Some(1));
        assert_eq!(registry.coordinate(0).unwrap(), Coordinate::new(13.2, 80.3));
    }

    #[test]
    fn csv_rejects_bad_rows() {
        let short = "name,latitude,longitude\nNorth,13.2\n";
        assert!(matches!(
            StationRegistry::from_csv_reader(short.as_bytes()),
            Err(RegistryError::BadRecord { line: 2, .. })
        ));

        let nan = "name,latitude,longitude\nNorth,abc,80.3\n";
        assert!(matches!(
            StationRegistry::from_csv_reader(nan.as_bytes()),
            Err(RegistryError::BadRecord { line: 2, .. })
        ));

        let range = "name,latitude,longitude\nOk,1,1\nPole,95,80.3\n";
        assert!(matches!(
            StationRegistry::from_csv_reader(range.as_bytes()),
            Err(RegistryError::InvalidCoordinate { line: 3, .. })
        ));

        let empty = "name,latitude,longitude\n";
        assert!(matches!(
            StationRegistry::from_csv_reader(empty.as_bytes()),
            Err(RegistryError::Empty)
        ));
    }
}
