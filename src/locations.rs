//! Static registry of Nordic locations relevant for electricity price
//! forecasting
//!
//! Locations were chosen for their effect on the power system: major
//! population centers (demand), hydropower regions in northern Sweden and
//! Norway (supply), coastal wind power areas, energy-intensive industrial
//! towns, and the Finnish nuclear plants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nordic countries covered by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Sweden,
    Norway,
    Finland,
    Denmark,
}

impl Country {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Sweden => "Sweden",
            Country::Norway => "Norway",
            Country::Finland => "Finland",
            Country::Denmark => "Denmark",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic tag describing why a location matters for the power system.
/// Used only for output grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    MajorCity,
    City,
    HydroRegion,
    WindRegion,
    Industrial,
    Nuclear,
}

impl LocationCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::MajorCity => "major_city",
            LocationCategory::City => "city",
            LocationCategory::HydroRegion => "hydro_region",
            LocationCategory::WindRegion => "wind_region",
            LocationCategory::Industrial => "industrial",
            LocationCategory::Nuclear => "nuclear",
        }
    }
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named geographic point in the registry. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub category: LocationCategory,
    pub country: Country,
}

impl Location {
    fn new(name: &str, lat: f64, lon: f64, category: LocationCategory, country: Country) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
            category,
            country,
        }
    }
}

use LocationCategory::{City, HydroRegion, Industrial, MajorCity, Nuclear, WindRegion};

fn sweden() -> Vec<Location> {
    let c = Country::Sweden;
    vec![
        // Major cities and population centers (high electricity demand)
        Location::new("Stockholm", 59.3293, 18.0686, MajorCity, c),
        Location::new("Gothenburg", 57.7089, 11.9746, MajorCity, c),
        Location::new("Malmö", 55.6050, 13.0038, MajorCity, c),
        Location::new("Uppsala", 59.8586, 17.6389, City, c),
        Location::new("Västerås", 59.6099, 16.5448, City, c),
        Location::new("Örebro", 59.2753, 15.2134, City, c),
        Location::new("Linköping", 58.4108, 15.6214, City, c),
        Location::new("Helsingborg", 56.0465, 12.6945, City, c),
        Location::new("Jönköping", 57.7826, 14.1618, City, c),
        Location::new("Norrköping", 58.5877, 16.1924, City, c),
        // Northern Sweden hydropower regions
        Location::new("Luleå", 65.5848, 22.1547, HydroRegion, c),
        Location::new("Kiruna", 67.8558, 20.2253, HydroRegion, c),
        Location::new("Umeå", 63.8258, 20.2630, HydroRegion, c),
        Location::new("Sundsvall", 62.3908, 17.3069, HydroRegion, c),
        Location::new("Östersund", 63.1792, 14.6357, HydroRegion, c),
        Location::new("Gällivare", 67.1355, 20.6670, HydroRegion, c),
        // Wind power areas (coastal and southern Sweden)
        Location::new("Gotland (Visby)", 57.6348, 18.2948, WindRegion, c),
        Location::new("Öland (Borgholm)", 56.8797, 16.6564, WindRegion, c),
        Location::new("Halland (Varberg)", 57.1057, 12.2508, WindRegion, c),
        Location::new("Skåne (Kristianstad)", 56.0294, 14.1567, WindRegion, c),
        Location::new("Blekinge (Karlskrona)", 56.1612, 15.5869, WindRegion, c),
        // Industrial centers (energy-intensive industries)
        Location::new("Borlänge", 60.4858, 15.4371, Industrial, c),
        Location::new("Sandviken", 60.6160, 16.7709, Industrial, c),
        Location::new("Trollhättan", 58.2837, 12.2886, Industrial, c),
    ]
}

fn norway() -> Vec<Location> {
    let c = Country::Norway;
    vec![
        Location::new("Oslo", 59.9139, 10.7522, MajorCity, c),
        Location::new("Bergen", 60.3913, 5.3221, MajorCity, c),
        Location::new("Trondheim", 63.4305, 10.3951, MajorCity, c),
        Location::new("Stavanger", 58.9700, 5.7331, MajorCity, c),
        Location::new("Tromsø", 69.6492, 18.9553, HydroRegion, c),
        Location::new("Bodø", 67.2804, 14.4049, HydroRegion, c),
        Location::new("Ålesund", 62.4722, 6.1549, HydroRegion, c),
        Location::new("Kristiansand", 58.1599, 8.0182, HydroRegion, c),
    ]
}

fn finland() -> Vec<Location> {
    let c = Country::Finland;
    vec![
        Location::new("Helsinki", 60.1699, 24.9384, MajorCity, c),
        Location::new("Espoo", 60.2055, 24.6559, MajorCity, c),
        Location::new("Tampere", 61.4978, 23.7610, MajorCity, c),
        Location::new("Turku", 60.4518, 22.2666, MajorCity, c),
        Location::new("Oulu", 65.0121, 25.4651, MajorCity, c),
        // Nuclear power plants
        Location::new("Loviisa", 60.3681, 26.3581, Nuclear, c),
        Location::new("Eurajoki (Olkiluoto)", 61.2351, 21.4845, Nuclear, c),
        Location::new("Vaasa", 63.0960, 21.6158, WindRegion, c),
        Location::new("Lapland (Rovaniemi)", 66.5039, 25.7294, WindRegion, c),
    ]
}

fn denmark() -> Vec<Location> {
    let c = Country::Denmark;
    vec![
        Location::new("Copenhagen", 55.6761, 12.5683, MajorCity, c),
        Location::new("Aarhus", 56.1629, 10.2039, MajorCity, c),
        Location::new("Odense", 55.4038, 10.4024, MajorCity, c),
        Location::new("Aalborg", 57.0488, 9.9187, MajorCity, c),
        Location::new("Esbjerg", 55.4669, 8.4597, WindRegion, c),
        Location::new("Ringkøbing", 56.0905, 8.2440, WindRegion, c),
        Location::new("Bornholm (Rønne)", 55.1003, 14.7005, WindRegion, c),
    ]
}

/// Full registry grouped by country, in declaration order. Built once at
/// startup and never mutated.
#[must_use]
pub fn nordic_registry() -> Vec<(Country, Vec<Location>)> {
    vec![
        (Country::Sweden, sweden()),
        (Country::Norway, norway()),
        (Country::Finland, finland()),
        (Country::Denmark, denmark()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_country_order() {
        let registry = nordic_registry();
        let countries: Vec<Country> = registry.iter().map(|(country, _)| *country).collect();
        assert_eq!(
            countries,
            vec![
                Country::Sweden,
                Country::Norway,
                Country::Finland,
                Country::Denmark
            ]
        );
    }

    #[test]
    fn test_registry_size() {
        let registry = nordic_registry();
        let total: usize = registry.iter().map(|(_, locations)| locations.len()).sum();
        assert_eq!(total, 48);
    }

    #[test]
    fn test_locations_match_their_country() {
        for (country, locations) in nordic_registry() {
            for location in &locations {
                assert_eq!(location.country, country, "{}", location.name);
            }
        }
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&LocationCategory::MajorCity).unwrap();
        assert_eq!(json, "\"major_city\"");
        assert_eq!(LocationCategory::HydroRegion.as_str(), "hydro_region");
    }

    #[test]
    fn test_location_serialization_shape() {
        let location = Location::new("Stockholm", 59.3293, 18.0686, MajorCity, Country::Sweden);
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["name"], "Stockholm");
        assert_eq!(value["lat"], 59.3293);
        assert_eq!(value["lon"], 18.0686);
        assert_eq!(value["type"], "major_city");
        assert_eq!(value["country"], "Sweden");
    }

    #[test]
    fn test_nuclear_locations_are_finnish() {
        for (country, locations) in nordic_registry() {
            for location in locations {
                if location.category == LocationCategory::Nuclear {
                    assert_eq!(country, Country::Finland);
                }
            }
        }
    }
}
