//! Reference-data catalogs the leg checks look rates and places up in.
//!
//! Plain keyed lookups, injected into the validator rather than reached
//! through process globals; condition closures capture an
//! `Arc<ReferenceData>`.

use crate::route::model::{AutoRate, City, Country, Port, ShipRate, Station, TrainRate};
use std::collections::HashMap;

/// Ship/train/auto rates keyed by id.
#[derive(Debug, Default)]
pub struct RateCatalog {
    ships: HashMap<u32, ShipRate>,
    trains: HashMap<u32, TrainRate>,
    autos: HashMap<u32, AutoRate>,
}

impl RateCatalog {
    pub fn add_ship_rate(&mut self, rate: ShipRate) {
        self.ships.insert(rate.id, rate);
    }

    pub fn add_train_rate(&mut self, rate: TrainRate) {
        self.trains.insert(rate.id, rate);
    }

    pub fn add_auto_rate(&mut self, rate: AutoRate) {
        self.autos.insert(rate.id, rate);
    }

    pub fn ship_rate(&self, id: u32) -> Option<&ShipRate> {
        self.ships.get(&id)
    }

    pub fn train_rate(&self, id: u32) -> Option<&TrainRate> {
        self.trains.get(&id)
    }

    pub fn auto_rate(&self, id: u32) -> Option<&AutoRate> {
        self.autos.get(&id)
    }
}

/// Countries, cities, ports, and stations keyed by name.
#[derive(Debug, Default)]
pub struct MapCatalog {
    countries: HashMap<String, Country>,
    cities: HashMap<String, City>,
    ports: HashMap<String, Port>,
    stations: HashMap<String, Station>,
}

impl MapCatalog {
    pub fn add_country(&mut self, country: Country) {
        self.countries.insert(country.name.clone(), country);
    }

    pub fn add_city(&mut self, city: City) {
        self.cities.insert(city.name.clone(), city);
    }

    pub fn add_port(&mut self, port: Port) {
        self.ports.insert(port.name.clone(), port);
    }

    pub fn add_station(&mut self, station: Station) {
        self.stations.insert(station.name.clone(), station);
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.get(name)
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }
}

/// Everything a leg check consults.
#[derive(Debug, Default)]
pub struct ReferenceData {
    pub rates: RateCatalog,
    pub map: MapCatalog,
}
