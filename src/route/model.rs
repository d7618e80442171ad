//! Route context and reference-data records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The context threaded through the validator machine.
///
/// Request fields (`date`, `port_from`, `city_to`, the rate ids) are set
/// by the caller; the per-leg accumulators and the final totals are
/// filled in by the leg conditions as the machine advances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub date: Option<NaiveDate>,
    pub port_from: Option<String>,
    pub city_to: Option<String>,

    pub ship_id: Option<u32>,
    #[serde(default)]
    pub ship_cost: i64,
    #[serde(default)]
    pub ship_transit_days: i64,

    pub train_id: Option<u32>,
    #[serde(default)]
    pub train_cost: i64,
    #[serde(default)]
    pub train_transit_days: i64,

    pub auto_id: Option<u32>,
    #[serde(default)]
    pub auto_cost: i64,
    #[serde(default)]
    pub auto_transit_days: i64,

    pub cost: Option<i64>,
    pub transit_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub commission: i64,
    #[serde(default)]
    pub disable: bool,
    #[serde(default)]
    pub transit_delay: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub commission: i64,
    #[serde(default)]
    pub disable: bool,
    pub country_name: String,
    #[serde(default)]
    pub transit_delay: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub commission: i64,
    #[serde(default)]
    pub disable: bool,
    pub city_name: String,
    #[serde(default)]
    pub transit_delay: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub commission: i64,
    #[serde(default)]
    pub disable: bool,
    pub city_name: String,
    #[serde(default)]
    pub transit_delay: i64,
}

/// Sea leg pricing, valid within `[start_date, expiration_date]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRate {
    pub id: u32,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub shipping_days: i64,
    pub port_from: String,
    pub port_to: String,
    pub cost: i64,
    #[serde(default)]
    pub disable: bool,
}

/// Rail leg pricing from a port to a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRate {
    pub id: u32,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub shipping_days: i64,
    pub port_from: String,
    pub station_to: String,
    pub cost: i64,
    #[serde(default)]
    pub disable: bool,
}

/// Road leg pricing between cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRate {
    pub id: u32,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub shipping_days: i64,
    pub city_from: String,
    pub city_to: String,
    pub cost: i64,
    #[serde(default)]
    pub disable: bool,
}
