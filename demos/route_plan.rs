//! Shipping Route Validation
//!
//! This example drives the route validator: a chain of leg checks over
//! injected reference data, where each leg prices itself into the route
//! context and a failed leg means "no valid path".
//!
//! Run with: cargo run --example route_plan

use chrono::NaiveDate;
use gearshift::route::model::{AutoRate, City, Country, Port, ShipRate, Station, TrainRate};
use gearshift::route::{validate_route, ReferenceData, Route};
use std::sync::Arc;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

fn reference_data() -> Arc<ReferenceData> {
    let mut data = ReferenceData::default();

    data.map.add_country(Country {
        name: "russia".into(),
        commission: 0,
        disable: false,
        transit_delay: 0,
    });
    data.map.add_country(Country {
        name: "china".into(),
        commission: 20,
        disable: false,
        transit_delay: 0,
    });
    data.map.add_city(City {
        name: "shanghai".into(),
        commission: 4,
        disable: false,
        country_name: "china".into(),
        transit_delay: 0,
    });
    data.map.add_city(City {
        name: "vladivostok".into(),
        commission: 1,
        disable: false,
        country_name: "russia".into(),
        transit_delay: 0,
    });
    data.map.add_city(City {
        name: "krasnoyarsk".into(),
        commission: 2,
        disable: false,
        country_name: "russia".into(),
        transit_delay: 0,
    });
    data.map.add_city(City {
        name: "kazan".into(),
        commission: 3,
        disable: false,
        country_name: "russia".into(),
        transit_delay: 0,
    });
    data.map.add_port(Port {
        name: "shanghai".into(),
        commission: 11,
        disable: false,
        city_name: "shanghai".into(),
        transit_delay: 0,
    });
    data.map.add_port(Port {
        name: "vladivostok".into(),
        commission: 10,
        disable: false,
        city_name: "vladivostok".into(),
        transit_delay: 0,
    });
    data.map.add_station(Station {
        name: "krasnoyarsk".into(),
        commission: 10,
        disable: false,
        city_name: "krasnoyarsk".into(),
        transit_delay: 0,
    });

    data.rates.add_ship_rate(ShipRate {
        id: 1,
        start_date: date(1),
        expiration_date: date(10),
        shipping_days: 10,
        port_from: "shanghai".into(),
        port_to: "vladivostok".into(),
        cost: 3333,
        disable: false,
    });
    data.rates.add_train_rate(TrainRate {
        id: 1,
        start_date: date(10),
        expiration_date: date(20),
        shipping_days: 3,
        port_from: "vladivostok".into(),
        station_to: "krasnoyarsk".into(),
        cost: 4444,
        disable: false,
    });
    data.rates.add_auto_rate(AutoRate {
        id: 1,
        start_date: date(10),
        expiration_date: date(30),
        shipping_days: 2,
        city_from: "krasnoyarsk".into(),
        city_to: "kazan".into(),
        cost: 5555,
        disable: false,
    });

    Arc::new(data)
}

fn main() {
    println!("=== Shipping Route Validation ===\n");

    let data = reference_data();

    println!("Ship + train + auto, departing 2025-05-06:");
    let route = Route {
        date: Some(date(6)),
        port_from: Some("shanghai".into()),
        city_to: Some("kazan".into()),
        ship_id: Some(1),
        train_id: Some(1),
        auto_id: Some(1),
        ..Route::default()
    };
    match validate_route(route, &data) {
        Some(priced) => println!(
            "  valid: cost {}, transit days {}\n",
            priced.cost.unwrap(),
            priced.transit_days.unwrap()
        ),
        None => println!("  no valid path\n"),
    }

    println!("Same request departing 2025-05-20 (ship rate expired):");
    let route = Route {
        date: Some(date(20)),
        port_from: Some("shanghai".into()),
        city_to: Some("kazan".into()),
        ship_id: Some(1),
        train_id: Some(1),
        auto_id: Some(1),
        ..Route::default()
    };
    match validate_route(route, &data) {
        Some(priced) => println!(
            "  valid: cost {}, transit days {}\n",
            priced.cost.unwrap(),
            priced.transit_days.unwrap()
        ),
        None => println!("  no valid path\n"),
    }

    println!("=== Example Complete ===");
}
