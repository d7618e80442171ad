//! The validator machine: a linear/fork chain over the leg checks.
//!
//! `Initial → CheckedShip → CheckedTrain → CheckedAuto → Valid`, with a
//! `CheckedShip → CheckedAuto` edge for routes without a rail leg. Each
//! edge is gated by the matching check in [`crate::route::checks`]; the
//! engine sees check failures as domain errors and leaves the machine in
//! the last good state.

use crate::builder::{BuildError, MachineBuilder};
use crate::machine::{Machine, MachineError};
use crate::route::checks::{check_ship, check_ship_auto, check_train, check_train_auto, collect};
use crate::route::model::Route;
use crate::route::reference::ReferenceData;
use crate::state_enum;
use std::sync::Arc;

state_enum! {
    pub enum RouteState {
        Initial,
        CheckedShip,
        CheckedTrain,
        CheckedAuto,
        Valid,
    }
}

/// Typed wrapper around the generic engine, exposing one method per edge.
pub struct RouteValidator {
    machine: Machine<RouteState, Route>,
}

impl RouteValidator {
    /// Build a validator owning `route` and consulting `data` from every
    /// leg condition.
    pub fn new(route: Route, data: Arc<ReferenceData>) -> Result<Self, BuildError> {
        let builder = MachineBuilder::new()
            .set_start_state(RouteState::Initial)
            .add_transition("checking_ship", RouteState::Initial, RouteState::CheckedShip)?
            .add_transition(
                "checking_train",
                RouteState::CheckedShip,
                RouteState::CheckedTrain,
            )?
            .add_transition(
                "train_checking_auto",
                RouteState::CheckedTrain,
                RouteState::CheckedAuto,
            )?
            .add_transition(
                "ship_checking_auto",
                RouteState::CheckedShip,
                RouteState::CheckedAuto,
            )?
            .add_transition("collect", RouteState::CheckedAuto, RouteState::Valid)?;

        let d = Arc::clone(&data);
        let builder = builder
            .set_transition_condition("checking_ship", move |route| Ok(check_ship(&d, route)?))?;
        let d = Arc::clone(&data);
        let builder = builder
            .set_transition_condition("checking_train", move |route| Ok(check_train(&d, route)?))?;
        let d = Arc::clone(&data);
        let builder = builder.set_transition_condition("train_checking_auto", move |route| {
            Ok(check_train_auto(&d, route)?)
        })?;
        let d = Arc::clone(&data);
        let builder = builder.set_transition_condition("ship_checking_auto", move |route| {
            Ok(check_ship_auto(&d, route)?)
        })?;
        let builder =
            builder.set_transition_condition("collect", move |route| Ok(collect(route)?))?;

        builder
            .set_context(route)
            .build_with(|machine| RouteValidator { machine })
    }

    pub fn checking_ship(&mut self) -> Result<(), MachineError> {
        self.machine.transition("checking_ship")
    }

    pub fn checking_train(&mut self) -> Result<(), MachineError> {
        self.machine.transition("checking_train")
    }

    pub fn train_checking_auto(&mut self) -> Result<(), MachineError> {
        self.machine.transition("train_checking_auto")
    }

    pub fn ship_checking_auto(&mut self) -> Result<(), MachineError> {
        self.machine.transition("ship_checking_auto")
    }

    pub fn collect(&mut self) -> Result<(), MachineError> {
        self.machine.transition("collect")
    }

    pub fn state(&self) -> &RouteState {
        self.machine.state()
    }

    pub fn route(&self) -> &Route {
        self.machine.context()
    }

    pub fn into_route(self) -> Route {
        self.machine.into_context()
    }
}

/// Run the full chain for one route.
///
/// A route with a `train_id` goes ship → train → auto; one without goes
/// ship → auto. Any failed leg means "no valid path": the priced route is
/// `None` rather than an error.
pub fn validate_route(route: Route, data: &Arc<ReferenceData>) -> Option<Route> {
    let mut validator = match RouteValidator::new(route, Arc::clone(data)) {
        Ok(validator) => validator,
        Err(_) => return None,
    };

    match drive(&mut validator) {
        Ok(()) => Some(validator.into_route()),
        Err(_) => None,
    }
}

fn drive(validator: &mut RouteValidator) -> Result<(), MachineError> {
    validator.checking_ship()?;
    if validator.route().train_id.is_some() {
        validator.checking_train()?;
        validator.train_checking_auto()?;
    } else {
        validator.ship_checking_auto()?;
    }
    validator.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::model::{AutoRate, City, Country, Port, ShipRate, Station, TrainRate};
    use chrono::NaiveDate;

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
        data.map.add_city(City {
            name: "closed".into(),
            commission: 0,
            disable: true,
            country_name: "russia".into(),
            transit_delay: 0,
        });
        data.map.add_city(City {
            name: "shanghai".into(),
            commission: 4,
            disable: false,
            country_name: "china".into(),
            transit_delay: 0,
        });

        data.map.add_port(Port {
            name: "vladivostok".into(),
            commission: 10,
            disable: false,
            city_name: "vladivostok".into(),
            transit_delay: 0,
        });
        data.map.add_port(Port {
            name: "shanghai".into(),
            commission: 11,
            disable: false,
            city_name: "shanghai".into(),
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
        data.rates.add_train_rate(TrainRate {
            id: 2,
            start_date: date(20),
            expiration_date: date(30),
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
        data.rates.add_auto_rate(AutoRate {
            id: 2,
            start_date: date(10),
            expiration_date: date(30),
            shipping_days: 2,
            city_from: "vladivostok".into(),
            city_to: "kazan".into(),
            cost: 5554,
            disable: false,
        });
        data.rates.add_auto_rate(AutoRate {
            id: 3,
            start_date: date(10),
            expiration_date: date(30),
            shipping_days: 2,
            city_from: "vladivostok".into(),
            city_to: "closed".into(),
            cost: 5558,
            disable: false,
        });

        Arc::new(data)
    }

    #[test]
    fn ship_train_auto_chain_prices_the_route() {
        let data = reference_data();
        let route = Route {
            date: Some(date(6)),
            port_from: Some("shanghai".into()),
            city_to: Some("kazan".into()),
            ship_id: Some(1),
            train_id: Some(1),
            auto_id: Some(1),
            ..Route::default()
        };

        let result = validate_route(route, &data).unwrap();
        assert_eq!(result.cost, Some(10014));
        assert_eq!(result.transit_days, Some(17));
    }

    #[test]
    fn ship_auto_chain_prices_the_route() {
        let data = reference_data();
        let route = Route {
            date: Some(date(5)),
            port_from: Some("shanghai".into()),
            city_to: Some("kazan".into()),
            ship_id: Some(1),
            auto_id: Some(2),
            ..Route::default()
        };

        let result = validate_route(route, &data).unwrap();
        assert_eq!(result.cost, Some(8959));
        assert_eq!(result.transit_days, Some(12));
    }

    #[test]
    fn auto_leg_not_reachable_from_port_yields_no_route() {
        let data = reference_data();
        // auto rate 1 departs from krasnoyarsk, but without a train leg the
        // cargo is still in vladivostok.
        let route = Route {
            date: Some(date(5)),
            port_from: Some("shanghai".into()),
            city_to: Some("kazan".into()),
            ship_id: Some(1),
            auto_id: Some(1),
            ..Route::default()
        };

        assert!(validate_route(route, &data).is_none());
    }

    #[test]
    fn auto_leg_not_reachable_from_station_yields_no_route() {
        let data = reference_data();
        let route = Route {
            date: Some(date(5)),
            port_from: Some("shanghai".into()),
            city_to: Some("kazan".into()),
            ship_id: Some(1),
            train_id: Some(1),
            auto_id: Some(2),
            ..Route::default()
        };

        assert!(validate_route(route, &data).is_none());
    }

    #[test]
    fn disabled_destination_city_yields_no_route() {
        let data = reference_data();
        let route = Route {
            date: Some(date(5)),
            port_from: Some("shanghai".into()),
            city_to: Some("closed".into()),
            ship_id: Some(1),
            train_id: Some(1),
            auto_id: Some(3),
            ..Route::default()
        };

        assert!(validate_route(route, &data).is_none());
    }

    #[test]
    fn out_of_window_train_rate_yields_no_route() {
        let data = reference_data();
        let route = Route {
            date: Some(date(5)),
            port_from: Some("shanghai".into()),
            city_to: Some("closed".into()),
            ship_id: Some(1),
            train_id: Some(2),
            auto_id: Some(1),
            ..Route::default()
        };

        assert!(validate_route(route, &data).is_none());
    }

    #[test]
    fn failed_leg_leaves_machine_in_last_good_state() {
        let data = reference_data();
        let route = Route {
            date: Some(date(5)),
            port_from: Some("shanghai".into()),
            city_to: Some("kazan".into()),
            ship_id: Some(1),
            train_id: Some(2),
            auto_id: Some(1),
            ..Route::default()
        };

        let mut validator = RouteValidator::new(route, Arc::clone(&data)).unwrap();
        validator.checking_ship().unwrap();
        assert_eq!(validator.state(), &RouteState::CheckedShip);

        // Train rate 2 opens on the 20th; the ship arrives on the 15th.
        assert!(validator.checking_train().is_err());
        assert_eq!(validator.state(), &RouteState::CheckedShip);
    }
}
