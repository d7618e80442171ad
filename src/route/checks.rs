//! Leg conditions for the route validator.
//!
//! Each check is a lookup-and-validate pass over the reference catalogs.
//! A missing or disabled entity, a validity window that does not contain
//! the leg's computed arrival date, or a join mismatch between legs fails
//! the check with a [`RouteError`]; on success the check settles the
//! leg's cost and transit days into the route before returning.

use crate::route::model::Route;
use crate::route::reference::ReferenceData;
use chrono::Duration;
use thiserror::Error;

/// Why a leg did not qualify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("a required rate or map entry is missing or disabled")]
    Unavailable,

    #[error("the rate validity window does not cover the leg date")]
    OutsideValidity,

    #[error("route legs do not join up")]
    Disconnected,
}

/// Validate the sea leg and settle its totals.
pub fn check_ship(data: &ReferenceData, route: &mut Route) -> Result<bool, RouteError> {
    let ship_rate = route
        .ship_id
        .and_then(|id| data.rates.ship_rate(id))
        .ok_or(RouteError::Unavailable)?;
    let port_from = route
        .port_from
        .as_deref()
        .and_then(|name| data.map.port(name))
        .ok_or(RouteError::Unavailable)?;
    if ship_rate.disable {
        return Err(RouteError::Unavailable);
    }

    let date = route.date.ok_or(RouteError::OutsideValidity)?;
    if ship_rate.start_date > date || ship_rate.expiration_date < date {
        return Err(RouteError::OutsideValidity);
    }

    let rate_port_from = data
        .map
        .port(&ship_rate.port_from)
        .ok_or(RouteError::Unavailable)?;
    let rate_port_to = data
        .map
        .port(&ship_rate.port_to)
        .ok_or(RouteError::Unavailable)?;
    if port_from.name != rate_port_from.name {
        return Err(RouteError::Disconnected);
    }
    if rate_port_from.disable || rate_port_to.disable {
        return Err(RouteError::Unavailable);
    }

    // Both city legs settle through the origin port's city.
    let city_from = data
        .map
        .city(&rate_port_from.city_name)
        .ok_or(RouteError::Unavailable)?;
    let city_to = data
        .map
        .city(&rate_port_from.city_name)
        .ok_or(RouteError::Unavailable)?;
    if city_from.disable || city_to.disable {
        return Err(RouteError::Unavailable);
    }

    let country_from = data
        .map
        .country(&city_from.country_name)
        .ok_or(RouteError::Unavailable)?;
    let country_to = data
        .map
        .country(&city_to.country_name)
        .ok_or(RouteError::Unavailable)?;
    if country_from.disable || country_to.disable {
        return Err(RouteError::Unavailable);
    }

    route.ship_transit_days = ship_rate.shipping_days
        + rate_port_from.transit_delay
        + rate_port_to.transit_delay
        + city_from.transit_delay
        + city_to.transit_delay
        + country_from.transit_delay
        + country_to.transit_delay;
    route.ship_cost = ship_rate.cost
        + rate_port_from.commission
        + rate_port_to.commission
        + city_from.commission
        + city_to.commission
        + country_from.commission
        + country_to.commission;
    Ok(true)
}

/// Validate the rail leg against the sea leg's arrival.
pub fn check_train(data: &ReferenceData, route: &mut Route) -> Result<bool, RouteError> {
    let ship_rate = route
        .ship_id
        .and_then(|id| data.rates.ship_rate(id))
        .ok_or(RouteError::Unavailable)?;
    let train_rate = route
        .train_id
        .and_then(|id| data.rates.train_rate(id))
        .ok_or(RouteError::Unavailable)?;
    if train_rate.disable {
        return Err(RouteError::Unavailable);
    }

    let date = route.date.ok_or(RouteError::OutsideValidity)?;
    let eta = date + Duration::days(route.ship_transit_days);
    if train_rate.start_date > eta || train_rate.expiration_date < eta {
        return Err(RouteError::OutsideValidity);
    }

    if ship_rate.port_to != train_rate.port_from {
        return Err(RouteError::Disconnected);
    }

    let station_to = data
        .map
        .station(&train_rate.station_to)
        .ok_or(RouteError::Unavailable)?;
    if station_to.disable {
        return Err(RouteError::Unavailable);
    }
    let city_to = data
        .map
        .city(&station_to.city_name)
        .ok_or(RouteError::Unavailable)?;
    if city_to.disable {
        return Err(RouteError::Unavailable);
    }

    // The rail leg settles into the sea-leg accumulators; downstream
    // arrival math and the final totals read them from there.
    route.ship_transit_days = train_rate.shipping_days + station_to.commission + city_to.commission;
    route.ship_cost = train_rate.cost + station_to.commission + city_to.commission;
    Ok(true)
}

/// Validate the road leg when it picks up from the rail station.
pub fn check_train_auto(data: &ReferenceData, route: &mut Route) -> Result<bool, RouteError> {
    let train_rate = route
        .train_id
        .and_then(|id| data.rates.train_rate(id))
        .ok_or(RouteError::Unavailable)?;
    let auto_rate = route
        .auto_id
        .and_then(|id| data.rates.auto_rate(id))
        .ok_or(RouteError::Unavailable)?;
    if auto_rate.disable {
        return Err(RouteError::Unavailable);
    }

    let date = route.date.ok_or(RouteError::OutsideValidity)?;
    let eta = date + Duration::days(route.ship_transit_days + route.train_transit_days);
    if auto_rate.start_date > eta || auto_rate.expiration_date < eta {
        return Err(RouteError::OutsideValidity);
    }

    let station_to = data
        .map
        .station(&train_rate.station_to)
        .ok_or(RouteError::Unavailable)?;
    if station_to.disable {
        return Err(RouteError::Unavailable);
    }

    if auto_rate.city_from != station_to.city_name {
        return Err(RouteError::Disconnected);
    }

    let city_to = data
        .map
        .city(&auto_rate.city_to)
        .ok_or(RouteError::Unavailable)?;
    if route.city_to.as_deref() != Some(city_to.name.as_str()) {
        return Err(RouteError::Disconnected);
    }
    if city_to.disable {
        return Err(RouteError::Unavailable);
    }

    route.auto_transit_days = auto_rate.shipping_days + city_to.transit_delay;
    route.auto_cost = auto_rate.cost + city_to.commission;
    Ok(true)
}

/// Validate the road leg when it picks up from the sea port.
pub fn check_ship_auto(data: &ReferenceData, route: &mut Route) -> Result<bool, RouteError> {
    let ship_rate = route
        .ship_id
        .and_then(|id| data.rates.ship_rate(id))
        .ok_or(RouteError::Unavailable)?;
    let auto_rate = route
        .auto_id
        .and_then(|id| data.rates.auto_rate(id))
        .ok_or(RouteError::Unavailable)?;
    if auto_rate.disable {
        return Err(RouteError::Unavailable);
    }

    let date = route.date.ok_or(RouteError::OutsideValidity)?;
    let eta = date + Duration::days(route.ship_transit_days);
    if auto_rate.start_date > eta || auto_rate.expiration_date < eta {
        return Err(RouteError::OutsideValidity);
    }

    let port_to = data
        .map
        .port(&ship_rate.port_to)
        .ok_or(RouteError::Unavailable)?;
    if port_to.disable {
        return Err(RouteError::Unavailable);
    }

    if auto_rate.city_from != port_to.city_name {
        return Err(RouteError::Disconnected);
    }

    let city_to = data
        .map
        .city(&auto_rate.city_to)
        .ok_or(RouteError::Unavailable)?;
    if route.city_to.as_deref() != Some(city_to.name.as_str()) {
        return Err(RouteError::Disconnected);
    }
    if city_to.disable {
        return Err(RouteError::Unavailable);
    }

    route.auto_transit_days = auto_rate.shipping_days + city_to.transit_delay;
    route.auto_cost = auto_rate.cost + city_to.commission;
    Ok(true)
}

/// Fold the per-leg accumulators into the final totals.
pub fn collect(route: &mut Route) -> Result<bool, RouteError> {
    route.cost = Some(route.ship_cost + route.train_cost + route.auto_cost);
    route.transit_days =
        Some(route.ship_transit_days + route.train_transit_days + route.auto_transit_days);
    Ok(true)
}
