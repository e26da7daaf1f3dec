/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “SatWatch” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

/// the simplified SGP4-class propagator: secular J2 precession of the mean elements, Kepler
/// solve, and perifocal -> ECI rotation. There are deliberately no drag terms and no
/// deep-space handling - this targets few-km ephemeris accuracy over hours to a few days,
/// which is what pass visibility prediction needs

use std::fmt;
use chrono::{DateTime, Utc};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use satwatch_common::{
    cartesian3::Cartesian3,
    cos, sin2, pow2,
    datetime::{de_from_epoch_millis, elapsed_minutes, ser_epoch_millis, MINUTES_PER_DAY},
    geo_constants::{EQUATORIAL_EARTH_RADIUS, J2_EARTH, MU_EARTH},
    TWO_PI,
};
use crate::{coords::{self, LookAngles}, kepler, tle::Tle, ObserverLocation};

/// propagator output: inertial position plus derived geodetic coordinates, and the
/// topocentric look angles iff an observer was supplied to the propagation call.
/// Immutable - produced fresh by every call, no identity beyond its numeric content
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SatellitePosition {
    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    pub time: DateTime<Utc>,

    pub eci: Cartesian3, // km

    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,

    #[serde(skip_serializing_if="Option::is_none", default)]
    pub look: Option<LookAngles>,
}

impl SatellitePosition {
    /// visible ⇔ we have look angles and the satellite is above the observer horizon
    pub fn is_visible (&self)->bool {
        match &self.look {
            Some(look) => look.elevation_deg > 0.0,
            None => false
        }
    }
}

impl fmt::Display for SatellitePosition {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SatellitePosition( time:{}, lat:{:.4} deg, lon:{:.4} deg, alt:{:.1} km",
            self.time, self.latitude_deg, self.longitude_deg, self.altitude_km)?;
        if let Some(look) = &self.look {
            write!(f, ", az:{:.1} deg, el:{:.1} deg, range:{:.1} km", look.azimuth_deg, look.elevation_deg, look.range_km)?;
        }
        write!(f, ")")
    }
}

/// propagate an element set to the target instant. Pure function of its inputs with no error
/// path - the element values were validated at parse time. Elapsed time may be negative
pub fn propagate (tle: &Tle, t: DateTime<Utc>, observer: Option<&ObserverLocation>)->SatellitePosition {
    let eci = propagate_eci( tle, &t);

    let geo = coords::eci_to_geodetic( &t, &eci);
    let look = observer.map( |obs| coords::look_angles( &t, &eci, obs));

    SatellitePosition {
        time: t,
        eci,
        latitude_deg: geo.latitude_deg(),
        longitude_deg: geo.longitude_deg(),
        altitude_km: geo.height,
        look
    }
}

/// the inertial-frame core of the propagator
pub fn propagate_eci (tle: &Tle, t: &DateTime<Utc>)->Cartesian3 {
    let dt_min = elapsed_minutes( t, &tle.epoch);

    let incl = tle.inclination_deg.to_radians();
    let ecc = tle.eccentricity;
    let n = tle.mean_motion * TWO_PI / MINUTES_PER_DAY; // rad/min

    // semi-major axis from Kepler's third law (n in rad/sec for km³/s² mu)
    let n_rad_sec = n / 60.0;
    let a = (MU_EARTH / (n_rad_sec * n_rad_sec)).cbrt();

    // secular J2 precession rates from the semi-latus rectum. Mean anomaly advances at the
    // unperturbed mean motion - no drag term
    let slr = a * (1.0 - ecc * ecc);
    let j2_rate = 1.5 * J2_EARTH * pow2( EQUATORIAL_EARTH_RADIUS / slr) * n; // rad/min
    let raan_rate = -j2_rate * cos(incl);
    let argp_rate = j2_rate * (2.0 - 2.5 * sin2(incl));

    let raan = tle.raan_deg.to_radians() + raan_rate * dt_min;
    let argp = tle.arg_perigee_deg.to_radians() + argp_rate * dt_min;
    let mean_anomaly = tle.mean_anomaly_deg.to_radians() + n * dt_min;

    let ecc_anomaly = kepler::eccentric_anomaly( mean_anomaly, ecc);
    let true_anomaly = kepler::true_anomaly( ecc_anomaly, ecc);
    let r = a * (1.0 - ecc * cos(ecc_anomaly));

    // in-plane position rotated through argument of latitude, inclination and RAAN
    let arg_latitude = argp + true_anomaly;
    let rot = Rotation3::from_axis_angle( &Vector3::z_axis(), raan)
            * Rotation3::from_axis_angle( &Vector3::x_axis(), incl)
            * Rotation3::from_axis_angle( &Vector3::z_axis(), arg_latitude);

    Cartesian3::from_vector3( &(rot * Vector3::new( r, 0.0, 0.0)))
}
