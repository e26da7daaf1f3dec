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

/// coordinate frame transforms: ECI -> ECEF/geodetic and ECI -> observer-relative
/// topocentric (south-east-zenith) look angles. The ECI/ECEF rotation angle is Greenwich
/// Mean Sidereal Time from the IAU-1982 polynomial - for the few-km accuracy target of this
/// propagator we do not model polar motion or nutation

use chrono::{DateTime, Utc};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use satwatch_common::{
    angle::{normalize_360, normalize_two_pi},
    asin, atan2, cartesian3::Cartesian3, cartographic::Cartographic, cos, sin,
    datetime::days_since_j2000,
    geo_constants::E_EARTH_SQUARED,
};
use crate::ObserverLocation;

/// observer-relative topocentric coordinates. These three are only meaningful together,
/// which is why SatellitePosition carries them as one optional group
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct LookAngles {
    pub azimuth_deg: f64,   // [0,360) clockwise from north
    pub elevation_deg: f64, // [-90,90] above local horizon
    pub range_km: f64,      // slant range observer -> satellite
}

/// Greenwich Mean Sidereal Time in radians [0,2π), IAU-1982 polynomial in Julian centuries
/// since J2000.0
pub fn gmst_rad (t: &DateTime<Utc>)->f64 {
    let d = days_since_j2000(t);
    let tc = d / 36525.0;

    let gmst_deg = 280.46061837
        + 360.98564736629 * d
        + 0.000387933 * tc * tc
        - tc * tc * tc / 38_710_000.0;

    normalize_360( gmst_deg).to_radians()
}

/// rotate an ECI vector by -GMST about the polar axis into the earth-fixed frame
pub fn eci_to_ecef (p: &Cartesian3, gmst: f64)->Cartesian3 {
    let rot = Rotation3::from_axis_angle( &Vector3::z_axis(), -gmst);
    Cartesian3::from_vector3( &(rot * p.to_vector3()))
}

pub fn eci_to_geodetic (t: &DateTime<Utc>, p_eci: &Cartesian3)->Cartographic {
    let p_ecef = eci_to_ecef( p_eci, gmst_rad(t));
    Cartographic::from( &p_ecef)
}

/// ECI position of a (mean sea level) observer at the given sidereal instant
pub fn observer_eci (observer: &ObserverLocation, gmst: f64)->Cartesian3 {
    let lat = observer.latitude_deg.to_radians();
    let lst = gmst + observer.longitude_deg.to_radians(); // local sidereal angle

    let n = Cartographic::radius_of_curvature( lat);

    Cartesian3::new(
        n * cos(lat) * cos(lst),
        n * cos(lat) * sin(lst),
        n * (1.0 - E_EARTH_SQUARED) * sin(lat)
    )
}

/// topocentric look angles for a satellite ECI position: form the range vector in the
/// inertial frame and rotate it into the observer's south-east-zenith basis
pub fn look_angles (t: &DateTime<Utc>, sat_eci: &Cartesian3, observer: &ObserverLocation)->LookAngles {
    let gmst = gmst_rad(t);
    let lat = observer.latitude_deg.to_radians();
    let lst = normalize_two_pi( gmst + observer.longitude_deg.to_radians());

    let rv = sat_eci - &observer_eci( observer, gmst);

    let south  =  sin(lat) * cos(lst) * rv.x + sin(lat) * sin(lst) * rv.y - cos(lat) * rv.z;
    let east   = -sin(lst) * rv.x + cos(lst) * rv.y;
    let zenith =  cos(lat) * cos(lst) * rv.x + cos(lat) * sin(lst) * rv.y + sin(lat) * rv.z;

    let range_km = rv.length();
    let elevation_deg = asin( zenith / range_km).to_degrees();
    let azimuth_deg = normalize_360( atan2( east, -south).to_degrees());

    LookAngles { azimuth_deg, elevation_deg, range_km }
}
