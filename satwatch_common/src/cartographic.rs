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

/// cartographic (geodetic) coordinates.
/// Cartographic is an internal format based on radians, to efficiently interface with the
/// unit-less trigonometry of the coordinate transforms. Heights are km above the WGS84 ellipsoid

use crate::{abs, atan2, cos, sin, sqrt};
use crate::cartesian3::Cartesian3;
use crate::geo_constants::{E_EARTH_SQUARED, EARTH_RADIUS_RATIO_SQUARED, EQUATORIAL_EARTH_RADIUS};

const MAX_LATITUDE_ITERATIONS: usize = 10;
const LATITUDE_EPS: f64 = 1e-12; // convergence limit for latitude iteration in radians

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Cartographic {
    pub longitude: f64, // radians
    pub latitude: f64,  // radians
    pub height: f64     // km above ellipsoid
}

impl Cartographic {
    pub fn new (longitude: f64, latitude: f64, height: f64)->Self {
        Cartographic { longitude, latitude, height }
    }

    pub fn from_degrees (lon: f64, lat: f64, height: f64)->Self {
        Cartographic::new( lon.to_radians(), lat.to_radians(), height)
    }

    pub fn longitude_deg (&self)->f64 { self.longitude.to_degrees() }
    pub fn latitude_deg (&self)->f64 { self.latitude.to_degrees() }

    /// prime vertical radius of curvature at given geodetic latitude, in km
    pub fn radius_of_curvature (lat: f64)->f64 {
        EQUATORIAL_EARTH_RADIUS / sqrt( 1.0 - E_EARTH_SQUARED * sin(lat)*sin(lat))
    }
}

impl From<&Cartesian3> for Cartographic {

    /// convert cartesian ECEF coordinates to Cartographic using the fixed-point iteration
    /// lat ← atan2( z + e²·N·sin(lat), w). This converges to well below LATITUDE_EPS within
    /// a handful of iterations for anything outside the earth core
    fn from (p: &Cartesian3) -> Self {
        let w = p.equatorial_length();
        let z = p.z;

        let longitude = atan2( p.y, p.x);

        let mut latitude = atan2( z, w); // spherical seed
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let n = Cartographic::radius_of_curvature( latitude);
            let lat_next = atan2( z + E_EARTH_SQUARED * n * sin(latitude), w);
            let converged = abs(lat_next - latitude) < LATITUDE_EPS;
            latitude = lat_next;
            if converged { break }
        }

        let n = Cartographic::radius_of_curvature( latitude);
        let cos_lat = cos(latitude);
        let height = if abs(cos_lat) > 1e-10 {
            w / cos_lat - n
        } else { // near the poles w/cos(lat) blows up - use the z axis instead
            z / sin(latitude) - n * (1.0 - E_EARTH_SQUARED)
        };

        Cartographic::new( longitude, latitude, height)
    }
}

impl From<Cartesian3> for Cartographic {
    fn from (p: Cartesian3) -> Self {
        Cartographic::from(&p)
    }
}

/// convert WGS84 geodetic into ECEF coordinates
impl From<&Cartographic> for Cartesian3 {
    fn from (p: &Cartographic) -> Self {
        let φ = p.latitude;
        let λ = p.longitude;
        let h = p.height;

        let sin_φ = φ.sin();
        let cos_φ = φ.cos();

        let n = EQUATORIAL_EARTH_RADIUS / ( 1.0 - E_EARTH_SQUARED * (sin_φ * sin_φ)).sqrt();
        let c = (n + h) * cos_φ;

        let x = c * λ.cos();
        let y = c * λ.sin();
        let z = (EARTH_RADIUS_RATIO_SQUARED * n + h) * sin_φ;

        Cartesian3::new( x, y, z)
    }
}

impl From<Cartographic> for Cartesian3 {
    fn from (p: Cartographic) -> Self {
        Cartesian3::from(&p)
    }
}
