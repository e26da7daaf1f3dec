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

/// common geodetic and gravitational constants that should be consistent through SatWatch.
/// all lengths are in kilometers since that is the working unit of the propagator

/// mean earth radius in km
pub const MEAN_EARTH_RADIUS: f64 = 6371.0;

/// WGS84 semi major axis in km
pub const EQUATORIAL_EARTH_RADIUS: f64 = 6378.137;

/// WGS84 semi minor axis in km
pub const POLAR_EARTH_RADIUS: f64 = 6356.7523142;

/// WGS84 flattening
pub const F_EARTH: f64 = 1.0 / 298.257223563;

/// first eccentricity of earth squared: f * (2 - f)
pub const E_EARTH_SQUARED: f64 = F_EARTH * (2.0 - F_EARTH);

/// b²/a² - squared ratio of minor/major axis ( == 1 - e²)
pub const EARTH_RADIUS_RATIO_SQUARED: f64 = 1.0 - E_EARTH_SQUARED;

/// earth gravitational parameter in km³/s²
pub const MU_EARTH: f64 = 398600.4418;

/// second zonal harmonic of the earth gravity field (oblateness)
pub const J2_EARTH: f64 = 1.08262668e-3;
