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

use satwatch_common::angle::{normalize_180, normalize_360, normalize_90, normalize_two_pi};
use satwatch_common::cartesian3::Cartesian3;
use satwatch_common::cartographic::Cartographic;
use satwatch_common::TWO_PI;

#[test]
fn test_angle_normalization () {
    assert_eq!( normalize_360(-10.0), 350.0);
    assert_eq!( normalize_360(370.0), 10.0);
    assert_eq!( normalize_360(0.0), 0.0);

    assert_eq!( normalize_180(190.0), -170.0);
    assert_eq!( normalize_180(-190.0), 170.0);

    assert_eq!( normalize_90(100.0), 80.0);
    assert_eq!( normalize_90(-100.0), -80.0);

    assert!( (normalize_two_pi(-0.5) - (TWO_PI - 0.5)).abs() < 1e-12);
    assert!( normalize_two_pi( TWO_PI + 0.25) - 0.25 < 1e-12);
}

fn assert_round_trip (lon_deg: f64, lat_deg: f64, height_km: f64) {
    let c0 = Cartographic::from_degrees( lon_deg, lat_deg, height_km);
    let p: Cartesian3 = (&c0).into();
    let c1: Cartographic = (&p).into();

    assert!( (c1.longitude_deg() - lon_deg).abs() < 1e-6, "longitude for ({lon_deg},{lat_deg},{height_km})");
    assert!( (c1.latitude_deg() - lat_deg).abs() < 1e-6, "latitude for ({lon_deg},{lat_deg},{height_km})");
    assert!( (c1.height - height_km).abs() < 1e-3, "height for ({lon_deg},{lat_deg},{height_km})");
}

#[test]
fn test_geodetic_ecef_round_trip () {
    assert_round_trip( -122.4194, 37.7749, 0.0);    // San Francisco, MSL
    assert_round_trip( 151.2093, -33.8688, 0.058);  // Sydney
    assert_round_trip( 0.0, 0.0, 400.0);            // equatorial orbit altitude
    assert_round_trip( -80.0, 89.9, 0.0);           // near the pole (altitude fallback path)
    assert_round_trip( 179.9, -51.64, 420.0);
}

#[test]
fn test_ecef_positions () {
    // equatorial point on the prime meridian sits at the semi major axis
    let p: Cartesian3 = (&Cartographic::from_degrees( 0.0, 0.0, 0.0)).into();
    assert!( (p.x - 6378.137).abs() < 1e-6);
    assert!( p.y.abs() < 1e-6);
    assert!( p.z.abs() < 1e-6);

    // north pole sits at the semi minor axis
    let p: Cartesian3 = (&Cartographic::from_degrees( 0.0, 90.0, 0.0)).into();
    assert!( p.equatorial_length() < 1e-6);
    assert!( (p.z - 6356.7523142).abs() < 1e-6);
}
