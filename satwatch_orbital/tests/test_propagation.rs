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

use chrono::TimeDelta;
use satwatch_common::datetime::j2000;
use satwatch_orbital::coords::gmst_rad;
use satwatch_orbital::kepler::{eccentric_anomaly, true_anomaly};
use satwatch_orbital::propagate::propagate;
use satwatch_orbital::tle::Tle;
use satwatch_orbital::ObserverLocation;

const ISS_NAME: &str = "ISS (ZARYA)";
const ISS_L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
const ISS_L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

fn iss ()->Tle {
    Tle::new( ISS_NAME, ISS_L1, ISS_L2).unwrap()
}

fn san_francisco ()->ObserverLocation {
    ObserverLocation::new( 37.7749, -122.4194)
}

#[test]
fn test_kepler_convergence () {
    let eccentricities = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.99];

    for e in eccentricities {
        let mut m = 0.0;
        while m < std::f64::consts::TAU {
            let ea = eccentric_anomaly( m, e);
            let residual = (ea - e * ea.sin() - m).abs();
            assert!( residual < 1e-9, "residual {residual} for M={m}, e={e}");
            m += 0.3;
        }
    }
}

#[test]
fn test_kepler_circular_orbit () {
    // for e=0 the eccentric anomaly is the mean anomaly, exactly
    for m in [0.0, 0.5, 1.0, 2.0, 3.1, 4.7, 6.2] {
        assert_eq!( eccentric_anomaly( m, 0.0), m);
    }
}

#[test]
fn test_true_anomaly_quadrants () {
    // low eccentricity: true anomaly stays close to the eccentric anomaly in every quadrant
    for ea in [0.5, 1.5, 2.5, -2.5, -0.5] {
        let nu = true_anomaly( ea, 0.001);
        assert!( (nu - ea).abs() < 0.01, "nu={nu} for E={ea}");
    }
}

#[test]
fn test_gmst_at_j2000 () {
    // the IAU-1982 polynomial evaluates to its constant term at the reference epoch
    let gmst_deg = gmst_rad( &j2000()).to_degrees();
    assert!( (gmst_deg - 280.46061837).abs() < 1e-9);
}

#[test]
fn test_gmst_advances_with_sidereal_rate () {
    // one solar day advances GMST by ~0.9856 deg (the sidereal/solar offset)
    let t0 = j2000();
    let t1 = t0 + TimeDelta::days(1);
    let delta_deg = (gmst_rad(&t1) - gmst_rad(&t0)).to_degrees();
    assert!( (delta_deg - 0.98564736629).abs() < 1e-6);
}

#[test]
fn test_iss_position_at_epoch () {
    let tle = iss();
    let pos = propagate( &tle, tle.epoch, None);

    // ISS class orbit: ECI radius and geodetic altitude in LEO range
    let radius = pos.eci.length();
    assert!( radius > 6500.0 && radius < 7000.0, "radius {radius} km");
    assert!( pos.altitude_km > 350.0 && pos.altitude_km < 500.0, "altitude {} km", pos.altitude_km);

    // ground point stays within the inclination band
    assert!( pos.latitude_deg.abs() <= 51.7);
    assert!( pos.longitude_deg >= -180.0 && pos.longitude_deg <= 180.0);

    // no observer -> no look angles
    assert!( pos.look.is_none());
    assert!( !pos.is_visible());
}

#[test]
fn test_iss_altitude_over_a_day () {
    // the near-circular orbit stays in LEO band throughout a day of propagation
    let tle = iss();
    for i in 0..24 {
        let t = tle.epoch + TimeDelta::hours(i);
        let pos = propagate( &tle, t, None);
        assert!( pos.altitude_km > 300.0 && pos.altitude_km < 500.0, "altitude {} km at {t}", pos.altitude_km);
    }
}

#[test]
fn test_backward_propagation () {
    // elapsed time may be negative for past instants
    let tle = iss();
    let pos = propagate( &tle, tle.epoch - TimeDelta::hours(3), None);
    let radius = pos.eci.length();
    assert!( radius > 6500.0 && radius < 7000.0);
}

#[test]
fn test_look_angles_for_observer () {
    let tle = iss();
    let observer = san_francisco();

    for i in 0..12 {
        let t = tle.epoch + TimeDelta::minutes( i * 10);
        let pos = propagate( &tle, t, Some(&observer));

        let look = pos.look.expect("look angles missing with observer");
        assert!( look.azimuth_deg >= 0.0 && look.azimuth_deg < 360.0, "azimuth {}", look.azimuth_deg);
        assert!( look.elevation_deg >= -90.0 && look.elevation_deg <= 90.0, "elevation {}", look.elevation_deg);
        assert!( look.range_km > 0.0);

        // the visibility predicate mirrors the topocentric elevation
        assert_eq!( pos.is_visible(), look.elevation_deg > 0.0);
    }
}
