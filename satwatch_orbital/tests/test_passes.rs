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
use satwatch_orbital::pass::{find_next_pass, find_passes, PassConfig, SatellitePass};
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

fn assert_pass_invariants (pass: &SatellitePass, config: &PassConfig) {
    assert!( pass.rise_time < pass.peak_time, "rise {} !< peak {}", pass.rise_time, pass.peak_time);
    assert!( pass.peak_time < pass.set_time, "peak {} !< set {}", pass.peak_time, pass.set_time);
    assert!( pass.peak_elevation_deg >= config.min_elevation_deg);

    assert!( pass.rise_azimuth_deg >= 0.0 && pass.rise_azimuth_deg < 360.0);
    assert!( pass.set_azimuth_deg >= 0.0 && pass.set_azimuth_deg < 360.0);
    assert!( pass.duration() > TimeDelta::zero());
}

#[test]
fn test_pass_above_horizon_within_horizon () {
    // an ISS class orbit rises over a mid-latitude observer several times a day, so a 48 h
    // scan with a zero threshold must produce a pass
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let pass = find_next_pass( &tle, &observer, tle.epoch, &config, None)
        .expect("no pass found in 48 h");

    assert_pass_invariants( &pass, &config);
    assert_eq!( pass.sat_id, "25544");
    assert_eq!( pass.sat_name, "ISS (ZARYA)");
}

#[test]
fn test_pass_with_elevation_threshold () {
    // with the 10 deg default the scan either finds nothing or a pass meeting all invariants
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig::default();

    if let Some(pass) = find_next_pass( &tle, &observer, tle.epoch, &config, None) {
        assert_pass_invariants( &pass, &config);
        assert!( pass.peak_elevation_deg >= 10.0);
    }
}

#[test]
fn test_refined_peak_dominates_samples () {
    // the ternary-refined peak elevation is an upper bound for every one-minute sample
    // taken between rise and set
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let pass = find_next_pass( &tle, &observer, tle.epoch, &config, None).unwrap();

    let mut t = pass.rise_time;
    while t < pass.set_time {
        let pos = propagate( &tle, t, Some(&observer));
        let el = pos.look.unwrap().elevation_deg;
        assert!( el <= pass.peak_elevation_deg + 1e-3, "sample el {el} at {t} above refined peak {}", pass.peak_elevation_deg);
        t += TimeDelta::minutes(1);
    }
}

#[test]
fn test_rise_and_set_near_horizon () {
    // bisection refines the crossings to sub-second accuracy, so elevation at the refined
    // instants has to be very close to zero
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let pass = find_next_pass( &tle, &observer, tle.epoch, &config, None).unwrap();

    let el_rise = propagate( &tle, pass.rise_time, Some(&observer)).look.unwrap().elevation_deg;
    let el_set = propagate( &tle, pass.set_time, Some(&observer)).look.unwrap().elevation_deg;
    assert!( el_rise.abs() < 0.1, "elevation at refined rise: {el_rise}");
    assert!( el_set.abs() < 0.1, "elevation at refined set: {el_set}");
}

#[test]
fn test_search_started_inside_pass () {
    // a search starting mid-pass backs out below the horizon first, so it reports the full
    // rise -> set cycle of the pass in progress instead of a truncated one
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let pass = find_next_pass( &tle, &observer, tle.epoch, &config, None).unwrap();
    let mid = find_next_pass( &tle, &observer, pass.peak_time, &config, None)
        .expect("no pass found starting at peak");

    assert!( mid.rise_time < pass.peak_time); // rise precedes the start instant
    assert!( (mid.rise_time - pass.rise_time).abs() < TimeDelta::seconds(2));
    assert!( (mid.set_time - pass.set_time).abs() < TimeDelta::seconds(2));
}

#[test]
fn test_cancellation_returns_no_pass () {
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let cancelled = || true;
    assert!( find_next_pass( &tle, &observer, tle.epoch, &config, Some(&cancelled)).is_none());
}

#[test]
fn test_exhausted_search_returns_no_pass () {
    // a zero-hour horizon means no samples, hence no pass - not an error
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 0.0 };

    assert!( find_next_pass( &tle, &observer, tle.epoch, &config, None).is_none());
}

#[test]
fn test_find_passes_enumeration () {
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let passes = find_passes( &tle, &observer, tle.epoch, &config, 100, None);
    assert!( !passes.is_empty());

    for pass in &passes {
        assert_pass_invariants( pass, &config);
    }

    // time ordered and non-overlapping
    for w in passes.windows(2) {
        assert!( w[0].set_time < w[1].rise_time);
    }
}

#[test]
fn test_find_passes_respects_limit () {
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let passes = find_passes( &tle, &observer, tle.epoch, &config, 2, None);
    assert!( passes.len() <= 2);
}

#[test]
fn test_pass_duration_rendering () {
    let tle = iss();
    let observer = san_francisco();
    let config = PassConfig { min_elevation_deg: 0.0, max_search_hours: 48.0 };

    let pass = find_next_pass( &tle, &observer, tle.epoch, &config, None).unwrap();
    let rendered = pass.duration_min_sec();

    let (min, sec) = rendered.split_once(':').unwrap();
    assert_eq!( min.parse::<i64>().unwrap(), pass.duration().num_seconds() / 60);
    assert_eq!( sec.parse::<i64>().unwrap(), pass.duration().num_seconds() % 60);
    assert_eq!( sec.len(), 2);
}
