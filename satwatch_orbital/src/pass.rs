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

/// visible pass prediction: sample the propagator at fixed one-minute steps to find a
/// rise -> peak -> set cycle for an observer, refine the horizon crossings by bisection and
/// the peak by ternary search. The scan state is an explicit value threaded through the
/// sampling loop so that its transitions are testable in isolation

use std::fmt;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use satwatch_common::{
    datetime::{de_from_epoch_millis, min_sec_string, ser_epoch_millis},
    MinMaxAvg,
};
use crate::{coords::{self, LookAngles}, propagate::propagate_eci, tle::Tle, ObserverLocation};

const STEP_SECS: i64 = 60;             // fixed sampling step
const BISECTION_ITERATIONS: usize = 20; // horizon crossing refinement
const TERNARY_ITERATIONS: usize = 20;   // peak time refinement

/* #region configuration data **************************************************************************************/

/// pass search parameters, loadable from a ron config file
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
#[serde(default)]
pub struct PassConfig {
    pub min_elevation_deg: f64, // minimum peak elevation for a pass to qualify
    pub max_search_hours: f64,  // search horizon
}

impl Default for PassConfig {
    fn default ()->Self {
        PassConfig { min_elevation_deg: 10.0, max_search_hours: 48.0 }
    }
}

/* #endregion configuration data */

/// a complete rise -> peak -> set cycle of one satellite over one observer.
/// Immutable - produced once the set crossing is refined, never mutated
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SatellitePass {
    pub sat_id: String,
    pub sat_name: String,

    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    pub rise_time: DateTime<Utc>,

    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    pub peak_time: DateTime<Utc>,

    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    pub set_time: DateTime<Utc>,

    pub peak_elevation_deg: f64,
    pub rise_azimuth_deg: f64,
    pub set_azimuth_deg: f64,
}

impl SatellitePass {
    pub fn duration (&self)->TimeDelta {
        self.set_time - self.rise_time
    }

    /// "minutes:seconds" rendering of the pass duration
    pub fn duration_min_sec (&self)->String {
        min_sec_string( &self.duration())
    }
}

impl fmt::Display for SatellitePass {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SatellitePass( sat_id:{}, name:{:?}, rise:{}, dur:{}, peak el:{:.1} deg, rise az:{:.0} deg, set az:{:.0} deg)",
            self.sat_id, self.sat_name, self.rise_time, self.duration_min_sec(),
            self.peak_elevation_deg, self.rise_azimuth_deg, self.set_azimuth_deg)
    }
}

/* #region scan state machine *******************************************************************************************/

/// one sampled step - we keep the previous sample around to bracket horizon crossings
#[derive(Debug,Clone,Copy)]
struct Sample {
    time: DateTime<Utc>,
    elevation_deg: f64,
}

/// explicit scan state, transitioned once per sampled step
#[derive(Debug,Clone,Copy)]
enum ScanState {
    BelowHorizon,
    Tracking {
        rise_time: DateTime<Utc>,
        rise_azimuth_deg: f64,
        peak_time: DateTime<Utc>,
        peak_elevation_deg: f64,
    }
}

/// what a single transition produced besides the successor state
enum ScanEvent {
    None,
    Completed( SatellitePass ),
    Discarded,
}

fn transition (state: ScanState, prev: &Sample, sample: &Sample,
               tle: &Tle, observer: &ObserverLocation, min_elevation_deg: f64) -> (ScanState, ScanEvent) {
    match state {
        ScanState::BelowHorizon => {
            if sample.elevation_deg > 0.0 { // rise crossing between prev and sample
                let (rise_time, rise_azimuth_deg) = refine_crossing( tle, observer, prev, sample);
                debug!("rise at {} (az {:.0} deg)", rise_time, rise_azimuth_deg);

                let state = ScanState::Tracking {
                    rise_time, rise_azimuth_deg,
                    peak_time: sample.time,
                    peak_elevation_deg: sample.elevation_deg
                };
                (state, ScanEvent::None)

            } else {
                (ScanState::BelowHorizon, ScanEvent::None)
            }
        }

        ScanState::Tracking { rise_time, rise_azimuth_deg, peak_time, peak_elevation_deg } => {
            if sample.elevation_deg > 0.0 { // still up - track the running peak
                let state = if sample.elevation_deg > peak_elevation_deg {
                    ScanState::Tracking { rise_time, rise_azimuth_deg, peak_time: sample.time, peak_elevation_deg: sample.elevation_deg }
                } else {
                    ScanState::Tracking { rise_time, rise_azimuth_deg, peak_time, peak_elevation_deg }
                };
                (state, ScanEvent::None)

            } else { // set crossing between prev and sample
                let (set_time, set_azimuth_deg) = refine_crossing( tle, observer, prev, sample);
                let (peak_time, peak_elevation_deg) = refine_peak( tle, observer, &rise_time, &set_time);

                if peak_elevation_deg >= min_elevation_deg {
                    let pass = SatellitePass {
                        sat_id: tle.sat_id.to_string(),
                        sat_name: tle.name.clone(),
                        rise_time, peak_time, set_time,
                        peak_elevation_deg, rise_azimuth_deg, set_azimuth_deg,
                    };
                    (ScanState::BelowHorizon, ScanEvent::Completed(pass))
                } else {
                    debug!("discarding pass at {} with peak el {:.1} deg below threshold", rise_time, peak_elevation_deg);
                    (ScanState::BelowHorizon, ScanEvent::Discarded)
                }
            }
        }
    }
}

/* #endregion scan state machine */

/// find the next pass of the given satellite over the observer with a refined peak elevation
/// of at least `config.min_elevation_deg`, scanning up to `config.max_search_hours` from
/// `start` in one-minute steps. The optional cancellation predicate is polled once per
/// sampled step - a cancelled scan returns None, same as an exhausted one
pub fn find_next_pass (tle: &Tle, observer: &ObserverLocation, start: DateTime<Utc>,
                       config: &PassConfig, cancelled: Option<&dyn Fn()->bool>) -> Option<SatellitePass> {
    let step = TimeDelta::seconds( STEP_SECS);
    let max_steps = (config.max_search_hours * 60.0).ceil() as usize;

    //--- phase A: if we start inside a pass, back out of it so we don't report a truncated one
    let mut t = start;
    if look_at( tle, observer, &t).elevation_deg > 0.0 {
        let mut n_back = 0;
        loop {
            if n_back >= max_steps { // out of budget - fall back to the original start
                t = start;
                break
            }
            t = t - step;
            n_back += 1;
            if look_at( tle, observer, &t).elevation_deg <= 0.0 { break }
        }
    }

    //--- phase B: forward scan
    let mut el_stats = MinMaxAvg::new();
    let mut state = ScanState::BelowHorizon;
    let mut prev = Sample { time: t, elevation_deg: look_at( tle, observer, &t).elevation_deg };

    for _ in 0..max_steps {
        if let Some(cancelled) = cancelled {
            if cancelled() {
                debug!("pass search for {} cancelled at {}", tle.sat_id, prev.time);
                return None
            }
        }

        let t_sample = prev.time + step;
        let look = look_at( tle, observer, &t_sample);
        let sample = Sample { time: t_sample, elevation_deg: look.elevation_deg };
        el_stats.add( look.elevation_deg);

        let (next_state, event) = transition( state, &prev, &sample, tle, observer, config.min_elevation_deg);
        if let ScanEvent::Completed(pass) = event {
            debug!("found {} after scanning {} samples (el min/max {:.1}/{:.1} deg)",
                pass, el_stats.n, el_stats.min, el_stats.max);
            return Some(pass)
        }

        state = next_state;
        prev = sample;
    }

    None // horizon exhausted without a qualifying pass
}

/// enumerate up to `max_passes` qualifying passes within the search horizon, restarting the
/// scan one step after each set time
pub fn find_passes (tle: &Tle, observer: &ObserverLocation, start: DateTime<Utc>,
                    config: &PassConfig, max_passes: usize, cancelled: Option<&dyn Fn()->bool>) -> Vec<SatellitePass> {
    let end = start + TimeDelta::seconds( (config.max_search_hours * 3600.0) as i64);
    let mut passes: Vec<SatellitePass> = Vec::new();
    let mut t = start;

    while passes.len() < max_passes && t < end {
        let remaining_hours = (end - t).num_seconds() as f64 / 3600.0;
        let config = PassConfig { max_search_hours: remaining_hours, ..*config };

        match find_next_pass( tle, observer, t, &config, cancelled) {
            Some(pass) => {
                t = pass.set_time + TimeDelta::seconds( STEP_SECS);
                passes.push( pass);
            }
            None => break
        }
    }

    passes
}

/* #region refinement helpers *****************************************************************************************/

fn look_at (tle: &Tle, observer: &ObserverLocation, t: &DateTime<Utc>)->LookAngles {
    let eci = propagate_eci( tle, t);
    coords::look_angles( t, &eci, observer)
}

/// refine a horizon crossing bracketed by the two samples, by bisection on the elevation
/// sign. Returns the refined crossing time and the azimuth at that time
fn refine_crossing (tle: &Tle, observer: &ObserverLocation, s1: &Sample, s2: &Sample)->(DateTime<Utc>, f64) {
    let mut t_lo = s1.time;
    let mut t_hi = s2.time;
    let mut above_lo = s1.elevation_deg > 0.0;

    for _ in 0..BISECTION_ITERATIONS {
        let t_mid = t_lo + (t_hi - t_lo) / 2;
        let above_mid = look_at( tle, observer, &t_mid).elevation_deg > 0.0;

        if above_mid == above_lo {
            t_lo = t_mid;
        } else {
            t_hi = t_mid;
        }
    }

    let t = t_lo + (t_hi - t_lo) / 2;
    (t, look_at( tle, observer, &t).azimuth_deg)
}

/// refine the peak time within [t_rise,t_set] by ternary search over the (unimodal)
/// elevation profile. Returns the refined peak time and its elevation
fn refine_peak (tle: &Tle, observer: &ObserverLocation, t_rise: &DateTime<Utc>, t_set: &DateTime<Utc>)->(DateTime<Utc>, f64) {
    let mut t_lo = *t_rise;
    let mut t_hi = *t_set;

    for _ in 0..TERNARY_ITERATIONS {
        let third = (t_hi - t_lo) / 3;
        let t1 = t_lo + third;
        let t2 = t_hi - third;

        if look_at( tle, observer, &t1).elevation_deg < look_at( tle, observer, &t2).elevation_deg {
            t_lo = t1;
        } else {
            t_hi = t2;
        }
    }

    let t = t_lo + (t_hi - t_lo) / 2;
    (t, look_at( tle, observer, &t).elevation_deg)
}

/* #endregion refinement helpers */
