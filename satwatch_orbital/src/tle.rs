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

use std::{fmt, fs, ops::Range, path::Path, str::FromStr, sync::LazyLock};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use satwatch_common::datetime::{de_from_epoch_millis, ser_epoch_millis, MINUTES_PER_DAY};
use crate::errors::{tle_error, OrbitalError, Result};

/// NORAD two line element sets - fixed column format, e.g.
/// ```text
/// ISS (ZARYA)
/// 1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
/// 2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
/// ```
/// both element lines are at least 69 chars. We do not verify line checksums - the source of
/// our TLE text (element set files written by the fetch layer) already did

pub const MIN_LINE_LEN: usize = 69;

/// regex to spot the start of an element set within free-form TLE text
pub static TLE_LINE1_RE: LazyLock<Regex> = LazyLock::new(||
    Regex::new( r"^1 +\d+").unwrap()
);

//--- fixed column field ranges (0-based, end exclusive)

const L1_SAT_ID: Range<usize> = 2..7;
const L1_EPOCH_YEAR: Range<usize> = 18..20;
const L1_EPOCH_DAY: Range<usize> = 20..32;

const L2_SAT_ID: Range<usize> = 2..7;
const L2_INCLINATION: Range<usize> = 8..16;
const L2_RAAN: Range<usize> = 17..25;
const L2_ECCENTRICITY: Range<usize> = 26..33;
const L2_ARG_PERIGEE: Range<usize> = 34..42;
const L2_MEAN_ANOMALY: Range<usize> = 43..51;
const L2_MEAN_MOTION: Range<usize> = 52..63;

/// a parsed two line element set. This is an immutable value - it is constructed once from
/// external text and never mutated. The raw lines are kept for round-trip and debugging
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Tle {
    pub name: String,
    pub sat_id: u32, // norad_cat_id

    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    pub epoch: DateTime<Utc>,

    pub inclination_deg: f64,
    pub raan_deg: f64,           // right ascension of ascending node
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion: f64,        // revolutions per day

    pub line1: String,
    pub line2: String,
}

impl Tle {

    /// parse an element set from its name and the two element lines.
    /// This fails if either line is shorter than MIN_LINE_LEN, is not pure ASCII (the fixed
    /// column ranges are byte offsets), does not start with its line number, or has
    /// non-numeric content in a numeric field. Name may be blank.
    /// A catalog number mismatch between the lines is tolerated (line 1 wins)
    pub fn new (name: &str, line1: &str, line2: &str)->Result<Tle> {
        if line1.len() < MIN_LINE_LEN { return Err( tle_error!("line 1 too short ({} chars)", line1.len())) }
        if line2.len() < MIN_LINE_LEN { return Err( tle_error!("line 2 too short ({} chars)", line2.len())) }
        if !line1.is_ascii() { return Err( tle_error!("line 1 contains non-ASCII chars")) }
        if !line2.is_ascii() { return Err( tle_error!("line 2 contains non-ASCII chars")) }
        if !line1.starts_with("1 ") { return Err( tle_error!("line 1 does not start with '1 '")) }
        if !line2.starts_with("2 ") { return Err( tle_error!("line 2 does not start with '2 '")) }

        let sat_id: u32 = parse_field( line1, L1_SAT_ID, "catalog number")?;
        let sat_id_2: u32 = parse_field( line2, L2_SAT_ID, "catalog number")?;
        if sat_id != sat_id_2 {
            debug!("catalog number mismatch between element lines: {} / {}", sat_id, sat_id_2);
        }

        let epoch_year: u32 = parse_field( line1, L1_EPOCH_YEAR, "epoch year")?;
        let epoch_day: f64 = parse_field( line1, L1_EPOCH_DAY, "epoch day")?;
        let epoch = epoch_from_fields( epoch_year, epoch_day)?;

        let inclination_deg: f64 = parse_field( line2, L2_INCLINATION, "inclination")?;
        let raan_deg: f64 = parse_field( line2, L2_RAAN, "RAAN")?;
        let arg_perigee_deg: f64 = parse_field( line2, L2_ARG_PERIGEE, "argument of perigee")?;
        let mean_anomaly_deg: f64 = parse_field( line2, L2_MEAN_ANOMALY, "mean anomaly")?;

        // eccentricity has an implied leading decimal point ("0006703" -> 0.0006703)
        let ecc_field = field( line2, L2_ECCENTRICITY);
        let eccentricity: f64 = format!("0.{ecc_field}").parse()
            .map_err(|_| tle_error!("invalid eccentricity field '{}'", ecc_field))?;

        let mean_motion: f64 = parse_field( line2, L2_MEAN_MOTION, "mean motion")?;
        if mean_motion <= 0.0 { return Err( tle_error!("non-positive mean motion {}", mean_motion)) }

        Ok( Tle {
            name: name.trim().to_string(),
            sat_id,
            epoch,
            inclination_deg, raan_deg, eccentricity, arg_perigee_deg, mean_anomaly_deg, mean_motion,
            line1: line1.to_string(),
            line2: line2.to_string(),
        })
    }

    /// mean orbit period in seconds, straight from the mean motion
    pub fn mean_rev_sec (&self)->f64 {
        (MINUTES_PER_DAY * 60.0) / self.mean_motion
    }

    /// parse all element sets from concatenated TLE text with 2-line or 3-line (named) records.
    /// Malformed records are skipped - this is the lenient bulk entry point for element files
    pub fn parse_tles (text: &str)->Vec<Tle> {
        let lines: Vec<&str> = text.lines().collect();
        let mut tles: Vec<Tle> = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            if TLE_LINE1_RE.is_match( lines[i]) && i+1 < lines.len() {
                let name = if i > 0 && !TLE_LINE1_RE.is_match( lines[i-1]) && !lines[i-1].starts_with("2 ") {
                    lines[i-1]
                } else { "" };

                if let Ok(tle) = Tle::new( name, lines[i], lines[i+1]) {
                    tles.push(tle);
                    i += 2;
                    continue
                }
            }
            i += 1;
        }

        tles
    }

    pub fn from_file (path: impl AsRef<Path>)->Result<Vec<Tle>> {
        let text = fs::read_to_string( path.as_ref())?;
        let tles = Self::parse_tles( &text);
        debug!("loaded {} element sets from {}", tles.len(), path.as_ref().display());

        if tles.is_empty() {
            Err( tle_error!("no element sets in {}", path.as_ref().display()))
        } else {
            Ok(tles)
        }
    }
}

/// two records are equal iff name and both raw lines match exactly
impl PartialEq for Tle {
    fn eq (&self, other: &Self) -> bool {
        self.name == other.name && self.line1 == other.line1 && self.line2 == other.line2
    }
}
impl Eq for Tle {}

impl fmt::Display for Tle {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tle( sat_id:{}, name:{:?}, epoch:{}, incl:{} deg, mean_motion:{} rev/day)",
            self.sat_id, self.name, self.epoch, self.inclination_deg, self.mean_motion)
    }
}

#[inline]
fn field (line: &str, range: Range<usize>)->&str {
    line[range].trim()
}

fn parse_field<T: FromStr> (line: &str, range: Range<usize>, what: &str)->Result<T> {
    let s = field( line, range);
    s.parse().map_err(|_| tle_error!("invalid {} field '{}'", what, s))
}

/// epoch from the NORAD two-digit year + fractional day-of-year convention:
/// years 57..99 are 1900s, 00..56 are 2000s, day 1.0 is Jan 1 00:00 UTC
fn epoch_from_fields (epoch_year: u32, epoch_day: f64)->Result<DateTime<Utc>> {
    let year = (if epoch_year >= 57 { 1900 + epoch_year } else { 2000 + epoch_year }) as i32;

    let jan1 = NaiveDate::from_ymd_opt( year, 1, 1)
        .ok_or( tle_error!("invalid epoch year {}", year))?
        .and_hms_opt(0, 0, 0).unwrap() // midnight can't fail
        .and_utc();

    let offset_millis = ((epoch_day - 1.0) * 86_400_000.0).round() as i64;
    Ok( jan1 + TimeDelta::milliseconds( offset_millis))
}
