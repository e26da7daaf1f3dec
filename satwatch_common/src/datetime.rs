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
#![allow(unused)]

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error as DeError};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// the J2000.0 reference epoch (2000-01-01 12:00 TT, here taken as UTC - the sub-minute
/// TT/UTC offset is below the accuracy target of this propagator)
pub fn j2000 ()->DateTime<Utc> {
    DateTime::from_timestamp_millis( 946_728_000_000).unwrap() // 2000-01-01T12:00:00Z - can't fail
}

/// fractional days since the J2000.0 epoch (negative for earlier instants)
pub fn days_since_j2000 (t: &DateTime<Utc>)->f64 {
    (*t - j2000()).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// fractional minutes between two instants (negative if t < t0)
pub fn elapsed_minutes (t: &DateTime<Utc>, t0: &DateTime<Utc>)->f64 {
    (*t - *t0).num_milliseconds() as f64 / 60_000.0
}

/// render a TimeDelta as "minutes:seconds" (e.g. "6:42")
pub fn min_sec_string (td: &TimeDelta)->String {
    let secs = td.num_seconds();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn parse_datetime (s: &str)->Option<DateTime<Utc>> {
    match DateTime::parse_from_str(s, "%+") {
        Ok(dt) => Some(dt.to_utc()),
        Err(_) => None
    }
}

//--- support for serde

pub fn ser_epoch_millis<S: Serializer> (dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_i64(dt.timestamp_millis())
}

pub fn de_from_epoch_millis <'a,D>(deserializer: D) -> Result<DateTime<Utc>,D::Error> where D: Deserializer<'a> {
    let millis: i64 = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(millis).ok_or( DeError::custom("invalid timestamp value"))
}
