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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use satwatch_common::datetime;

pub mod errors;
use errors::{op_failed, OrbitalError, Result};

pub mod tle;
pub mod kepler;
pub mod coords;
pub mod propagate;
pub mod pass;

/// where the observer stands, in geodetic degrees at mean sea level
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct ObserverLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl ObserverLocation {
    pub fn new (latitude_deg: f64, longitude_deg: f64)->Self {
        ObserverLocation { latitude_deg, longitude_deg }
    }
}

//--- general utility functions

pub fn datetime_from_spec (ds: &str) -> Result<DateTime<Utc>> {
    datetime::parse_datetime(ds).ok_or( op_failed!("invalid datetime spec {}", ds))
}
