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

use std::fs;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use satwatch_orbital::{
    datetime_from_spec,
    pass::{find_passes, PassConfig},
    tle::Tle,
    ObserverLocation,
};

#[derive(Parser)]
#[command(about="predict visible passes for given observer and TLE file")]
struct Args {
    #[arg(short, long, help="datetime spec for search start (if not specified use current datetime)")]
    date: Option<String>,

    #[arg(long, help="observer latitude in degrees", allow_hyphen_values=true)]
    lat: f64,

    #[arg(long, help="observer longitude in degrees", allow_hyphen_values=true)]
    lon: f64,

    #[arg(short, long, help="filename of pass search config (ron)")]
    config: Option<String>,

    #[arg(short, long, help="minimum peak elevation in degrees", default_value="10.0")]
    min_elevation: f64,

    #[arg(long, help="search horizon in hours", default_value="48.0")]
    hours: f64,

    #[arg(short='n', long, help="max number of passes to report per satellite", default_value="10")]
    max_passes: usize,

    #[arg(long, help="print passes as ron records")]
    ron: bool,

    #[arg(help="filename of TLE data")]
    tle_file: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let config: PassConfig = match &args.config {
        Some(path) => ron::from_str( &fs::read_to_string(path)?)?,
        None => PassConfig { min_elevation_deg: args.min_elevation, max_search_hours: args.hours }
    };

    let start: DateTime<Utc> = if let Some(ds) = &args.date { datetime_from_spec(ds)? } else { Utc::now() };
    let observer = ObserverLocation::new( args.lat, args.lon);

    let tles = Tle::from_file( &args.tle_file)?;
    for tle in &tles {
        let passes = find_passes( tle, &observer, start, &config, args.max_passes, None);
        if passes.is_empty() {
            println!("no pass for satellite {} within {} h.", tle.sat_id, config.max_search_hours);
            continue
        }

        for pass in &passes {
            if args.ron {
                println!("{}", ron::ser::to_string_pretty( pass, ron::ser::PrettyConfig::default().compact_structs(true))?);
            } else {
                println!("{pass}");
            }
        }
    }

    println!("ok.");
    Ok(())
}
