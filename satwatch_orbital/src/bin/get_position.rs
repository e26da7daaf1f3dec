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

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use satwatch_orbital::{datetime_from_spec, propagate::propagate, tle::Tle, ObserverLocation};

#[derive(Parser)]
#[command(about="propagate satellite positions from a TLE file")]
struct Args {
    #[arg(short, long, help="datetime spec (if not specified use current datetime)")]
    date: Option<String>,

    #[arg(long, help="observer latitude in degrees", requires="lon", allow_hyphen_values=true)]
    lat: Option<f64>,

    #[arg(long, help="observer longitude in degrees", requires="lat", allow_hyphen_values=true)]
    lon: Option<f64>,

    #[arg(short, long, help="print positions as JSON instead of plain text")]
    json: bool,

    #[arg(help="filename of TLE data")]
    tle_file: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let t: DateTime<Utc> = if let Some(ds) = &args.date { datetime_from_spec(ds)? } else { Utc::now() };
    let observer = args.lat.zip( args.lon).map( |(lat,lon)| ObserverLocation::new( lat, lon));

    let tles = Tle::from_file( &args.tle_file)?;
    for tle in &tles {
        let pos = propagate( tle, t, observer.as_ref());

        if args.json {
            println!("{}", serde_json::to_string_pretty( &pos)?);
        } else {
            println!("{}", tle);
            println!("    {}", pos);
            if observer.is_some() {
                println!("    visible: {}", pos.is_visible());
            }
        }
    }

    Ok(())
}
