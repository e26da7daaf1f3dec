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

use satwatch_common::{angle::normalize_two_pi, atan2, cos, sin, sqrt};

const MAX_ITERATIONS: usize = 10;
const CONVERGENCE_EPS: f64 = 1e-12;

/// solve Kepler's equation M = E - e·sin(E) for the eccentric anomaly E (radians).
/// Newton-Raphson seeded with E₀ = M + e·sin(M), terminating once the update drops below
/// CONVERGENCE_EPS. This is total for e < 1 since the denominator 1 - e·cos(E) stays
/// bounded away from zero. Hyperbolic input (e >= 1) is out of domain and not guarded
pub fn eccentric_anomaly (mean_anomaly: f64, eccentricity: f64)->f64 {
    let m = normalize_two_pi( mean_anomaly);
    let mut e = m + eccentricity * sin(m);

    for _ in 0..MAX_ITERATIONS {
        let delta = (e - eccentricity * sin(e) - m) / (1.0 - eccentricity * cos(e));
        e -= delta;
        if delta.abs() < CONVERGENCE_EPS { break }
    }

    e
}

/// true anomaly from eccentric anomaly, via the quadrant-safe atan2 form
pub fn true_anomaly (ecc_anomaly: f64, eccentricity: f64)->f64 {
    atan2(
        sqrt(1.0 - eccentricity * eccentricity) * sin(ecc_anomaly),
        cos(ecc_anomaly) - eccentricity
    )
}
