// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use serde_json::{Value, json};

/// A valid arrival-based job: 300 beds, 14-day stays, 5 arrival days,
/// January 1 to April 9, 2026.
pub fn reference_job() -> Value {
    json!({
        "id": 42,
        "operational_plan": {
            "sanatorium_id": 7,
            "sanatorium_name": "Pine Grove",
            "date_from": "2026-01-01",
            "date_to": "2026-04-09",
            "department": {
                "department_id": 3,
                "name": "Cardiology",
                "num_of_beds": 300
            }
        },
        "plan_type": { "code": 2 },
        "number_stay_days": { "count": 14 },
        "number_days_between_arrivals": 0,
        "non_arrival_days": [],
        "sanitary_days": 0,
        "number_arrival_days": 5
    })
}

/// Serializes a job to the raw bytes a worker receives.
pub fn job_bytes(job: &Value) -> Vec<u8> {
    serde_json::to_vec(job).unwrap()
}

/// Returns the reference job with one top-level field replaced.
pub fn job_with(field: &str, value: Value) -> Value {
    let mut job: Value = reference_job();
    job[field] = value;
    job
}
