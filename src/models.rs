// ABOUTME: Response data transfer objects for the smart alarm HTTP API
// ABOUTME: Converts core AlarmPlan values into the JSON wire shape with dual-zone timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Wire models for API responses

use crate::formatters::DualTimestamp;
use serde::{Deserialize, Serialize};
use smart_alarm_core::{AlarmPlan, SleepStage, StageCounts};
use std::collections::BTreeMap;

/// Stage code to display label, keyed by the code rendered as a string
#[must_use]
pub fn stage_labels() -> BTreeMap<String, String> {
    SleepStage::ALL
        .iter()
        .map(|stage| (stage.code().to_string(), stage.label().to_owned()))
        .collect()
}

/// Successful `POST /alarm` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmResponse {
    /// Chosen wake target
    pub target: DualTimestamp,
    /// Stage codes, one per two seconds between the soft limit and the target
    pub data: Vec<u8>,
    /// Window and sequence summary
    pub metadata: AlarmMetadata,
}

/// Summary block accompanying the stage series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmMetadata {
    /// Earliest acceptable wake time
    pub soft_limit: DualTimestamp,
    /// Latest acceptable wake time
    pub hard_limit: DualTimestamp,
    /// Whole seconds from the soft limit to the target
    pub elapsed_seconds: i64,
    /// Length of `data`
    pub array_size: usize,
    /// Per-stage tallies of `data`
    pub stage_counts: StageCounts,
    /// Legend for the codes in `data`
    pub stage_labels: BTreeMap<String, String>,
}

impl From<&AlarmPlan> for AlarmResponse {
    fn from(plan: &AlarmPlan) -> Self {
        let sequence = plan.sequence();
        Self {
            target: DualTimestamp::from_utc(plan.target()),
            data: sequence.codes(),
            metadata: AlarmMetadata {
                soft_limit: DualTimestamp::from_utc(plan.interval().start()),
                hard_limit: DualTimestamp::from_utc(plan.interval().end()),
                elapsed_seconds: plan.elapsed_seconds(),
                array_size: sequence.len(),
                stage_counts: sequence.counts(),
                stage_labels: stage_labels(),
            },
        }
    }
}

/// One entry of the `GET /` endpoint catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// HTTP method
    pub method: String,
    /// Route path
    pub path: String,
    /// What the endpoint does
    pub description: String,
    /// Example request body, when the endpoint takes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// `GET /` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescription {
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// One-line summary of the API
    pub description: String,
    /// Available endpoints
    pub endpoints: Vec<EndpointInfo>,
    /// Legend for the stage codes returned by `POST /alarm`
    pub stage_labels: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use smart_alarm_core::{AlarmPlanner, ScriptedSource, TimeInterval};

    #[test]
    fn test_stage_labels_legend() {
        let labels = stage_labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels["0"], "Light Sleep");
        assert_eq!(labels["1"], "Deep Sleep");
        assert_eq!(labels["2"], "REM Sleep");
    }

    #[test]
    fn test_alarm_response_wire_shape() {
        let soft = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let hard = Utc.with_ymd_and_hms(2024, 1, 15, 6, 5, 0).unwrap();
        let interval = TimeInterval::new(soft, hard).unwrap();
        let plan = AlarmPlanner::default()
            .plan(interval, &mut ScriptedSource::constant(0.5))
            .unwrap();

        let value = serde_json::to_value(AlarmResponse::from(&plan)).unwrap();

        assert_eq!(value["target"]["utc"], "2024-01-15T06:02:30.000Z");
        assert_eq!(value["target"]["ist"], "2024-01-15T11:32:30.000+05:30");
        assert_eq!(value["data"].as_array().unwrap().len(), 75);
        assert_eq!(value["metadata"]["arraySize"], 75);
        assert_eq!(value["metadata"]["elapsedSeconds"], 150);
        assert_eq!(value["metadata"]["softLimit"]["utc"], "2024-01-15T06:00:00.000Z");
        assert_eq!(value["metadata"]["hardLimit"]["ist"], "2024-01-15T11:35:00.000+05:30");
        assert_eq!(value["metadata"]["stageLabels"]["2"], "REM Sleep");

        let counts = &value["metadata"]["stageCounts"];
        let total = counts["light"].as_u64().unwrap()
            + counts["deep"].as_u64().unwrap()
            + counts["rem"].as_u64().unwrap();
        assert_eq!(total, 75);
    }
}
