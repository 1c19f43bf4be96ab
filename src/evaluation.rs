//! Evaluation Models
//!
//! Wire types for the evaluation backend. Field names are camelCase on the
//! wire; entry times are ISO-8601 local date-times without offset.
//!
//! The backend grades each of three subsystems on a five-level scale:
//!
//! | Subsystem     | Code | Page      |
//! |---------------|------|-----------|
//! | Collaborative | `x`  | synergy   |
//! | Resource      | `z`  | resource  |
//! | Service       | `f`  | service   |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::routes::Page;

/// Wire format for entry times and date-range query parameters
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Read `null` as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One of the three evaluated subsystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Collaborative,
    Resource,
    Service,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [
        Subsystem::Collaborative,
        Subsystem::Resource,
        Subsystem::Service,
    ];

    /// Column prefix used by the backend for this subsystem's indicators
    pub fn code(&self) -> &'static str {
        match self {
            Subsystem::Collaborative => "x",
            Subsystem::Resource => "z",
            Subsystem::Service => "f",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subsystem::Collaborative => "协同",
            Subsystem::Resource => "资源",
            Subsystem::Service => "服务",
        }
    }

    /// The overview page dedicated to this subsystem
    pub fn page(&self) -> Page {
        match self {
            Subsystem::Collaborative => Page::Synergy,
            Subsystem::Resource => Page::Resource,
            Subsystem::Service => Page::Service,
        }
    }

    /// The subsystem an overview page shows, if any
    pub fn for_page(page: Page) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.page() == page)
    }
}

/// Five-level evaluation grade, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Poor,
        Grade::BelowAverage,
        Grade::Average,
        Grade::Good,
        Grade::Excellent,
    ];

    /// Label used by the backend
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Poor => "差",
            Grade::BelowAverage => "较差",
            Grade::Average => "中等",
            Grade::Good => "良好",
            Grade::Excellent => "优秀",
        }
    }

    /// 1 (poor) to 5 (excellent), for charting
    pub fn score(&self) -> u8 {
        *self as u8 + 1
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown grade: {0}")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

/// Latest overall grade of each subsystem (`GET /overall`)
///
/// A backend without records answers with `null` grades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallEvaluation {
    #[serde(default)]
    pub collaborative_system_evaluation: Option<String>,
    #[serde(default)]
    pub resource_system_evaluation: Option<String>,
    #[serde(default)]
    pub service_system_evaluation: Option<String>,
}

impl OverallEvaluation {
    /// Grade label, empty when the backend has none
    pub fn evaluation(&self, subsystem: Subsystem) -> &str {
        let value = match subsystem {
            Subsystem::Collaborative => &self.collaborative_system_evaluation,
            Subsystem::Resource => &self.resource_system_evaluation,
            Subsystem::Service => &self.service_system_evaluation,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn grade(&self, subsystem: Subsystem) -> Option<Grade> {
        self.evaluation(subsystem).parse().ok()
    }
}

/// One historic overall evaluation (`GET /overall-trend`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallEvaluationTrend {
    pub entry_time: NaiveDateTime,
    #[serde(flatten)]
    pub evaluation: OverallEvaluation,
}

/// Indicator → grade maps per subsystem (`GET /radar`)
///
/// Both a whole map and a single grade may be `null` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarChartData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaborative_system: BTreeMap<String, Option<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_system: BTreeMap<String, Option<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_system: BTreeMap<String, Option<String>>,
}

impl RadarChartData {
    pub fn for_subsystem(&self, subsystem: Subsystem) -> &BTreeMap<String, Option<String>> {
        match subsystem {
            Subsystem::Collaborative => &self.collaborative_system,
            Subsystem::Resource => &self.resource_system,
            Subsystem::Service => &self.service_system,
        }
    }

    /// Indicator scores for charting; unparseable grades are skipped
    pub fn scores(&self, subsystem: Subsystem) -> Vec<(String, u8)> {
        self.for_subsystem(subsystem)
            .iter()
            .filter_map(|(name, grade)| {
                grade
                    .as_deref()?
                    .parse::<Grade>()
                    .ok()
                    .map(|g| (name.clone(), g.score()))
            })
            .collect()
    }
}

/// One historic radar snapshot (`GET /radar-trend`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarTrendData {
    pub entry_time: NaiveDateTime,
    #[serde(flatten)]
    pub radar: RadarChartData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorInfo {
    pub indicator_name: String,
    pub indicator_level: String,
}

/// Worst-graded indicators per subsystem (`GET /bottom-indicators`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottomIndicators {
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaborative: Vec<IndicatorInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource: Vec<IndicatorInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: Vec<IndicatorInfo>,
}

impl BottomIndicators {
    pub fn for_subsystem(&self, subsystem: Subsystem) -> &[IndicatorInfo] {
        match subsystem {
            Subsystem::Collaborative => &self.collaborative,
            Subsystem::Resource => &self.resource,
            Subsystem::Service => &self.service,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorValue {
    pub indicator_name: String,
    pub indicator_level: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Indicator values of one record (`GET /indicator-trends`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorTrendPoint {
    pub entry_time: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaborative: Vec<IndicatorValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource: Vec<IndicatorValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: Vec<IndicatorValue>,
}

impl IndicatorTrendPoint {
    pub fn for_subsystem(&self, subsystem: Subsystem) -> &[IndicatorValue] {
        match subsystem {
            Subsystem::Collaborative => &self.collaborative,
            Subsystem::Resource => &self.resource,
            Subsystem::Service => &self.service,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeRecord {
    pub id: i64,
    pub entry_time: NaiveDateTime,
}

/// Records inside a date range (`GET /by-date-range`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeResult {
    pub total_count: u64,
    #[serde(default)]
    pub records: Vec<DateRangeRecord>,
}

/// A stored evaluation record
///
/// Indicator columns are kept in an open map so that columns this crate
/// does not know about survive a read-modify-write cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub indicators: BTreeMap<String, serde_json::Value>,
}

impl TrainingData {
    /// Builder method: set an indicator column
    pub fn indicator(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.indicators.insert(name.into(), value.into());
        self
    }

    /// Overall grade column of a subsystem (`x`, `z` or `f`)
    pub fn overall_grade(&self, subsystem: Subsystem) -> Option<Grade> {
        self.indicators
            .get(subsystem.code())
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }

    /// Copy without server-assigned fields, as sent on create and update
    pub fn for_submission(&self) -> Self {
        Self {
            id: None,
            user_id: self.user_id,
            entry_time: None,
            indicators: self.indicators.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grade_order_and_labels() {
        assert!(Grade::Poor < Grade::Excellent);
        assert_eq!("良好".parse::<Grade>(), Ok(Grade::Good));
        assert_eq!(Grade::Excellent.score(), 5);
        assert_eq!(Grade::Poor.score(), 1);
        assert!("很好".parse::<Grade>().is_err());
    }

    #[test]
    fn test_subsystem_pages() {
        assert_eq!(Subsystem::for_page(Page::Synergy), Some(Subsystem::Collaborative));
        assert_eq!(Subsystem::for_page(Page::Resource), Some(Subsystem::Resource));
        assert_eq!(Subsystem::for_page(Page::Login), None);
    }

    #[test]
    fn test_overall_trend_from_backend_json() {
        let value = json!({
            "entryTime": "2024-05-01T08:30:00",
            "collaborativeSystemEvaluation": "良好",
            "resourceSystemEvaluation": "中等",
            "serviceSystemEvaluation": "优秀"
        });
        let trend: OverallEvaluationTrend = serde_json::from_value(value).unwrap();

        assert_eq!(
            trend.entry_time.format(DATETIME_FORMAT).to_string(),
            "2024-05-01T08:30:00"
        );
        assert_eq!(trend.evaluation.grade(Subsystem::Service), Some(Grade::Excellent));
        assert_eq!(trend.evaluation.grade(Subsystem::Resource), Some(Grade::Average));
    }

    #[test]
    fn test_radar_scores_skip_unknown_grades() {
        let radar: RadarChartData = serde_json::from_value(json!({
            "collaborativeSystem": {"X_V": "良好", "X_O": "差", "X_R": "?"}
        }))
        .unwrap();

        let scores = radar.scores(Subsystem::Collaborative);
        assert_eq!(scores, vec![("X_O".to_string(), 1), ("X_V".to_string(), 4)]);
        assert!(radar.for_subsystem(Subsystem::Service).is_empty());
    }

    #[test]
    fn test_empty_backend_overall_is_ungraded() {
        let overall: OverallEvaluation = serde_json::from_value(json!({
            "collaborativeSystemEvaluation": null,
            "resourceSystemEvaluation": null,
            "serviceSystemEvaluation": null
        }))
        .unwrap();

        for subsystem in Subsystem::ALL {
            assert_eq!(overall.evaluation(subsystem), "");
            assert_eq!(overall.grade(subsystem), None);
        }
    }

    #[test]
    fn test_empty_backend_radar_decodes() {
        let radar: RadarChartData = serde_json::from_value(json!({
            "collaborativeSystem": null,
            "resourceSystem": {"活力": null, "组织力": "良好"},
            "serviceSystem": null
        }))
        .unwrap();

        assert!(radar.for_subsystem(Subsystem::Collaborative).is_empty());
        assert_eq!(radar.for_subsystem(Subsystem::Resource).get("活力"), Some(&None));
        assert_eq!(radar.scores(Subsystem::Resource), vec![("组织力".to_string(), 4)]);

        let trend: RadarTrendData = serde_json::from_value(json!({
            "entryTime": "2024-05-01T08:30:00",
            "collaborativeSystem": {"稳定性": null},
            "resourceSystem": null,
            "serviceSystem": null
        }))
        .unwrap();
        assert!(trend.radar.scores(Subsystem::Collaborative).is_empty());
    }

    #[test]
    fn test_null_indicator_lists_are_empty() {
        let bottom: BottomIndicators = serde_json::from_value(json!({
            "collaborative": null,
            "resource": [{"indicatorName": "活力", "indicatorLevel": "差"}]
        }))
        .unwrap();
        assert!(bottom.for_subsystem(Subsystem::Collaborative).is_empty());
        assert_eq!(bottom.for_subsystem(Subsystem::Resource).len(), 1);
    }

    #[test]
    fn test_training_data_keeps_unknown_columns() {
        let value = json!({
            "id": 12,
            "entryTime": "2024-01-02T03:04:05",
            "x": "较差",
            "xv11": 0.42,
            "futureColumn": "kept"
        });
        let data: TrainingData = serde_json::from_value(value).unwrap();

        assert_eq!(data.id, Some(12));
        assert_eq!(data.overall_grade(Subsystem::Collaborative), Some(Grade::BelowAverage));
        assert_eq!(data.indicators.get("futureColumn"), Some(&json!("kept")));

        let submitted = serde_json::to_value(data.for_submission()).unwrap();
        assert!(submitted.get("id").is_none());
        assert!(submitted.get("entryTime").is_none());
        assert_eq!(submitted["xv11"], json!(0.42));
    }

    #[test]
    fn test_date_range_result() {
        let result: DateRangeResult = serde_json::from_value(json!({
            "totalCount": 1,
            "records": [{"id": 3, "entryTime": "2023-12-31T23:59:59"}]
        }))
        .unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.records[0].id, 3);
    }
}
