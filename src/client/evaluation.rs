//! Typed evaluation endpoints
//!
//! Thin wrappers over [`ApiClient`] for the backend routes under the base URL.

use chrono::NaiveDateTime;

use super::config::RequestOverrides;
use super::error::{ClientError, ClientResult};
use super::http::ApiClient;
use crate::evaluation::{
    BottomIndicators, DateRangeResult, IndicatorTrendPoint, OverallEvaluation,
    OverallEvaluationTrend, RadarChartData, RadarTrendData, TrainingData, DATETIME_FORMAT,
};

/// Evaluation API bound to a client
#[derive(Debug, Clone)]
pub struct EvaluationApi {
    client: ApiClient,
}

impl EvaluationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Latest overall grade per subsystem
    pub async fn overall(&self) -> ClientResult<OverallEvaluation> {
        self.client.get_json("/overall").await
    }

    /// Latest indicator grades per subsystem
    pub async fn radar(&self) -> ClientResult<RadarChartData> {
        self.client.get_json("/radar").await
    }

    /// Overall grades of the most recent records
    pub async fn overall_trend(&self) -> ClientResult<Vec<OverallEvaluationTrend>> {
        self.client.get_json("/overall-trend").await
    }

    /// Indicator grades of the most recent records
    pub async fn radar_trend(&self) -> ClientResult<Vec<RadarTrendData>> {
        self.client.get_json("/radar-trend").await
    }

    pub async fn bottom_indicators(&self) -> ClientResult<BottomIndicators> {
        self.client.get_json("/bottom-indicators").await
    }

    pub async fn indicator_trends(&self) -> ClientResult<Vec<IndicatorTrendPoint>> {
        self.client.get_json("/indicator-trends").await
    }

    /// Store a new record; the backend assigns id and entry time
    pub async fn create_record(&self, data: &TrainingData) -> ClientResult<TrainingData> {
        self.client
            .post("", &data.for_submission())
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    /// Replace a record's indicators. `None` if the record does not exist.
    pub async fn update_record(
        &self,
        id: i64,
        data: &TrainingData,
    ) -> ClientResult<Option<TrainingData>> {
        let response = self
            .client
            .put(&format!("/{}", id), &data.for_submission())
            .await;
        match response {
            Ok(response) => response.json().await.map(Some).map_err(ClientError::Decode),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_record(&self, id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/{}", id)).await?;
        Ok(())
    }

    /// Record ids and entry times within `[start, end]`
    pub async fn records_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ClientResult<DateRangeResult> {
        let overrides = RequestOverrides::new()
            .query("startDate", start.format(DATETIME_FORMAT).to_string())
            .query("endDate", end.format(DATETIME_FORMAT).to_string());

        self.client
            .get_with("/by-date-range", &overrides)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    /// A single record. `None` if it does not exist.
    pub async fn record(&self, id: i64) -> ClientResult<Option<TrainingData>> {
        match self.client.get_json(&format!("/{}", id)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
