//! HTTP API Client
//!
//! Functions for communicating with the evaluation REST API. Every request
//! goes through [`request`], which applies the shared base URL and default
//! headers from [`ClientConfig`].

use chrono::NaiveDateTime;
use gloo_net::http::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use digital_economy::evaluation::{
    BottomIndicators, DateRangeResult, IndicatorTrendPoint, OverallEvaluation,
    OverallEvaluationTrend, RadarChartData, TrainingData, DATETIME_FORMAT,
};
use digital_economy::{ClientConfig, DEFAULT_BASE_URL};

/// Local storage key for an alternative backend URL
const API_URL_KEY: &str = "digital_economy_api_url";

/// Get the API base URL from local storage or use the default
pub fn get_api_base() -> String {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Client configuration shared by every request
pub fn client_config() -> ClientConfig {
    ClientConfig::new(get_api_base())
}

fn request(method: Method, path: &str) -> RequestBuilder {
    let config = client_config();
    config.headers.iter().fold(
        RequestBuilder::new(&config.url(path)).method(method),
        |builder, (name, value)| builder.header(name, value),
    )
}

/// Query parameters for a date-range lookup
pub fn date_range_query(start: &NaiveDateTime, end: &NaiveDateTime) -> [(&'static str, String); 2] {
    [
        ("startDate", start.format(DATETIME_FORMAT).to_string()),
        ("endDate", end.format(DATETIME_FORMAT).to_string()),
    ]
}

fn network_error(e: gloo_net::Error) -> String {
    format!("Network error: {}", e)
}

/// Turn a non-2xx response into an error message
async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        Err(format!("Request failed with status {}", status))
    } else {
        Err(format!("Request failed with status {}: {}", status, body))
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = request(Method::GET, path)
        .send()
        .await
        .map_err(network_error)?;
    parse(check(response).await?).await
}

/// A 404 is `None`, other failures are errors
async fn parse_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>, String> {
    if response.status() == 404 {
        return Ok(None);
    }
    parse(check(response).await?).await.map(Some)
}

/// Like [`get_json`], but a 404 is `None`
async fn get_optional<T: DeserializeOwned>(path: &str) -> Result<Option<T>, String> {
    let response = request(Method::GET, path)
        .send()
        .await
        .map_err(network_error)?;
    parse_optional(response).await
}

// ============ API Functions ============

pub async fn fetch_overall() -> Result<OverallEvaluation, String> {
    get_json("/overall").await
}

pub async fn fetch_radar() -> Result<RadarChartData, String> {
    get_json("/radar").await
}

pub async fn fetch_overall_trend() -> Result<Vec<OverallEvaluationTrend>, String> {
    get_json("/overall-trend").await
}

pub async fn fetch_bottom_indicators() -> Result<BottomIndicators, String> {
    get_json("/bottom-indicators").await
}

pub async fn fetch_indicator_trends() -> Result<Vec<IndicatorTrendPoint>, String> {
    get_json("/indicator-trends").await
}

/// Record ids and entry times within `[start, end]`
pub async fn fetch_records_by_date_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<DateRangeResult, String> {
    let query = date_range_query(&start, &end);
    let response = request(Method::GET, "/by-date-range")
        .query(query.iter().map(|(key, value)| (*key, value.as_str())))
        .send()
        .await
        .map_err(network_error)?;
    parse(check(response).await?).await
}

pub async fn fetch_record(id: i64) -> Result<Option<TrainingData>, String> {
    get_optional(&format!("/{}", id)).await
}

/// Store a new record; the backend assigns id and entry time
pub async fn create_record(data: &TrainingData) -> Result<TrainingData, String> {
    let response = request(Method::POST, "")
        .json(&data.for_submission())
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(network_error)?;
    parse(check(response).await?).await
}

/// Replace a record's indicators. `None` if the record does not exist.
pub async fn update_record(id: i64, data: &TrainingData) -> Result<Option<TrainingData>, String> {
    let response = request(Method::PUT, &format!("/{}", id))
        .json(&data.for_submission())
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(network_error)?;
    parse_optional(response).await
}

pub async fn delete_record(id: i64) -> Result<(), String> {
    let response = request(Method::DELETE, &format!("/{}", id))
        .send()
        .await
        .map_err(network_error)?;
    check(response).await?;
    Ok(())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_defaults_to_json_backend() {
        let config = client_config();
        assert_eq!(config.base_url, get_api_base());
        assert_eq!(
            config.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }
}
