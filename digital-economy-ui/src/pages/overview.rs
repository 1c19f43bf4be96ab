//! Subsystem Overview Page
//!
//! Shared by the resource, service and synergy pages: the subsystem's
//! overall grade, indicator grades, weakest indicators and recent trend.

use digital_economy::evaluation::{IndicatorTrendPoint, OverallEvaluationTrend};
use digital_economy::{BottomIndicators, RadarChartData, Subsystem};
use leptos::*;

use crate::api;
use crate::components::{CardSkeleton, ErrorPanel, GradeBadge, Loading};
use crate::state::global::GlobalState;

/// Overview page for one subsystem
#[component]
pub fn Overview(subsystem: Subsystem) -> impl IntoView {
    let overall = create_local_resource(|| (), |_| api::fetch_overall());
    let radar = create_local_resource(|| (), |_| api::fetch_radar());
    let bottom = create_local_resource(|| (), |_| api::fetch_bottom_indicators());
    let trend = create_local_resource(|| (), |_| api::fetch_overall_trend());
    let indicator_trends = create_local_resource(|| (), |_| api::fetch_indicator_trends());

    view! {
        <div class="page overview">
            <header class="page-header">
                <h1>{format!("{}生态评价", subsystem.label())}</h1>
                <Transition fallback=|| view! { <Loading /> }>
                    {move || overall.get().map(|result| match result {
                        Ok(overall) => view! {
                            <div class="overall">
                                <span class="overall-label">"综合评价"</span>
                                <GradeBadge label=overall.evaluation(subsystem).to_string() />
                            </div>
                        }.into_view(),
                        Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                    })}
                </Transition>
            </header>

            <div class="overview-grid">
                <section class="card">
                    <h2>"指标评价"</h2>
                    <Transition fallback=|| view! { <CardSkeleton rows=5 /> }>
                        {move || radar.get().map(|result| match result {
                            Ok(radar) => view! { <IndicatorScores radar=radar subsystem=subsystem /> }.into_view(),
                            Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                        })}
                    </Transition>
                </section>

                <section class="card">
                    <h2>"待提升指标"</h2>
                    <Transition fallback=|| view! { <CardSkeleton /> }>
                        {move || bottom.get().map(|result| match result {
                            Ok(bottom) => view! { <WeakIndicators bottom=bottom subsystem=subsystem /> }.into_view(),
                            Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                        })}
                    </Transition>
                </section>

                <section class="card">
                    <h2>"评价趋势"</h2>
                    <Transition fallback=|| view! { <CardSkeleton /> }>
                        {move || trend.get().map(|result| match result {
                            Ok(trend) => view! { <GradeTrend trend=trend subsystem=subsystem /> }.into_view(),
                            Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                        })}
                    </Transition>
                </section>

                <section class="card card-wide">
                    <h2>"指标变化"</h2>
                    <Transition fallback=|| view! { <CardSkeleton rows=4 /> }>
                        {move || indicator_trends.get().map(|result| match result {
                            Ok(points) => view! { <IndicatorTrendTable points=points subsystem=subsystem /> }.into_view(),
                            Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                        })}
                    </Transition>
                </section>
            </div>
        </div>
    }
}

/// Width of an indicator bar for a 1-5 score
fn bar_width(score: u8) -> String {
    format!("width: {}%", u32::from(score.min(5)) * 20)
}

/// Indicator grades as horizontal bars
#[component]
fn IndicatorScores(radar: RadarChartData, subsystem: Subsystem) -> impl IntoView {
    let grades = radar.for_subsystem(subsystem).clone();
    if grades.is_empty() {
        return view! { <p class="empty">"暂无数据"</p> }.into_view();
    }

    let scores: std::collections::BTreeMap<String, u8> =
        radar.scores(subsystem).into_iter().collect();

    view! {
        <ul class="indicator-bars">
            {grades.into_iter().map(|(name, grade)| {
                let score = scores.get(&name).copied().unwrap_or(0);
                view! {
                    <li class="indicator-bar">
                        <span class="indicator-name">{name}</span>
                        <div class="bar-track">
                            <div class="bar-fill" style=bar_width(score) />
                        </div>
                        <GradeBadge label=grade.unwrap_or_default() />
                    </li>
                }
            }).collect_view()}
        </ul>
    }
    .into_view()
}

#[component]
fn WeakIndicators(bottom: BottomIndicators, subsystem: Subsystem) -> impl IntoView {
    let indicators = bottom.for_subsystem(subsystem).to_vec();
    if indicators.is_empty() {
        return view! { <p class="empty">"暂无数据"</p> }.into_view();
    }

    view! {
        <ol class="weak-indicators">
            {indicators.into_iter().map(|info| view! {
                <li>
                    <span class="indicator-name">{info.indicator_name}</span>
                    <GradeBadge label=info.indicator_level />
                </li>
            }).collect_view()}
        </ol>
    }
    .into_view()
}

#[component]
fn GradeTrend(trend: Vec<OverallEvaluationTrend>, subsystem: Subsystem) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    if trend.is_empty() {
        return view! { <p class="empty">"暂无数据"</p> }.into_view();
    }

    view! {
        <ul class="grade-trend">
            {trend.into_iter().map(|entry| view! {
                <li>
                    <span class="entry-time">{state.format_datetime(&entry.entry_time)}</span>
                    <GradeBadge label=entry.evaluation.evaluation(subsystem).to_string() />
                </li>
            }).collect_view()}
        </ul>
    }
    .into_view()
}

/// Indicator names of a trend, in first-seen order
fn indicator_columns(points: &[IndicatorTrendPoint], subsystem: Subsystem) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for point in points {
        for value in point.for_subsystem(subsystem) {
            if !columns.contains(&value.indicator_name) {
                columns.push(value.indicator_name.clone());
            }
        }
    }
    columns
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[component]
fn IndicatorTrendTable(points: Vec<IndicatorTrendPoint>, subsystem: Subsystem) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let columns = indicator_columns(&points, subsystem);
    if columns.is_empty() {
        return view! { <p class="empty">"暂无数据"</p> }.into_view();
    }

    let header = columns.clone();
    view! {
        <table class="trend-table">
            <thead>
                <tr>
                    <th>"录入时间"</th>
                    {header.into_iter().map(|name| view! { <th>{name}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {points.into_iter().map(|point| {
                    let values = point.for_subsystem(subsystem);
                    let cells = columns.iter().map(|name| {
                        let value = values
                            .iter()
                            .find(|v| &v.indicator_name == name)
                            .and_then(|v| v.value);
                        view! { <td>{format_value(value)}</td> }
                    }).collect_view();
                    view! {
                        <tr>
                            <td>{state.format_datetime(&point.entry_time)}</td>
                            {cells}
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use digital_economy::evaluation::IndicatorValue;

    fn value(name: &str, v: Option<f64>) -> IndicatorValue {
        IndicatorValue {
            indicator_name: name.to_string(),
            indicator_level: "中等".to_string(),
            value: v,
        }
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(0), "width: 0%");
        assert_eq!(bar_width(3), "width: 60%");
        assert_eq!(bar_width(9), "width: 100%");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(12.0)), "12");
        assert_eq!(format_value(Some(0.456)), "0.46");
        assert_eq!(format_value(None), "-");
    }

    #[test]
    fn test_indicator_columns_first_seen_order() {
        let time = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let points = vec![
            IndicatorTrendPoint {
                entry_time: time,
                collaborative: vec![],
                resource: vec![value("b", Some(1.0)), value("a", None)],
                service: vec![value("s", Some(2.0))],
            },
            IndicatorTrendPoint {
                entry_time: time,
                collaborative: vec![],
                resource: vec![value("c", Some(3.0)), value("b", Some(4.0))],
                service: vec![],
            },
        ];

        assert_eq!(
            indicator_columns(&points, Subsystem::Resource),
            vec!["b", "a", "c"]
        );
        assert!(indicator_columns(&points, Subsystem::Collaborative).is_empty());
    }
}
