//! Archive Management Page
//!
//! Browse stored evaluation records by entry date, inspect, edit or delete
//! them and submit new ones.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use digital_economy::evaluation::DateRangeRecord;
use digital_economy::{Subsystem, TrainingData};
use leptos::*;

use crate::api;
use crate::components::{ErrorPanel, GradeBadge, Loading};
use crate::state::global::GlobalState;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Days covered by the initial search
const DEFAULT_RANGE_DAYS: i64 = 30;

/// Whole-day bounds for a pair of `YYYY-MM-DD` inputs
pub fn parse_date_range(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let parse = |value: &str, field: &str| {
        NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT)
            .map_err(|_| format!("{}格式无效: {}", field, value))
    };
    let start = parse(start, "开始日期")?;
    let end = parse(end, "结束日期")?;
    if start > end {
        return Err("开始日期不能晚于结束日期".to_string());
    }

    match (start.and_hms_opt(0, 0, 0), end.and_hms_opt(23, 59, 59)) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err("日期超出范围".to_string()),
    }
}

/// Editable JSON for an existing record, without server-assigned fields
pub fn edit_draft(data: &TrainingData) -> String {
    serde_json::to_string_pretty(&data.for_submission()).unwrap_or_default()
}

/// Parse a draft record from a JSON object of indicator values
pub fn parse_draft(text: &str) -> Result<TrainingData, String> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("JSON 格式错误: {}", e))?;
    if !value.is_object() {
        return Err("记录必须是 JSON 对象".to_string());
    }
    let data: TrainingData =
        serde_json::from_value(value).map_err(|e| format!("记录格式错误: {}", e))?;
    if data.indicators.is_empty() {
        return Err("记录不包含任何指标".to_string());
    }
    Ok(data)
}

fn default_range() -> (String, String) {
    let today = Local::now().date_naive();
    let start = today - Duration::days(DEFAULT_RANGE_DAYS);
    (
        start.format(DATE_INPUT_FORMAT).to_string(),
        today.format(DATE_INPUT_FORMAT).to_string(),
    )
}

/// Archive management page component
#[component]
pub fn ArchiveManage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (initial_start, initial_end) = default_range();
    let start_input = create_rw_signal(initial_start);
    let end_input = create_rw_signal(initial_end);
    let range = create_rw_signal(parse_date_range(
        &start_input.get_untracked(),
        &end_input.get_untracked(),
    ));

    let records = create_local_resource(
        move || range.get(),
        |range| async move {
            let (start, end) = range?;
            api::fetch_records_by_date_range(start, end).await
        },
    );

    let selected = create_rw_signal(None::<i64>);

    let on_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let next = parse_date_range(&start_input.get(), &end_input.get());
        if range.get_untracked() == next {
            records.refetch();
        } else {
            range.set(next);
        }
    };

    let on_delete = Callback::new(move |id: i64| {
        let state = state.clone();
        spawn_local(async move {
            match api::delete_record(id).await {
                Ok(()) => {
                    state.show_success(&format!("记录 {} 已删除", id));
                    if selected.get_untracked() == Some(id) {
                        selected.try_set(None);
                    }
                    records.refetch();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to delete record {}: {}", id, e).into());
                    state.show_error(&e);
                }
            }
        });
    });

    let on_created = Callback::new(move |_: ()| records.refetch());

    view! {
        <div class="page manage">
            <header class="page-header">
                <h1>"档案管理"</h1>
            </header>

            <form class="card search-form" on:submit=on_search>
                <label>
                    "开始日期"
                    <input
                        type="date"
                        prop:value=move || start_input.get()
                        on:input=move |ev| start_input.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "结束日期"
                    <input
                        type="date"
                        prop:value=move || end_input.get()
                        on:input=move |ev| end_input.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit">"查询"</button>
            </form>

            <section class="card">
                <Transition fallback=|| view! { <Loading /> }>
                    {move || records.get().map(|result| match result {
                        Ok(result) => view! {
                            <p class="record-count">{format!("共 {} 条记录", result.total_count)}</p>
                            <RecordTable records=result.records selected=selected on_delete=on_delete />
                        }.into_view(),
                        Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                    })}
                </Transition>
            </section>

            {move || selected.get().map(|id| view! { <RecordDetail id=id /> })}

            <NewRecord on_created=on_created />
        </div>
    }
}

#[component]
fn RecordTable(
    records: Vec<DateRangeRecord>,
    selected: RwSignal<Option<i64>>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    if records.is_empty() {
        return view! { <p class="empty">"所选日期内没有记录"</p> }.into_view();
    }

    view! {
        <table class="record-table">
            <thead>
                <tr>
                    <th>"编号"</th>
                    <th>"录入时间"</th>
                    <th>"操作"</th>
                </tr>
            </thead>
            <tbody>
                {records.into_iter().map(|record| {
                    let id = record.id;
                    view! {
                        <tr class:selected=move || selected.get() == Some(id)>
                            <td>{id}</td>
                            <td>{state.format_datetime(&record.entry_time)}</td>
                            <td class="actions">
                                <button on:click=move |_| selected.set(Some(id))>"查看"</button>
                                <button class="danger" on:click=move |_| on_delete.call(id)>"删除"</button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
fn RecordDetail(id: i64) -> impl IntoView {
    let record = create_local_resource(move || id, api::fetch_record);
    let on_saved = Callback::new(move |_: ()| record.refetch());

    view! {
        <section class="card record-detail">
            <h2>{format!("记录 {}", id)}</h2>
            <Transition fallback=|| view! { <Loading /> }>
                {move || record.get().map(|result| match result {
                    Ok(Some(data)) => view! {
                        <RecordGrades data=data.clone() />
                        <EditRecord id=id data=data on_saved=on_saved />
                    }.into_view(),
                    Ok(None) => view! { <p class="empty">"记录不存在"</p> }.into_view(),
                    Err(e) => view! { <ErrorPanel message=e /> }.into_view(),
                })}
            </Transition>
        </section>
    }
}

#[component]
fn EditRecord(id: i64, data: TrainingData, on_saved: Callback<()>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let draft = create_rw_signal(edit_draft(&data));
    let saving = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let data = match parse_draft(&draft.get()) {
            Ok(data) => data,
            Err(e) => {
                state.show_error(&e);
                return;
            }
        };

        let state = state.clone();
        saving.set(true);
        spawn_local(async move {
            match api::update_record(id, &data).await {
                Ok(Some(_)) => {
                    state.show_success(&format!("记录 {} 已更新", id));
                    on_saved.call(());
                }
                Ok(None) => state.show_error(&format!("记录 {} 不存在", id)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to update record {}: {}", id, e).into());
                    state.show_error(&e);
                }
            }
            saving.try_set(false);
        });
    };

    view! {
        <form class="edit-record" on:submit=on_submit>
            <h3>"编辑记录"</h3>
            <textarea
                rows="10"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || saving.get()>
                {move || if saving.get() { "更新中…" } else { "更新" }}
            </button>
        </form>
    }
}

#[component]
fn RecordGrades(data: TrainingData) -> impl IntoView {
    let body = serde_json::to_string_pretty(&data.indicators).unwrap_or_default();

    view! {
        <div class="record-grades">
            {Subsystem::ALL.into_iter().map(|subsystem| {
                let label = data
                    .overall_grade(subsystem)
                    .map(|grade| grade.label().to_string())
                    .unwrap_or_default();
                view! {
                    <div class="record-grade">
                        <span>{subsystem.label()}</span>
                        <GradeBadge label=label />
                    </div>
                }
            }).collect_view()}
        </div>
        <pre class="record-body">{body}</pre>
    }
}

#[component]
fn NewRecord(on_created: Callback<()>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let draft = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let data = match parse_draft(&draft.get()) {
            Ok(data) => data,
            Err(e) => {
                state.show_error(&e);
                return;
            }
        };

        let state = state.clone();
        submitting.set(true);
        spawn_local(async move {
            match api::create_record(&data).await {
                Ok(created) => {
                    let message = match created.id {
                        Some(id) => format!("记录 {} 已保存", id),
                        None => "记录已保存".to_string(),
                    };
                    state.show_success(&message);
                    draft.try_set(String::new());
                    on_created.call(());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to create record: {}", e).into());
                    state.show_error(&e);
                }
            }
            submitting.try_set(false);
        });
    };

    view! {
        <form class="card new-record" on:submit=on_submit>
            <h2>"新增记录"</h2>
            <textarea
                rows="8"
                placeholder=r#"{"x": "良好", "z": "中等", "f": "优秀"}"#
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "保存中…" } else { "保存" }}
            </button>
        </form>
    }
}
