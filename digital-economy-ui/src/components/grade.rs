//! Grade badge

use digital_economy::Grade;
use leptos::*;

/// CSS class for a grade label; unknown labels get a neutral style
pub fn grade_class(label: &str) -> String {
    match label.parse::<Grade>() {
        Ok(grade) => format!("grade grade-{}", grade.score()),
        Err(_) => "grade grade-unknown".to_string(),
    }
}

#[component]
pub fn GradeBadge(
    #[prop(into)]
    label: String,
) -> impl IntoView {
    let class = grade_class(&label);
    let text = if label.trim().is_empty() {
        "-".to_string()
    } else {
        label
    };

    view! { <span class=class>{text}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_class() {
        assert_eq!(grade_class("优秀"), "grade grade-5");
        assert_eq!(grade_class(" 差 "), "grade grade-1");
        assert_eq!(grade_class(""), "grade grade-unknown");
        assert_eq!(grade_class("excellent"), "grade grade-unknown");
    }
}
