use crate::core::parse_record_date;

/// Tooltip header for a category label.
///
/// Labels that are full dates render as `Jan 5, 2024`; anything else
/// (day numbers, week ranges) is shown verbatim.
#[must_use]
pub fn format_tooltip_date(label: &str) -> String {
    match parse_record_date(label) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => label.to_owned(),
    }
}

/// Percentage with two decimals and a comma separator, e.g. `25,00%`.
#[must_use]
pub fn format_tooltip_value(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_owned();
    }
    format!("{}%", format!("{value:.2}").replace('.', ","))
}

/// Y-axis tick text: up to two decimals, trailing zeros trimmed, `%` suffix.
#[must_use]
pub fn format_axis_percent(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{trimmed}%")
}
