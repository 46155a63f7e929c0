use chrono::NaiveDate;

/// `YYYY-MM-DD`, or an en dash when the backend sent no date
pub fn format_table_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "–".to_string())
}

/// `2025-03-01 → 2025-03-31`; `None` unless both sides are known
pub fn format_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!(
            "{} → {}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )),
        _ => None,
    }
}

/// Value for an `<input type="date">`
pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
