use rust_decimal::Decimal;

/// Amount with two decimals behind the currency symbol, e.g. `₹10.50`
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Card value: the amount, or an en dash while unknown
pub fn format_optional_money(symbol: &str, amount: Option<Decimal>) -> String {
    amount
        .map(|a| format_money(symbol, a))
        .unwrap_or_else(|| "–".to_string())
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
