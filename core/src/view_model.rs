//! # View-Model Reconciliation
//!
//! The summary, the insight and the expense list arrive independently and the
//! insight may lag behind because it is throttled. This module folds them into
//! the single set of figures the cards, breakdown and charts render.
//!
//! ## Precedence
//! - The directly fetched summary wins over the one embedded in the insight.
//! - The insight's top-category label wins over the first summary row.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{Expense, Insight, Summary};

/// Legend colors, assigned by row position
pub const CATEGORY_PALETTE: [&str; 6] = [
    "#a855f7", "#0ea5e9", "#22c55e", "#f97316", "#e11d48", "#facc15",
];

/// One row of the category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub key: String,
    pub name: String,
    pub total: Decimal,
    /// Share of the total spend, in percent
    pub percent: f64,
    /// Bar width in percent, never above 100
    pub bar_width: f64,
    pub color: &'static str,
}

/// One day of the daily trend chart
#[derive(Debug, Clone, PartialEq)]
pub struct TrendBar {
    pub date: String,
    /// MM-DD
    pub label: String,
    pub amount: f64,
}

/// Figures rendered by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveViewModel {
    pub effective_summary: Option<Summary>,
    pub total_spent: Option<Decimal>,
    pub top_category: Option<String>,
    pub insight_text: Option<String>,
    pub expense_count: usize,
    pub category_breakdown: Vec<CategorySlice>,
    pub daily_trend: Vec<TrendBar>,
}

pub fn reconcile(
    summary: Option<&Summary>,
    insight: Option<&Insight>,
    expenses: &[Expense],
) -> EffectiveViewModel {
    let effective_summary = summary
        .or_else(|| insight.and_then(|i| i.summary.as_ref()))
        .cloned();

    let cards = insight.and_then(|i| i.cards.as_ref());

    let total_spent = effective_summary
        .as_ref()
        .and_then(|s| s.total)
        .or_else(|| cards.and_then(|c| c.total_spent));

    let top_category = cards
        .and_then(|c| non_blank(c.top_category.as_deref()))
        .or_else(|| {
            effective_summary
                .as_ref()
                .and_then(|s| s.by_category.first())
                .and_then(|row| non_blank(Some(row.name.as_str())))
        })
        .map(str::to_string);

    let insight_text = insight
        .and_then(Insight::text)
        .and_then(|text| non_blank(Some(text)))
        .map(str::to_string);

    let expense_count = effective_summary
        .as_ref()
        .and_then(|s| s.count)
        .map(|count| count as usize)
        .unwrap_or(expenses.len());

    let category_breakdown = match (&effective_summary, total_spent) {
        (Some(summary), Some(total)) => category_breakdown(summary, total),
        _ => Vec::new(),
    };

    let daily_trend = insight.map(daily_trend).unwrap_or_default();

    EffectiveViewModel {
        effective_summary,
        total_spent,
        top_category,
        insight_text,
        expense_count,
        category_breakdown,
        daily_trend,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Share of `total` per category row; empty when the total is zero
pub fn category_breakdown(summary: &Summary, total: Decimal) -> Vec<CategorySlice> {
    let total = total.to_f64().unwrap_or(0.0);
    if total <= 0.0 {
        return Vec::new();
    }

    summary
        .by_category
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let percent = row.total.to_f64().unwrap_or(0.0) / total * 100.0;
            CategorySlice {
                key: row.key(),
                name: row.name.clone(),
                total: row.total,
                percent,
                bar_width: percent.clamp(0.0, 100.0),
                color: CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()],
            }
        })
        .collect()
}

/// Bars for the insight's daily trend series
pub fn daily_trend(insight: &Insight) -> Vec<TrendBar> {
    let Some(trend) = insight.daily_trend() else {
        return Vec::new();
    };

    trend
        .dates
        .iter()
        .zip(trend.amounts.iter())
        .map(|(date, amount)| TrendBar {
            date: date.clone(),
            label: date.get(5..).unwrap_or(date).to_string(),
            amount: *amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CategoryTotal, DailyTrend, InsightBody, InsightCards, InsightCharts};
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn summary(total: &str, rows: &[(&str, &str)]) -> Summary {
        Summary {
            period: Some("monthly".to_string()),
            start: None,
            end: None,
            total: Some(dec(total)),
            by_category: rows
                .iter()
                .enumerate()
                .map(|(i, (name, total))| CategoryTotal {
                    id: Some(i as i64 + 1),
                    name: name.to_string(),
                    total: dec(total),
                })
                .collect(),
            count: None,
        }
    }

    fn insight_with(summary: Option<Summary>, top: Option<&str>) -> Insight {
        Insight {
            summary,
            cards: Some(InsightCards {
                total_spent: Some(dec("42")),
                top_category: top.map(str::to_string),
            }),
            insight: Some(InsightBody::Structured {
                text: "Food is up.".to_string(),
            }),
            charts: None,
        }
    }

    #[test]
    fn test_falls_back_to_insight_summary() {
        let embedded = summary("500", &[("Rent", "500")]);
        let insight = insight_with(Some(embedded.clone()), None);
        let vm = reconcile(None, Some(&insight), &[]);
        assert_eq!(vm.effective_summary, Some(embedded));
        assert_eq!(vm.total_spent, Some(dec("500")));
        assert_eq!(vm.top_category.as_deref(), Some("Rent"));
        assert_eq!(vm.insight_text.as_deref(), Some("Food is up."));
    }

    #[test]
    fn test_direct_summary_wins() {
        let direct = summary("120", &[("Food", "100"), ("Taxi", "20")]);
        let embedded = summary("500", &[("Rent", "500")]);
        let insight = insight_with(Some(embedded), None);
        let vm = reconcile(Some(&direct), Some(&insight), &[]);
        assert_eq!(vm.effective_summary, Some(direct));
        assert_eq!(vm.total_spent, Some(dec("120")));
        assert_eq!(vm.top_category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_insight_top_category_wins_over_first_row() {
        let direct = summary("120", &[("Food", "100"), ("Taxi", "20")]);
        let insight = insight_with(None, Some("Dining out"));
        let vm = reconcile(Some(&direct), Some(&insight), &[]);
        assert_eq!(vm.top_category.as_deref(), Some("Dining out"));
    }

    #[test]
    fn test_blank_insight_top_category_falls_through() {
        let direct = summary("120", &[("Food", "100")]);
        let insight = insight_with(None, Some("  "));
        let vm = reconcile(Some(&direct), Some(&insight), &[]);
        assert_eq!(vm.top_category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_total_from_cards_when_no_summary() {
        let insight = insight_with(None, None);
        let vm = reconcile(None, Some(&insight), &[]);
        assert_eq!(vm.effective_summary, None);
        assert_eq!(vm.total_spent, Some(dec("42")));
        assert_eq!(vm.top_category, None);
        assert!(vm.category_breakdown.is_empty());
    }

    #[test]
    fn test_nothing_loaded() {
        let vm = reconcile(None, None, &[]);
        assert_eq!(vm.total_spent, None);
        assert_eq!(vm.top_category, None);
        assert_eq!(vm.insight_text, None);
        assert_eq!(vm.expense_count, 0);
        assert!(vm.daily_trend.is_empty());
    }

    #[test]
    fn test_expense_count_prefers_summary_count() {
        let expense = Expense {
            id: 1,
            amount: dec("3"),
            description: None,
            date: None,
            category_name: None,
        };
        let mut direct = summary("3", &[]);
        let vm = reconcile(Some(&direct), None, &[expense.clone(), expense.clone()]);
        assert_eq!(vm.expense_count, 2);

        direct.count = Some(9);
        let vm = reconcile(Some(&direct), None, &[expense]);
        assert_eq!(vm.expense_count, 9);
    }

    #[test]
    fn test_category_breakdown_shares_and_palette() {
        let rows: Vec<(String, String)> = (0..7)
            .map(|i| (format!("Cat{}", i), "10".to_string()))
            .collect();
        let rows: Vec<(&str, &str)> = rows.iter().map(|(n, t)| (n.as_str(), t.as_str())).collect();
        let direct = summary("70", &rows);
        let slices = category_breakdown(&direct, dec("70"));
        assert_eq!(slices.len(), 7);
        assert!((slices[0].percent - 14.2857).abs() < 0.001);
        assert_eq!(slices[0].color, CATEGORY_PALETTE[0]);
        assert_eq!(slices[6].color, CATEGORY_PALETTE[0]);
        assert_eq!(slices[1].color, CATEGORY_PALETTE[1]);
    }

    #[test]
    fn test_breakdown_bar_width_is_capped() {
        let direct = summary("50", &[("Food", "80")]);
        let slices = category_breakdown(&direct, dec("50"));
        assert!((slices[0].percent - 160.0).abs() < 1e-9);
        assert_eq!(slices[0].bar_width, 100.0);
        assert!(category_breakdown(&direct, Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_daily_trend_bars() {
        let insight = Insight {
            summary: None,
            cards: None,
            insight: Some(InsightBody::Text("ok".to_string())),
            charts: Some(InsightCharts {
                daily_trend: Some(DailyTrend {
                    dates: vec!["2025-03-01".to_string(), "2025-03-02".to_string()],
                    amounts: vec![50.0, 200.0],
                }),
            }),
        };
        let bars = daily_trend(&insight);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, "2025-03-01");
        assert_eq!(bars[0].label, "03-01");
        assert_eq!(bars[1].amount, 200.0);
    }

    #[test]
    fn test_daily_trend_stops_at_shorter_series() {
        let insight = Insight {
            summary: None,
            cards: None,
            insight: None,
            charts: Some(InsightCharts {
                daily_trend: Some(DailyTrend {
                    dates: vec!["2025-03-01".to_string(), "2025-03-02".to_string()],
                    amounts: vec![0.5],
                }),
            }),
        };
        let bars = daily_trend(&insight);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].amount, 0.5);
        assert!(daily_trend(&sample_without_charts()).is_empty());
    }

    fn sample_without_charts() -> Insight {
        Insight {
            summary: None,
            cards: None,
            insight: None,
            charts: None,
        }
    }
}
