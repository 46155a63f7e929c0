use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded expense, as owned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Positive amount with two decimal places (sent by the backend as a string)
    pub amount: Decimal,
    /// Free-text description; legacy rows may carry none
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date of the expense (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Name of the category assigned by the user or suggested by the AI
    #[serde(default)]
    pub category_name: Option<String>,
}

impl Expense {
    /// Description for table rendering
    pub fn display_description(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "No description",
        }
    }

    /// Category for table rendering
    pub fn display_category(&self) -> &str {
        match self.category_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Uncategorized",
        }
    }
}

/// Request body for creating an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    /// Category name; `None` lets the backend suggest one
    pub category: Option<String>,
}

/// Request body for updating an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category_name: Option<String>,
}

/// Spend total for one category within a summary window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Backend category id; `None` for the "Uncategorized" bucket
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub total: Decimal,
}

impl CategoryTotal {
    /// Stable key for list rendering: the id when present, otherwise the name
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}

/// Aggregated spend for a date window
///
/// `by_category` keeps the backend's order; presentation assigns legend colors
/// by position in this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Period label echoed back by the backend ("weekly", "monthly", ...)
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
    /// Number of expenses in the window, when the backend reports it
    #[serde(default)]
    pub count: Option<u64>,
}

/// Headline figures computed alongside an AI insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCards {
    #[serde(default)]
    pub total_spent: Option<Decimal>,
    #[serde(default)]
    pub top_category: Option<String>,
}

/// The AI-generated text, which the backend returns either bare or wrapped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightBody {
    Text(String),
    Structured { text: String },
}

impl InsightBody {
    pub fn text(&self) -> &str {
        match self {
            InsightBody::Text(text) => text,
            InsightBody::Structured { text } => text,
        }
    }
}

/// Per-day spend series; `dates` and `amounts` are parallel arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub amounts: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCharts {
    #[serde(default)]
    pub daily_trend: Option<DailyTrend>,
}

/// Response of the insights endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Summary the backend computed for the same window
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub cards: Option<InsightCards>,
    #[serde(default)]
    pub insight: Option<InsightBody>,
    #[serde(default)]
    pub charts: Option<InsightCharts>,
}

impl Insight {
    /// Insight text regardless of the shape it was sent in
    pub fn text(&self) -> Option<&str> {
        self.insight.as_ref().map(InsightBody::text)
    }

    pub fn daily_trend(&self) -> Option<&DailyTrend> {
        self.charts.as_ref().and_then(|charts| charts.daily_trend.as_ref())
    }
}
