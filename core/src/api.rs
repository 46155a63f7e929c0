use crate::errors::ApiError;
use crate::period::{ResolvedRange, Selection};
use async_trait::async_trait;
use shared::{CreateExpenseRequest, Expense, Insight, Summary, UpdateExpenseRequest};

/// Query for the expense list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub range: ResolvedRange,
    pub search: Option<String>,
}

impl ExpenseQuery {
    pub fn for_selection(selection: &Selection, range: ResolvedRange) -> Self {
        Self {
            range,
            search: selection.search_term().map(str::to_string),
        }
    }

    /// Query-string pairs; unbounded sides and blank search are omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = range_pairs(&self.range);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Query for the summary and insight endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodQuery {
    pub period: &'static str,
    pub range: ResolvedRange,
}

impl PeriodQuery {
    pub fn for_selection(selection: &Selection, range: ResolvedRange) -> Self {
        Self {
            period: selection.period_label(),
            range,
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("period", self.period.to_string())];
        pairs.extend(range_pairs(&self.range));
        pairs
    }
}

fn range_pairs(range: &ResolvedRange) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(start) = range.start {
        pairs.push(("start", start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = range.end {
        pairs.push(("end", end.format("%Y-%m-%d").to_string()));
    }
    pairs
}

/// Backend operations the dashboard depends on
///
/// Implementations own transport concerns (base URL, bearer token, timeouts).
/// Futures are not `Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait ExpenseApi {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, ApiError>;
    async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError>;
    async fn update_expense(
        &self,
        id: i64,
        request: &UpdateExpenseRequest,
    ) -> Result<Expense, ApiError>;
    async fn delete_expense(&self, id: i64) -> Result<(), ApiError>;
    async fn summary(&self, query: &PeriodQuery) -> Result<Summary, ApiError>;
    async fn insights(&self, query: &PeriodQuery) -> Result<Insight, ApiError>;
}
