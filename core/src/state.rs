//! # Dashboard State
//!
//! Everything the presentation layer renders, held in one place and replaced
//! piecewise by the orchestrator and the mutation handlers.

use crate::period::{ResolvedRange, Selection};
use shared::{Expense, Insight, Summary};

/// Per-resource in-flight flags, each independent of the others
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub expenses: bool,
    pub summary: bool,
    pub insight: bool,
}

/// Latest request ticket issued per resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RequestTickets {
    pub expenses: u64,
    pub summary: u64,
    pub insight: u64,
}

/// Raw editor input, kept as typed so the form can be re-rendered verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: String,
    pub description: String,
    /// YYYY-MM-DD, blank for today
    pub date: String,
    pub category: String,
}

impl ExpenseDraft {
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            description: expense.description.clone().unwrap_or_default(),
            date: expense
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            category: expense.category_name.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Amount => self.amount = value,
            DraftField::Description => self.description = value,
            DraftField::Date => self.date = value,
            DraftField::Category => self.category = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Amount,
    Description,
    Date,
    Category,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Closed,
    Creating,
    Editing(i64),
}

/// The single create/edit surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub mode: EditorMode,
    pub draft: ExpenseDraft,
    /// A mutation from this surface is in flight
    pub submitting: bool,
    pub error: Option<String>,
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Closed
    }

    pub(crate) fn close(&mut self) {
        *self = EditorState::default();
    }
}

/// Snapshot of the whole dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub selection: Selection,
    /// Window resolved at the last sync
    pub range: ResolvedRange,
    pub expenses: Vec<Expense>,
    pub summary: Option<Summary>,
    pub insight: Option<Insight>,
    pub loading: LoadingFlags,
    /// Expense-list error banner
    pub error: Option<String>,
    pub editor: EditorState,
    pub(crate) tickets: RequestTickets,
}

impl DashboardState {
    pub fn new(selection: Selection, range: ResolvedRange) -> Self {
        Self {
            selection,
            range,
            expenses: Vec::new(),
            summary: None,
            insight: None,
            loading: LoadingFlags::default(),
            error: None,
            editor: EditorState::default(),
            tickets: RequestTickets::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.expenses || self.loading.summary || self.loading.insight
    }
}
