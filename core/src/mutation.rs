//! # Mutation Coordinator
//!
//! Create, update and delete of a single expense through the editor. A draft
//! is validated locally before any request; a successful write closes the
//! editor and refreshes the dashboard without forcing the insight.

use crate::dashboard::Dashboard;
use crate::errors::{ApiError, ValidationError};
use crate::state::{DraftField, EditorMode, EditorState, ExpenseDraft};
use chrono::NaiveDate;
use log::{error, info, warn};
use rust_decimal::Decimal;
use shared::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    /// Message shown in the editor when the backend rejects the write
    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to add expense. Please try again.",
            MutationKind::Update => "Failed to update expense. Please try again.",
            MutationKind::Delete => "Failed to delete expense. Please try again.",
        }
    }
}

/// What happened to a submitted mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Completed,
    /// Local validation failed; nothing was sent
    Rejected(ValidationError),
    Failed(ApiError),
    /// Another mutation was still in flight
    Ignored,
}

impl MutationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, MutationOutcome::Completed)
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category: Option<String>,
}

impl ValidExpense {
    pub fn create_request(&self) -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
            category: self.category.clone(),
        }
    }

    pub fn update_request(&self) -> UpdateExpenseRequest {
        UpdateExpenseRequest {
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
            category_name: self.category.clone(),
        }
    }
}

pub fn validate_draft(
    draft: &ExpenseDraft,
    max_amount: Decimal,
    today: NaiveDate,
) -> Result<ValidExpense, ValidationError> {
    let raw_amount = draft.amount.trim();
    let amount = Decimal::from_str(raw_amount)
        .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive);
    }
    if amount > max_amount {
        return Err(ValidationError::AmountTooLarge(group_thousands(max_amount)));
    }

    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let raw_date = draft.date.trim();
    let date = if raw_date.is_empty() {
        today
    } else {
        NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw_date.to_string()))?
    };

    let category = Some(draft.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok(ValidExpense {
        amount,
        description: description.to_string(),
        date,
        category,
    })
}

/// `99999999.99` -> `99,999,999.99`
fn group_thousands(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, cents)
}

impl Dashboard {
    pub fn open_create(&self) {
        let today = self.today();
        self.commit(|state| {
            if state.editor.submitting {
                return;
            }
            state.editor = EditorState {
                mode: EditorMode::Creating,
                draft: ExpenseDraft {
                    date: today.format("%Y-%m-%d").to_string(),
                    ..ExpenseDraft::default()
                },
                ..EditorState::default()
            };
        });
    }

    pub fn open_edit(&self, expense: &Expense) {
        self.commit(|state| {
            if state.editor.submitting {
                return;
            }
            state.editor = EditorState {
                mode: EditorMode::Editing(expense.id),
                draft: ExpenseDraft::from_expense(expense),
                ..EditorState::default()
            };
        });
    }

    /// Store raw input for one editor field; clears a previous error
    pub fn edit_draft(&self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        self.commit(|state| {
            state.editor.draft.set(field, value);
            state.editor.error = None;
        });
    }

    /// Dismiss the editor; ignored while a write is in flight
    pub fn close_editor(&self) {
        self.commit(|state| {
            if !state.editor.submitting {
                state.editor.close();
            }
        });
    }

    pub async fn submit_create(&self) -> MutationOutcome {
        let draft = self.snapshot().editor.draft;
        self.create(draft).await
    }

    pub async fn submit_edit(&self) -> MutationOutcome {
        match self.editing_id() {
            Some(id) => {
                let draft = self.snapshot().editor.draft;
                self.update(id, draft).await
            }
            None => {
                warn!("⚠️ Update submitted without an expense in the editor");
                MutationOutcome::Ignored
            }
        }
    }

    pub async fn submit_delete(&self) -> MutationOutcome {
        match self.editing_id() {
            Some(id) => self.remove(id).await,
            None => {
                warn!("⚠️ Delete submitted without an expense in the editor");
                MutationOutcome::Ignored
            }
        }
    }

    pub async fn create(&self, draft: ExpenseDraft) -> MutationOutcome {
        let valid = match self.begin_write(Some(&draft)) {
            Ok(Some(valid)) => valid,
            Ok(None) => return MutationOutcome::Ignored,
            Err(outcome) => return outcome,
        };

        info!("➕ Adding expense {:?} ({})", valid.description, valid.amount);
        let result = self
            .inner
            .api
            .create_expense(&valid.create_request())
            .await
            .map(|_| ());
        self.finish_write(MutationKind::Create, result).await
    }

    pub async fn update(&self, id: i64, draft: ExpenseDraft) -> MutationOutcome {
        let valid = match self.begin_write(Some(&draft)) {
            Ok(Some(valid)) => valid,
            Ok(None) => return MutationOutcome::Ignored,
            Err(outcome) => return outcome,
        };

        info!("✏️ Updating expense {}", id);
        let result = self
            .inner
            .api
            .update_expense(id, &valid.update_request())
            .await
            .map(|_| ());
        self.finish_write(MutationKind::Update, result).await
    }

    pub async fn remove(&self, id: i64) -> MutationOutcome {
        if let Err(outcome) = self.begin_write(None) {
            return outcome;
        }

        info!("🗑️ Deleting expense {}", id);
        let result = self.inner.api.delete_expense(id).await;
        self.finish_write(MutationKind::Delete, result).await
    }

    fn editing_id(&self) -> Option<i64> {
        match self.snapshot().editor.mode {
            EditorMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    /// Re-entry check, then validation, then mark the editor as submitting
    ///
    /// Returns `Ok(None)` when there is no draft to validate.
    fn begin_write(
        &self,
        draft: Option<&ExpenseDraft>,
    ) -> Result<Option<ValidExpense>, MutationOutcome> {
        let today = self.today();
        let max_amount = self.inner.config.max_amount;

        let outcome = self.commit(|state| {
            if state.editor.submitting {
                return Err(MutationOutcome::Ignored);
            }

            let valid = match draft.map(|d| validate_draft(d, max_amount, today)) {
                Some(Err(e)) => {
                    state.editor.error = Some(e.to_string());
                    return Err(MutationOutcome::Rejected(e));
                }
                Some(Ok(valid)) => Some(valid),
                None => None,
            };

            state.editor.submitting = true;
            state.editor.error = None;
            Ok(valid)
        });

        match &outcome {
            Err(MutationOutcome::Ignored) => {
                warn!("⚠️ A write is already in flight, ignoring submit")
            }
            Err(MutationOutcome::Rejected(e)) => info!("🚫 Draft rejected: {}", e),
            _ => {}
        }
        outcome
    }

    async fn finish_write(
        &self,
        kind: MutationKind,
        result: Result<(), ApiError>,
    ) -> MutationOutcome {
        match result {
            Ok(()) => {
                info!("✅ {:?} succeeded, refreshing", kind);
                self.commit(|state| state.editor.close());
                self.sync(false).await;
                MutationOutcome::Completed
            }
            Err(e) => {
                error!("❌ {:?} failed: {}", kind, e);
                self.commit(|state| {
                    state.editor.submitting = false;
                    state.editor.error = Some(kind.failure_message().to_string());
                });
                MutationOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{expense, harness, Call};
    use crate::throttle::KeyValueStore;

    fn draft(amount: &str, description: &str) -> ExpenseDraft {
        ExpenseDraft {
            amount: amount.to_string(),
            description: description.to_string(),
            date: String::new(),
            category: String::new(),
        }
    }

    fn max() -> Decimal {
        Decimal::new(9_999_999_999, 2)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_validate_amount_bounds() {
        assert_eq!(
            validate_draft(&draft("-5", "Coffee"), max(), today()),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            validate_draft(&draft("0", "Coffee"), max(), today()),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            validate_draft(&draft("100000000", "Coffee"), max(), today()),
            Err(ValidationError::AmountTooLarge("99,999,999.99".to_string()))
        );
        assert!(validate_draft(&draft("99999999.99", "Coffee"), max(), today()).is_ok());
        assert!(matches!(
            validate_draft(&draft("ten", "Coffee"), max(), today()),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let mut input = draft(" 10.50 ", "  Coffee ");
        input.category = "   ".to_string();
        let valid = validate_draft(&input, max(), today()).unwrap();
        assert_eq!(valid.amount, Decimal::new(1050, 2));
        assert_eq!(valid.description, "Coffee");
        assert_eq!(valid.date, today());
        assert_eq!(valid.category, None);

        input.date = "2025-02-28".to_string();
        input.category = " Food ".to_string();
        let valid = validate_draft(&input, max(), today()).unwrap();
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(valid.category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_validate_description_and_date() {
        assert_eq!(
            validate_draft(&draft("5", "   "), max(), today()),
            Err(ValidationError::EmptyDescription)
        );
        let mut input = draft("5", "Taxi");
        input.date = "12/03/2025".to_string();
        assert_eq!(
            validate_draft(&input, max(), today()),
            Err(ValidationError::InvalidDate("12/03/2025".to_string()))
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(Decimal::new(9_999_999_999, 2)), "99,999,999.99");
        assert_eq!(group_thousands(Decimal::new(100, 0)), "100.00");
        assert_eq!(group_thousands(Decimal::new(123456, 1)), "12,345.60");
    }

    #[tokio::test]
    async fn test_rejected_draft_sends_nothing() {
        let h = harness();
        h.dashboard.open_create();
        h.dashboard.edit_draft(DraftField::Amount, "-5");
        h.dashboard.edit_draft(DraftField::Description, "Coffee");

        let outcome = h.dashboard.submit_create().await;
        assert_eq!(outcome, MutationOutcome::Rejected(ValidationError::AmountNotPositive));
        assert!(h.api.calls().is_empty());

        let editor = h.dashboard.snapshot().editor;
        assert!(editor.is_open());
        assert!(!editor.submitting);
        assert_eq!(editor.error.as_deref(), Some("Amount must be greater than 0."));

        // typing again clears the message
        h.dashboard.edit_draft(DraftField::Amount, "5");
        assert_eq!(h.dashboard.snapshot().editor.error, None);
    }

    #[tokio::test]
    async fn test_create_success_closes_editor_and_refreshes_unforced() {
        let h = harness();
        h.dashboard.mount().await;
        h.api.clear_calls();

        h.dashboard.open_create();
        h.dashboard.edit_draft(DraftField::Amount, "10.50");
        h.dashboard.edit_draft(DraftField::Description, "Coffee");

        let outcome = h.dashboard.submit_create().await;
        assert!(outcome.is_completed());

        let calls = h.api.calls();
        assert_eq!(
            calls[0],
            Call::Create(CreateExpenseRequest {
                amount: Decimal::new(1050, 2),
                description: "Coffee".to_string(),
                date: today(),
                category: None,
            })
        );
        assert_eq!(h.api.list_calls().len(), 1);
        assert_eq!(h.api.summary_calls().len(), 1);
        // the insight was fetched at mount and the refresh is not forced
        assert!(h.api.insight_calls().is_empty());

        let state = h.dashboard.snapshot();
        assert_eq!(state.editor, EditorState::default());
        assert!(state.summary.is_some());
    }

    #[tokio::test]
    async fn test_failed_create_keeps_editor_open() {
        let h = harness();
        h.api.push_write(Err(ApiError::from_status(500, "boom")));
        h.dashboard.open_create();
        h.dashboard.edit_draft(DraftField::Amount, "12");
        h.dashboard.edit_draft(DraftField::Description, "Lunch");

        let outcome = h.dashboard.submit_create().await;
        assert!(matches!(outcome, MutationOutcome::Failed(_)));

        let state = h.dashboard.snapshot();
        assert!(state.editor.is_open());
        assert!(!state.editor.submitting);
        assert_eq!(state.editor.draft.description, "Lunch");
        assert_eq!(
            state.editor.error.as_deref(),
            Some("Failed to add expense. Please try again.")
        );
        assert!(h.api.list_calls().is_empty());
    }

    #[tokio::test]
    async fn test_resubmit_while_in_flight_is_ignored() {
        let h = harness();
        let write_tx = h.api.defer_write();
        h.dashboard.open_create();
        h.dashboard.edit_draft(DraftField::Amount, "10.50");
        h.dashboard.edit_draft(DraftField::Description, "Coffee");

        let second = async {
            tokio::task::yield_now().await;
            assert!(h.dashboard.snapshot().editor.submitting);
            let outcome = h.dashboard.submit_create().await;
            assert_eq!(outcome, MutationOutcome::Ignored);

            h.dashboard.close_editor();
            assert!(h.dashboard.snapshot().editor.is_open());

            write_tx.send(Ok(expense(100, "Coffee", 1050))).unwrap();
        };

        let (first, _) = futures::join!(h.dashboard.submit_create(), second);
        assert!(first.is_completed());
        assert_eq!(h.api.write_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_submits_update_for_editing_id() {
        let h = harness();
        let mut existing = expense(7, "Cab", 25000);
        existing.date = Some(today());
        existing.category_name = Some("Transport".to_string());

        h.dashboard.open_edit(&existing);
        let draft = h.dashboard.snapshot().editor.draft;
        assert_eq!(draft.amount, "250.00");
        assert_eq!(draft.category, "Transport");

        h.dashboard.edit_draft(DraftField::Amount, "300");
        let outcome = h.dashboard.submit_edit().await;
        assert!(outcome.is_completed());
        assert_eq!(
            h.api.write_calls(),
            vec![Call::Update(
                7,
                UpdateExpenseRequest {
                    amount: Decimal::new(300, 0),
                    description: "Cab".to_string(),
                    date: today(),
                    category_name: Some("Transport".to_string()),
                }
            )]
        );
        assert!(!h.dashboard.snapshot().editor.is_open());
    }

    #[tokio::test]
    async fn test_delete_failure_and_retry() {
        let h = harness();
        h.api.push_delete(Err(ApiError::Network("offline".to_string())));
        h.dashboard.open_edit(&expense(3, "Rent", 90000));

        let outcome = h.dashboard.submit_delete().await;
        assert!(matches!(outcome, MutationOutcome::Failed(_)));
        let editor = h.dashboard.snapshot().editor;
        assert_eq!(editor.mode, EditorMode::Editing(3));
        assert_eq!(
            editor.error.as_deref(),
            Some("Failed to delete expense. Please try again.")
        );

        let outcome = h.dashboard.submit_delete().await;
        assert!(outcome.is_completed());
        assert_eq!(h.api.write_calls(), vec![Call::Delete(3), Call::Delete(3)]);
        assert_eq!(h.api.list_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_edit_without_editor_is_ignored() {
        let h = harness();
        assert_eq!(h.dashboard.submit_edit().await, MutationOutcome::Ignored);
        assert_eq!(h.dashboard.submit_delete().await, MutationOutcome::Ignored);
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_refresh_respects_throttle_window() {
        let h = harness();
        h.store.set("lastAIRequest", &h.now().to_string()).unwrap();
        let outcome = h.dashboard.create(draft("4", "Tea")).await;
        assert!(outcome.is_completed());
        assert!(h.api.insight_calls().is_empty());
    }
}
