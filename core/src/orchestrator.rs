//! # Fetch Orchestration
//!
//! A sync issues the expense list, summary and insight requests concurrently.
//! Each one owns its loading flag and commits as soon as it settles, so a slow
//! insight never holds back the table or the cards.
//!
//! Requests carry a ticket. When a newer request for the same resource has
//! been issued in the meantime, the older response is dropped instead of
//! overwriting fresher data.

use crate::api::{ExpenseQuery, PeriodQuery};
use crate::dashboard::Dashboard;
use crate::period::resolve;
use log::{debug, error, info, warn};

/// Banner shown when the expense list cannot be loaded
pub const EXPENSE_LIST_ERROR: &str = "Something went wrong while loading your expenses.";

struct SyncPlan {
    ticket: u64,
    fetch_insight: bool,
    expense_query: ExpenseQuery,
    period_query: PeriodQuery,
}

impl Dashboard {
    /// Refresh all three resources for the current selection
    ///
    /// `force` bypasses the insight throttle and blanks the summary and the
    /// insight until their new responses arrive; it is set whenever the
    /// selection changed.
    pub async fn sync(&self, force: bool) {
        let today = self.inner.clock.today();
        let now = self.inner.clock.now_millis();
        let fetch_insight = self.inner.throttle.allows(force, now);
        let ticket = self.next_ticket();

        let plan = self.commit(|state| {
            let range = resolve(&state.selection, today);
            state.range = range;

            state.tickets.expenses = ticket;
            state.tickets.summary = ticket;
            state.loading.expenses = true;
            state.loading.summary = true;
            state.error = None;
            if force {
                state.summary = None;
            }

            if fetch_insight {
                state.tickets.insight = ticket;
                state.loading.insight = true;
                if force {
                    state.insight = None;
                }
            }

            SyncPlan {
                ticket,
                fetch_insight,
                expense_query: ExpenseQuery::for_selection(&state.selection, range),
                period_query: PeriodQuery::for_selection(&state.selection, range),
            }
        });

        info!(
            "🔄 Sync #{} ({}) force={} insight={}",
            plan.ticket, plan.period_query.period, force, plan.fetch_insight
        );

        let insight = async {
            if plan.fetch_insight {
                self.fetch_insight(plan.ticket, &plan.period_query).await;
            }
        };

        futures::join!(
            self.fetch_expenses(plan.ticket, &plan.expense_query),
            self.fetch_summary(plan.ticket, &plan.period_query),
            insight,
        );
    }

    async fn fetch_expenses(&self, ticket: u64, query: &ExpenseQuery) {
        let result = self.inner.api.list_expenses(query).await;
        self.commit(|state| {
            if state.tickets.expenses != ticket {
                debug!("Dropping stale expense list from sync #{}", ticket);
                return;
            }
            state.loading.expenses = false;
            match result {
                Ok(expenses) => {
                    debug!("📋 Loaded {} expenses", expenses.len());
                    state.expenses = expenses;
                }
                Err(e) => {
                    error!("❌ Failed to fetch expenses: {}", e);
                    state.error = Some(EXPENSE_LIST_ERROR.to_string());
                }
            }
        });
    }

    async fn fetch_summary(&self, ticket: u64, query: &PeriodQuery) {
        let result = self.inner.api.summary(query).await;
        self.commit(|state| {
            if state.tickets.summary != ticket {
                debug!("Dropping stale summary from sync #{}", ticket);
                return;
            }
            state.loading.summary = false;
            match result {
                Ok(summary) => state.summary = Some(summary),
                Err(e) => warn!("⚠️ Failed to fetch summary: {}", e),
            }
        });
    }

    async fn fetch_insight(&self, ticket: u64, query: &PeriodQuery) {
        let result = self.inner.api.insights(query).await;
        if result.is_ok() {
            self.inner
                .throttle
                .record_success(self.inner.clock.now_millis());
        }

        self.commit(|state| {
            if state.tickets.insight != ticket {
                debug!("Dropping stale insight from sync #{}", ticket);
                return;
            }
            state.loading.insight = false;
            match result {
                Ok(insight) => state.insight = Some(insight),
                Err(e) => warn!("⚠️ Failed to fetch insight: {}", e),
            }
        });
    }
}
