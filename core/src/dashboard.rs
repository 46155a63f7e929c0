//! # Dashboard Store
//!
//! The reactive store behind the expense dashboard. It owns the selection,
//! the cached responses and the editor, and notifies subscribers after every
//! change. Selection handlers live here; fetching lives in
//! [`crate::orchestrator`] and writes in [`crate::mutation`].
//!
//! ## Data Flow:
//! 1. A handler mutates the selection
//! 2. If the selection actually changed, a forced sync runs
//! 3. Each fetch commits its own result as it settles
//! 4. Subscribers re-read the snapshot and the derived view model

use crate::api::ExpenseApi;
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::period::{recent_months, resolve, MonthOption, PeriodMode, Selection};
use crate::state::DashboardState;
use crate::throttle::{InsightThrottle, KeyValueStore};
use crate::view_model::{reconcile, EffectiveViewModel};
use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Filter inputs on the expense list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Start,
    End,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn()>;

pub(crate) struct Inner {
    pub(crate) config: DashboardConfig,
    pub(crate) api: Rc<dyn ExpenseApi>,
    pub(crate) clock: Rc<dyn Clock>,
    pub(crate) throttle: InsightThrottle,
    state: RefCell<DashboardState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_listener: Cell<u64>,
    next_ticket: Cell<u64>,
}

/// Cheaply cloneable handle to the dashboard store
#[derive(Clone)]
pub struct Dashboard {
    pub(crate) inner: Rc<Inner>,
}

impl PartialEq for Dashboard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Dashboard {
    /// Create a store with the mount-time selection (current month)
    pub fn new(
        config: DashboardConfig,
        api: Rc<dyn ExpenseApi>,
        store: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let today = clock.today();
        let selection = Selection::monthly(today);
        let range = resolve(&selection, today);
        let throttle = InsightThrottle::new(
            store,
            config.throttle_storage_key.clone(),
            config.insight_throttle_ms,
        );

        Self {
            inner: Rc::new(Inner {
                config,
                api,
                clock,
                throttle,
                state: RefCell::new(DashboardState::new(selection, range)),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                next_ticket: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn today(&self) -> NaiveDate {
        self.inner.clock.today()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn selection(&self) -> Selection {
        self.inner.state.borrow().selection.clone()
    }

    /// Reconciled figures for the current snapshot
    pub fn view_model(&self) -> EffectiveViewModel {
        let state = self.inner.state.borrow();
        reconcile(
            state.summary.as_ref(),
            state.insight.as_ref(),
            &state.expenses,
        )
    }

    /// Months offered by the month picker, newest first
    pub fn month_options(&self) -> Vec<MonthOption> {
        recent_months(self.today(), self.inner.config.month_picker_len)
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Apply a state change and notify subscribers once the borrow is released
    pub(crate) fn commit<R>(&self, change: impl FnOnce(&mut DashboardState) -> R) -> R {
        let result = {
            let mut state = self.inner.state.borrow_mut();
            change(&mut state)
        };
        self.notify();
        result
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub(crate) fn next_ticket(&self) -> u64 {
        let ticket = self.inner.next_ticket.get() + 1;
        self.inner.next_ticket.set(ticket);
        ticket
    }

    /// Apply a selection change; runs a forced sync only if something changed
    async fn reselect(&self, change: impl FnOnce(&mut Selection, NaiveDate)) {
        let today = self.today();
        let changed = self.commit(|state| {
            let before = state.selection.clone();
            change(&mut state.selection, today);
            state.selection != before
        });
        if changed {
            self.sync(true).await;
        }
    }

    /// Initial load once the user is authenticated
    pub async fn mount(&self) {
        info!("📊 Mounting expense dashboard");
        self.sync(true).await;
    }

    /// Update a date bound or the search term of the expense filters
    ///
    /// Date values are `YYYY-MM-DD`; a blank value clears the bound and an
    /// unparseable one leaves the selection untouched. Setting
    /// either bound switches to the custom period; clearing both while custom
    /// falls back to the monthly period.
    pub async fn change_filter(&self, field: FilterField, value: &str) {
        let parsed = match field {
            FilterField::Search => None,
            FilterField::Start | FilterField::End => match parse_filter_date(value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("⚠️ Ignoring unparseable filter date {:?}: {}", value, e);
                    return;
                }
            },
        };
        let value = value.to_string();

        self.reselect(move |selection, today| match field {
            FilterField::Search => selection.search = value,
            FilterField::Start | FilterField::End => {
                if field == FilterField::Start {
                    selection.explicit_start = parsed;
                } else {
                    selection.explicit_end = parsed;
                }

                if selection.explicit_start.is_some() || selection.explicit_end.is_some() {
                    selection.mode = PeriodMode::Custom;
                } else if selection.mode == PeriodMode::Custom {
                    *selection = Selection {
                        search: std::mem::take(&mut selection.search),
                        ..Selection::monthly(today)
                    };
                }
            }
        })
        .await;
    }

    /// Pick a specific month from the month picker
    pub async fn change_month(&self, month: u32, year: i32) {
        self.reselect(|selection, today| selection.set_month(month, year, today))
            .await;
    }

    /// Switch between all-time and the current month
    pub async fn toggle_all_time(&self) {
        self.reselect(|selection, today| {
            if selection.mode == PeriodMode::All && !selection.has_explicit_range() {
                selection.set_month(today.month(), today.year(), today);
            } else {
                selection.mode = PeriodMode::All;
                selection.clear_explicit_range();
            }
        })
        .await;
    }

    /// Weekly / monthly pills; monthly means the current month
    pub async fn toggle_period(&self, mode: PeriodMode) {
        match mode {
            PeriodMode::Weekly => {
                self.reselect(|selection, _| {
                    selection.mode = PeriodMode::Weekly;
                    selection.clear_explicit_range();
                })
                .await
            }
            PeriodMode::Monthly => {
                self.reselect(|selection, today| {
                    selection.set_month(today.month(), today.year(), today)
                })
                .await
            }
            PeriodMode::All => self.toggle_all_time().await,
            PeriodMode::Custom => warn!("⚠️ Custom period is set through the date filters"),
        }
    }
}

/// `Ok(None)` for a blank value, which clears the bound
fn parse_filter_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map(Some)
}
