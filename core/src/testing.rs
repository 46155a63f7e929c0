//! Scripted backend and fixtures for the dashboard tests

use crate::api::{ExpenseApi, ExpenseQuery, PeriodQuery};
use crate::clock::{Clock, FixedClock};
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::errors::ApiError;
use crate::throttle::InMemoryStore;
use async_trait::async_trait;
use futures::channel::oneshot;
use rust_decimal::Decimal;
use shared::{
    CategoryTotal, CreateExpenseRequest, Expense, Insight, InsightBody, InsightCards, Summary,
    UpdateExpenseRequest,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub(crate) type Reply<T> = Result<T, ApiError>;

/// A scripted response: settled immediately or released later by the test
pub(crate) enum Scripted<T> {
    Ready(Reply<T>),
    Deferred(oneshot::Receiver<Reply<T>>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List(ExpenseQuery),
    Create(CreateExpenseRequest),
    Update(i64, UpdateExpenseRequest),
    Delete(i64),
    Summary(PeriodQuery),
    Insights(PeriodQuery),
}

/// Backend double; an empty queue answers with a successful default
#[derive(Default)]
pub(crate) struct MockApi {
    expenses: RefCell<VecDeque<Scripted<Vec<Expense>>>>,
    summaries: RefCell<VecDeque<Scripted<Summary>>>,
    insights: RefCell<VecDeque<Scripted<Insight>>>,
    writes: RefCell<VecDeque<Scripted<Expense>>>,
    deletes: RefCell<VecDeque<Scripted<()>>>,
    calls: RefCell<Vec<Call>>,
}

fn defer<T>(queue: &RefCell<VecDeque<Scripted<T>>>) -> oneshot::Sender<Reply<T>> {
    let (tx, rx) = oneshot::channel();
    queue.borrow_mut().push_back(Scripted::Deferred(rx));
    tx
}

async fn settle<T>(next: Option<Scripted<T>>, fallback: impl FnOnce() -> T) -> Reply<T> {
    match next {
        None => Ok(fallback()),
        Some(Scripted::Ready(reply)) => reply,
        Some(Scripted::Deferred(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(ApiError::Network("request dropped".to_string()))),
    }
}

impl MockApi {
    pub fn push_expenses(&self, reply: Reply<Vec<Expense>>) {
        self.expenses.borrow_mut().push_back(Scripted::Ready(reply));
    }

    pub fn push_summary(&self, reply: Reply<Summary>) {
        self.summaries.borrow_mut().push_back(Scripted::Ready(reply));
    }

    pub fn push_insight(&self, reply: Reply<Insight>) {
        self.insights.borrow_mut().push_back(Scripted::Ready(reply));
    }

    pub fn push_write(&self, reply: Reply<Expense>) {
        self.writes.borrow_mut().push_back(Scripted::Ready(reply));
    }

    pub fn push_delete(&self, reply: Reply<()>) {
        self.deletes.borrow_mut().push_back(Scripted::Ready(reply));
    }

    pub fn defer_expenses(&self) -> oneshot::Sender<Reply<Vec<Expense>>> {
        defer(&self.expenses)
    }

    pub fn defer_summary(&self) -> oneshot::Sender<Reply<Summary>> {
        defer(&self.summaries)
    }

    pub fn defer_insight(&self) -> oneshot::Sender<Reply<Insight>> {
        defer(&self.insights)
    }

    pub fn defer_write(&self) -> oneshot::Sender<Reply<Expense>> {
        defer(&self.writes)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn list_calls(&self) -> Vec<ExpenseQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn summary_calls(&self) -> Vec<PeriodQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Summary(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn insight_calls(&self) -> Vec<PeriodQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Insights(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl ExpenseApi for MockApi {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, ApiError> {
        self.record(Call::List(query.clone()));
        let next = self.expenses.borrow_mut().pop_front();
        settle(next, Vec::new).await
    }

    async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        self.record(Call::Create(request.clone()));
        let next = self.writes.borrow_mut().pop_front();
        let echo = Expense {
            id: 100,
            amount: request.amount,
            description: Some(request.description.clone()),
            date: Some(request.date),
            category_name: request.category.clone(),
        };
        settle(next, move || echo).await
    }

    async fn update_expense(
        &self,
        id: i64,
        request: &UpdateExpenseRequest,
    ) -> Result<Expense, ApiError> {
        self.record(Call::Update(id, request.clone()));
        let next = self.writes.borrow_mut().pop_front();
        let echo = Expense {
            id,
            amount: request.amount,
            description: Some(request.description.clone()),
            date: Some(request.date),
            category_name: request.category_name.clone(),
        };
        settle(next, move || echo).await
    }

    async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        self.record(Call::Delete(id));
        let next = self.deletes.borrow_mut().pop_front();
        settle(next, || ()).await
    }

    async fn summary(&self, query: &PeriodQuery) -> Result<Summary, ApiError> {
        self.record(Call::Summary(query.clone()));
        let next = self.summaries.borrow_mut().pop_front();
        let range = query.range;
        settle(next, move || Summary {
            start: range.start,
            end: range.end,
            ..sample_summary()
        })
        .await
    }

    async fn insights(&self, query: &PeriodQuery) -> Result<Insight, ApiError> {
        self.record(Call::Insights(query.clone()));
        let next = self.insights.borrow_mut().pop_front();
        settle(next, sample_insight).await
    }
}

pub(crate) fn expense(id: i64, description: &str, amount: i64) -> Expense {
    Expense {
        id,
        amount: Decimal::new(amount, 2),
        description: Some(description.to_string()),
        date: None,
        category_name: None,
    }
}

pub(crate) fn sample_summary() -> Summary {
    Summary {
        period: Some("monthly".to_string()),
        start: None,
        end: None,
        total: Some(Decimal::new(15000, 2)),
        by_category: vec![CategoryTotal {
            id: Some(1),
            name: "Food".to_string(),
            total: Decimal::new(15000, 2),
        }],
        count: None,
    }
}

pub(crate) fn sample_insight() -> Insight {
    Insight {
        summary: None,
        cards: Some(InsightCards {
            total_spent: Some(Decimal::new(15000, 2)),
            top_category: Some("Food".to_string()),
        }),
        insight: Some(InsightBody::Text("You spent most on food.".to_string())),
        charts: None,
    }
}

pub(crate) struct Harness {
    pub dashboard: Dashboard,
    pub api: Rc<MockApi>,
    pub clock: Rc<FixedClock>,
    pub store: InMemoryStore,
}

pub(crate) fn harness_at(year: i32, month: u32, day: u32) -> Harness {
    let api = Rc::new(MockApi::default());
    let clock = Rc::new(FixedClock::at_date(year, month, day));
    let store = InMemoryStore::new();
    let dashboard = Dashboard::new(
        DashboardConfig::default(),
        api.clone(),
        Rc::new(store.clone()),
        clock.clone(),
    );
    Harness {
        dashboard,
        api,
        clock,
        store,
    }
}

pub(crate) fn harness() -> Harness {
    harness_at(2025, 3, 12)
}

impl Harness {
    /// A second dashboard sharing this harness's backend, clock and store
    pub fn sibling(&self) -> Dashboard {
        Dashboard::new(
            DashboardConfig::default(),
            self.api.clone(),
            Rc::new(self.store.clone()),
            self.clock.clone(),
        )
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }
}
