//! # Dashboard Core
//!
//! Framework-independent controller behind the expense dashboard: period
//! resolution, the throttled insight gate, concurrent fetch orchestration,
//! view-model reconciliation and the expense editor. The browser frontend
//! supplies the transport ([`ExpenseApi`]), the persistence
//! ([`KeyValueStore`]) and the [`Clock`]; tests supply in-memory doubles.

pub mod api;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod mutation;
pub mod orchestrator;
pub mod period;
pub mod state;
pub mod throttle;
pub mod view_model;

#[cfg(test)]
mod testing;

pub use api::{ExpenseApi, ExpenseQuery, PeriodQuery};
pub use clock::{Clock, SystemClock};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, FilterField, SubscriptionId};
pub use errors::{ApiError, StorageError, ValidationError};
pub use mutation::{MutationKind, MutationOutcome};
pub use period::{MonthOption, PeriodMode, ResolvedRange, Selection};
pub use state::{DashboardState, DraftField, EditorMode, EditorState, ExpenseDraft, LoadingFlags};
pub use throttle::{InMemoryStore, KeyValueStore};
pub use view_model::{CategorySlice, EffectiveViewModel, TrendBar};
