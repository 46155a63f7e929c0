pub mod api;
pub mod auth;
pub mod date_utils;
pub mod logging;
pub mod money;
pub mod storage;

pub use api::HttpExpenseApi;
pub use logging::Logger;
pub use storage::LocalStorageStore;
