pub mod expenses;
pub mod header;
pub mod month_picker;
pub mod overview;
pub mod trends;

pub use header::Header;
