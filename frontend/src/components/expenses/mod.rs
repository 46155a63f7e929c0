pub mod expense_list;
pub mod expense_modal;

pub use expense_list::ExpenseList;
pub use expense_modal::ExpenseModal;
