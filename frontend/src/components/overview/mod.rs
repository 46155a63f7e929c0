pub mod category_breakdown;
pub mod insight_panel;
pub mod summary_cards;

pub use category_breakdown::CategoryBreakdown;
pub use insight_panel::InsightPanel;
pub use summary_cards::SummaryCards;
