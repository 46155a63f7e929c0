pub mod daily_trend_chart;

pub use daily_trend_chart::DailyTrendChart;
