use dashboard_core::CategorySlice;
use yew::prelude::*;

use crate::services::money::{format_money, format_percent};

#[derive(Properties, PartialEq)]
pub struct CategoryBreakdownProps {
    pub slices: Vec<CategorySlice>,
    pub currency: String,
}

/// CSS conic gradient with one segment per slice, in row order
pub fn pie_gradient(slices: &[CategorySlice]) -> String {
    let mut start = 0.0;
    let segments: Vec<String> = slices
        .iter()
        .map(|slice| {
            let end = start + slice.percent;
            let segment = format!("{} {:.2}% {:.2}%", slice.color, start, end);
            start = end;
            segment
        })
        .collect();
    format!("conic-gradient({})", segments.join(","))
}

#[function_component(CategoryBreakdown)]
pub fn category_breakdown(props: &CategoryBreakdownProps) -> Html {
    html! {
        <div class="panel">
            <div class="panel-header">
                <h2 class="panel-title">{"Category breakdown"}</h2>
                <span class="panel-caption">{"Where your money goes"}</span>
            </div>

            {if props.slices.is_empty() {
                html! { <p class="empty-state">{"No category data yet."}</p> }
            } else {
                html! {
                    <>
                        <div class="pie-chart" style={format!("background-image: {}", pie_gradient(&props.slices))} />
                        <ul class="category-list">
                            {for props.slices.iter().map(|slice| html! {
                                <li key={slice.key.clone()} class="category-item">
                                    <div class="category-main">
                                        <span class="category-name">
                                            <span class="pie-legend-dot" style={format!("background-color: {}", slice.color)} />
                                            {&slice.name}
                                        </span>
                                        <span class="category-amount">
                                            {format_money(&props.currency, slice.total)}
                                        </span>
                                    </div>
                                    <div class="category-bar-row">
                                        <div class="category-bar-track">
                                            <div class="category-bar-fill" style={format!("width: {:.1}%", slice.bar_width)} />
                                        </div>
                                        <span class="category-percent">{format_percent(slice.percent)}</span>
                                    </div>
                                </li>
                            })}
                        </ul>
                    </>
                }
            }}
        </div>
    }
}
