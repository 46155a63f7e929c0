use dashboard_core::EffectiveViewModel;
use yew::prelude::*;

use crate::services::date_utils::format_range;
use crate::services::money::format_optional_money;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub view_model: EffectiveViewModel,
    /// Summary request still in flight
    pub loading: bool,
    /// "this week", "Mar 2025", ...
    pub caption: String,
    pub currency: String,
}

fn card_value(loading: bool, value: String) -> Html {
    if loading {
        html! { <span class="card-loading">{"Loading..."}</span> }
    } else {
        html! { {value} }
    }
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let vm = &props.view_model;
    let range = vm
        .effective_summary
        .as_ref()
        .and_then(|s| format_range(s.start, s.end));

    html! {
        <div class="cards-grid">
            <div class="card">
                <div class="card-label">{format!("Total spent ({})", props.caption)}</div>
                <div class="card-value">
                    {card_value(props.loading, format_optional_money(&props.currency, vm.total_spent))}
                </div>
                {if let Some(range) = range {
                    html! { <div class="card-caption">{range}</div> }
                } else { html! {} }}
            </div>

            <div class="card">
                <div class="card-label">{"Top category"}</div>
                <div class="card-value">
                    {card_value(
                        props.loading,
                        vm.top_category.clone().unwrap_or_else(|| "No data".to_string()),
                    )}
                </div>
            </div>

            <div class="card">
                <div class="card-label">{"Total expenses"}</div>
                <div class="card-value">
                    {card_value(props.loading, vm.expense_count.to_string())}
                </div>
                <div class="card-caption">{&props.caption}</div>
            </div>
        </div>
    }
}
