use dashboard_core::PeriodMode;
use yew::prelude::*;

use super::month_picker::MonthPicker;
use dashboard_core::period::MonthOption;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub mode: PeriodMode,
    pub custom_range: bool,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub month_options: Vec<MonthOption>,
    pub on_toggle_period: Callback<PeriodMode>,
    pub on_change_month: Callback<(u32, i32)>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let pill = |mode: PeriodMode, label: &'static str| {
        let active = props.mode == mode && !props.custom_range;
        let onclick = {
            let on_toggle_period = props.on_toggle_period.clone();
            Callback::from(move |_: MouseEvent| on_toggle_period.emit(mode))
        };
        html! {
            <button class={classes!("pill", active.then_some("pill-active"))} {onclick}>
                {label}
            </button>
        }
    };

    html! {
        <header class="app-header">
            <div>
                <h1 class="app-title">{"Expense Tracker"}</h1>
                <p class="app-subtitle">
                    {"A clean dashboard to understand and reflect on your spending."}
                </p>
            </div>

            <div class="period-toggle">
                {pill(PeriodMode::Weekly, "Weekly")}
                {pill(PeriodMode::Monthly, "Monthly")}
                <MonthPicker
                    options={props.month_options.clone()}
                    selected={match (props.mode, props.month, props.year) {
                        (PeriodMode::Monthly, Some(m), Some(y)) if !props.custom_range => Some((m, y)),
                        _ => None,
                    }}
                    on_change={props.on_change_month.clone()}
                />
            </div>
        </header>
    }
}
