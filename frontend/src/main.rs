use std::rc::Rc;

use dashboard_core::config::DEFAULT_API_BASE_URL;
use dashboard_core::{Dashboard, DashboardConfig, SystemClock};
use log::LevelFilter;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::expenses::{ExpenseList, ExpenseModal};
use components::overview::{CategoryBreakdown, InsightPanel, SummaryCards};
use components::trends::DailyTrendChart;
use components::Header;
use hooks::use_dashboard;
use services::{auth, HttpExpenseApi, LocalStorageStore, Logger};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Daily,
    Expenses,
}

impl Tab {
    fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Daily => "Daily trends",
            Tab::Expenses => "Expenses",
        }
    }
}

fn build_dashboard() -> Dashboard {
    let base_url = option_env!("EXPENSE_API_BASE").unwrap_or(DEFAULT_API_BASE_URL);
    let config = DashboardConfig::default().with_base_url(base_url);
    let api = HttpExpenseApi::new(config.api_base_url.clone());
    log::info!("🚀 Expense dashboard talking to {}", config.api_base_url);

    Dashboard::new(
        config,
        Rc::new(api),
        Rc::new(LocalStorageStore),
        Rc::new(SystemClock),
    )
}

#[derive(Properties, PartialEq)]
struct DashboardPageProps {
    dashboard: Dashboard,
}

#[function_component(DashboardPage)]
fn dashboard_page(props: &DashboardPageProps) -> Html {
    let dashboard = use_dashboard(&props.dashboard);
    let active_tab = use_state(|| Tab::Overview);
    let view = dashboard.view;
    let actions = dashboard.actions;
    let state = &view.state;
    let selection = &state.selection;

    let tab_button = |tab: Tab| {
        let active_tab = active_tab.clone();
        let active = *active_tab == tab;
        html! {
            <button
                class={classes!("tab", active.then_some("tab-active"))}
                onclick={Callback::from(move |_: MouseEvent| active_tab.set(tab))}
            >
                {tab.label()}
            </button>
        }
    };

    html! {
        <div class="app">
            <Header
                mode={selection.mode}
                custom_range={selection.has_explicit_range()}
                month={selection.month}
                year={selection.year}
                month_options={view.month_options.clone()}
                on_toggle_period={actions.toggle_period.clone()}
                on_change_month={actions.change_month.clone()}
            />

            <div class="tabs">
                {tab_button(Tab::Overview)}
                {tab_button(Tab::Daily)}
                {tab_button(Tab::Expenses)}
            </div>

            <main class="layout">
                {match *active_tab {
                    Tab::Overview => html! {
                        <>
                            <section class="layout-main">
                                <SummaryCards
                                    view_model={view.view_model.clone()}
                                    loading={state.loading.summary}
                                    caption={view.caption.clone()}
                                    currency={view.currency.clone()}
                                />
                            </section>
                            <aside class="layout-side">
                                <CategoryBreakdown
                                    slices={view.view_model.category_breakdown.clone()}
                                    currency={view.currency.clone()}
                                />
                                <InsightPanel
                                    text={view.view_model.insight_text.clone()}
                                    loading={state.loading.insight}
                                />
                            </aside>
                        </>
                    },
                    Tab::Daily => html! {
                        <section class="layout-full">
                            <DailyTrendChart
                                bars={view.view_model.daily_trend.clone()}
                                currency={view.currency.clone()}
                                loading={state.loading.insight}
                            />
                        </section>
                    },
                    Tab::Expenses => html! {
                        <section class="layout-full">
                            <ExpenseList
                                expenses={state.expenses.clone()}
                                selection={selection.clone()}
                                loading={state.loading.expenses}
                                error={state.error.clone()}
                                currency={view.currency.clone()}
                                on_filter_change={actions.change_filter.clone()}
                                on_all_time={actions.toggle_all_time.clone()}
                                on_add={actions.open_create.clone()}
                                on_edit={actions.open_edit.clone()}
                            />
                        </section>
                    },
                }}
            </main>

            <ExpenseModal
                editor={state.editor.clone()}
                on_change={actions.edit_draft.clone()}
                on_close={actions.close_editor.clone()}
                on_submit_create={actions.submit_create.clone()}
                on_submit_edit={actions.submit_edit.clone()}
                on_delete={actions.submit_delete.clone()}
            />
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let dashboard = use_memo((), |_| build_dashboard());

    if !auth::is_authenticated() {
        return html! {
            <div class="app">
                <div class="panel signed-out">
                    <h1 class="app-title">{"Expense Tracker"}</h1>
                    <p class="empty-state">{"Sign in to see your expenses."}</p>
                </div>
            </div>
        };
    }

    html! { <DashboardPage dashboard={(*dashboard).clone()} /> }
}

fn main() {
    Logger::init(LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
