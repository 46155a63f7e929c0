use dashboard_core::{FilterField, PeriodMode, Selection};
use shared::Expense;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::date_utils::{format_table_date, to_input_value};
use crate::services::money::format_money;

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    pub expenses: Vec<Expense>,
    pub selection: Selection,
    pub loading: bool,
    pub error: Option<String>,
    pub currency: String,
    pub on_filter_change: Callback<(FilterField, String)>,
    pub on_all_time: Callback<()>,
    pub on_add: Callback<()>,
    pub on_edit: Callback<Expense>,
}

fn filter_input(
    field: FilterField,
    on_filter_change: &Callback<(FilterField, String)>,
) -> Callback<Event> {
    let on_filter_change = on_filter_change.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_filter_change.emit((field, input.value()));
    })
}

#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    let all_time_active =
        props.selection.mode == PeriodMode::All && !props.selection.has_explicit_range();

    let on_all_time = {
        let on_all_time = props.on_all_time.clone();
        Callback::from(move |_: MouseEvent| on_all_time.emit(()))
    };
    let on_add = {
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| on_add.emit(()))
    };

    html! {
        <div class="panel">
            <div class="panel-header">
                <h2 class="panel-title">{"Expenses"}</h2>
                <span class="panel-caption">{"Detailed list of your transactions"}</span>
                <button class="btn btn-primary" onclick={on_add}>{"+ Add expense"}</button>
            </div>

            <div class="filters-row">
                <div class="field">
                    <label class="field-label" for="start">{"From"}</label>
                    <input
                        id="start"
                        type="date"
                        class="input"
                        value={to_input_value(props.selection.explicit_start)}
                        onchange={filter_input(FilterField::Start, &props.on_filter_change)}
                    />
                </div>
                <div class="field">
                    <label class="field-label" for="end">{"To"}</label>
                    <input
                        id="end"
                        type="date"
                        class="input"
                        value={to_input_value(props.selection.explicit_end)}
                        onchange={filter_input(FilterField::End, &props.on_filter_change)}
                    />
                </div>
                <div class="field field-grow">
                    <label class="field-label" for="search">{"Search description"}</label>
                    <input
                        id="search"
                        type="text"
                        class="input"
                        placeholder="e.g. groceries, cab, rent..."
                        value={props.selection.search.clone()}
                        onchange={filter_input(FilterField::Search, &props.on_filter_change)}
                    />
                </div>
                <div class="field">
                    <button
                        class={classes!("pill", "all-time-btn", all_time_active.then_some("pill-active"))}
                        title="Show all expenses"
                        onclick={on_all_time}
                    >
                        {"All Time"}
                    </button>
                </div>
            </div>

            {if let Some(error) = props.error.as_ref() {
                html! { <div class="alert alert-error">{error}</div> }
            } else { html! {} }}

            {if props.loading && props.expenses.is_empty() {
                html! { <div class="skeleton-table" /> }
            } else if props.expenses.is_empty() && props.error.is_some() {
                html! {}
            } else if props.expenses.is_empty() {
                html! { <p class="empty-state">{"No expenses found for this view."}</p> }
            } else {
                html! {
                    <div class="table-wrapper">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Description"}</th>
                                    <th>{"Category"}</th>
                                    <th class="text-right">{"Amount"}</th>
                                    <th class="text-center">{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.expenses.iter().map(|expense| {
                                    let onclick = {
                                        let on_edit = props.on_edit.clone();
                                        let expense = expense.clone();
                                        Callback::from(move |_: MouseEvent| on_edit.emit(expense.clone()))
                                    };
                                    html! {
                                        <tr key={expense.id} class="expense-row">
                                            <td>{format_table_date(expense.date)}</td>
                                            <td>{expense.display_description()}</td>
                                            <td>{expense.display_category()}</td>
                                            <td class="text-right">{format_money(&props.currency, expense.amount)}</td>
                                            <td class="text-center">
                                                <button class="edit-btn" title="Edit expense" {onclick}>{"✏️"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </div>
    }
}
