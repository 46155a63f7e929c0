use dashboard_core::period::MonthOption;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MonthPickerProps {
    pub options: Vec<MonthOption>,
    /// Month shown as chosen; `None` leaves the placeholder selected
    pub selected: Option<(u32, i32)>,
    pub on_change: Callback<(u32, i32)>,
}

/// Option values are encoded as `YYYY-MM`
fn option_value(month: u32, year: i32) -> String {
    format!("{:04}-{:02}", year, month)
}

fn parse_option_value(value: &str) -> Option<(u32, i32)> {
    let (year, month) = value.split_once('-')?;
    Some((month.parse().ok()?, year.parse().ok()?))
}

#[function_component(MonthPicker)]
pub fn month_picker(props: &MonthPickerProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(choice) = parse_option_value(&select.value()) {
                on_change.emit(choice);
            }
        })
    };

    html! {
        <select class="month-picker" {onchange}>
            <option value="" selected={props.selected.is_none()} disabled=true>
                {"Pick a month"}
            </option>
            {for props.options.iter().map(|option| {
                let selected = props.selected == Some((option.month, option.year));
                html! {
                    <option value={option_value(option.month, option.year)} {selected}>
                        {&option.label}
                    </option>
                }
            })}
        </select>
    }
}
