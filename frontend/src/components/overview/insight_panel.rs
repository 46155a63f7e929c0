use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InsightPanelProps {
    pub text: Option<String>,
    pub loading: bool,
}

#[function_component(InsightPanel)]
pub fn insight_panel(props: &InsightPanelProps) -> Html {
    html! {
        <div class="panel">
            <div class="panel-header">
                <h2 class="panel-title">{"AI insights"}</h2>
                <span class="panel-caption">{"Generated from your recent spending"}</span>
            </div>
            {match (&props.text, props.loading) {
                (Some(text), _) => html! { <div class="insight-text">{text}</div> },
                (None, true) => html! { <div class="skeleton-block" /> },
                (None, false) => html! {
                    <p class="empty-state">
                        {"Insights will appear here when there is enough data."}
                    </p>
                },
            }}
        </div>
    }
}
