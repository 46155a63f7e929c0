use dashboard_core::period::MonthOption;
use dashboard_core::{
    Dashboard, DashboardState, DraftField, EffectiveViewModel, FilterField, MutationOutcome,
    PeriodMode,
};
use shared::Expense;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Everything the page renders, mirrored from the dashboard store
#[derive(Clone, PartialEq)]
pub struct DashboardView {
    pub state: DashboardState,
    pub view_model: EffectiveViewModel,
    pub month_options: Vec<MonthOption>,
    pub caption: String,
    pub currency: String,
}

impl DashboardView {
    fn capture(dashboard: &Dashboard) -> Self {
        let state = dashboard.snapshot();
        let caption = state.selection.caption(dashboard.today());
        Self {
            view_model: dashboard.view_model(),
            month_options: dashboard.month_options(),
            caption,
            currency: dashboard.config().currency_symbol.clone(),
            state,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct UseDashboardActions {
    pub change_filter: Callback<(FilterField, String)>,
    pub change_month: Callback<(u32, i32)>,
    pub toggle_all_time: Callback<()>,
    pub toggle_period: Callback<PeriodMode>,
    pub open_create: Callback<()>,
    pub open_edit: Callback<Expense>,
    pub edit_draft: Callback<(DraftField, String)>,
    pub close_editor: Callback<()>,
    pub submit_create: Callback<()>,
    pub submit_edit: Callback<()>,
    pub submit_delete: Callback<()>,
}

pub struct UseDashboardResult {
    pub view: DashboardView,
    pub actions: UseDashboardActions,
}

fn report(action: &str, outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Completed => log::info!("✅ {} done", action),
        MutationOutcome::Ignored => log::debug!("{} ignored", action),
        MutationOutcome::Rejected(e) => log::debug!("{} rejected: {}", action, e),
        MutationOutcome::Failed(e) => log::warn!("⚠️ {} failed: {}", action, e),
    }
}

/// Subscribes to the store for the component's lifetime and mounts it once
#[hook]
pub fn use_dashboard(dashboard: &Dashboard) -> UseDashboardResult {
    let view = use_state(|| DashboardView::capture(dashboard));

    {
        let view = view.clone();
        use_effect_with(dashboard.clone(), move |dashboard| {
            let source = dashboard.clone();
            let id = dashboard.subscribe(move || view.set(DashboardView::capture(&source)));

            let mounted = dashboard.clone();
            spawn_local(async move { mounted.mount().await });

            let dashboard = dashboard.clone();
            move || dashboard.unsubscribe(id)
        });
    }

    let change_filter = {
        let dashboard = dashboard.clone();
        Callback::from(move |(field, value): (FilterField, String)| {
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.change_filter(field, &value).await });
        })
    };

    let change_month = {
        let dashboard = dashboard.clone();
        Callback::from(move |(month, year): (u32, i32)| {
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.change_month(month, year).await });
        })
    };

    let toggle_all_time = {
        let dashboard = dashboard.clone();
        Callback::from(move |_: ()| {
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.toggle_all_time().await });
        })
    };

    let toggle_period = {
        let dashboard = dashboard.clone();
        Callback::from(move |mode: PeriodMode| {
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.toggle_period(mode).await });
        })
    };

    let open_create = {
        let dashboard = dashboard.clone();
        Callback::from(move |_: ()| dashboard.open_create())
    };

    let open_edit = {
        let dashboard = dashboard.clone();
        Callback::from(move |expense: Expense| dashboard.open_edit(&expense))
    };

    let edit_draft = {
        let dashboard = dashboard.clone();
        Callback::from(move |(field, value): (DraftField, String)| {
            dashboard.edit_draft(field, value)
        })
    };

    let close_editor = {
        let dashboard = dashboard.clone();
        Callback::from(move |_: ()| dashboard.close_editor())
    };

    let submit_create = {
        let dashboard = dashboard.clone();
        Callback::from(move |_: ()| {
            let dashboard = dashboard.clone();
            spawn_local(async move { report("Add expense", dashboard.submit_create().await) });
        })
    };

    let submit_edit = {
        let dashboard = dashboard.clone();
        Callback::from(move |_: ()| {
            let dashboard = dashboard.clone();
            spawn_local(async move { report("Update expense", dashboard.submit_edit().await) });
        })
    };

    let submit_delete = {
        let dashboard = dashboard.clone();
        Callback::from(move |_: ()| {
            let dashboard = dashboard.clone();
            spawn_local(async move { report("Delete expense", dashboard.submit_delete().await) });
        })
    };

    UseDashboardResult {
        view: (*view).clone(),
        actions: UseDashboardActions {
            change_filter,
            change_month,
            toggle_all_time,
            toggle_period,
            open_create,
            open_edit,
            edit_draft,
            close_editor,
            submit_create,
            submit_edit,
            submit_delete,
        },
    }
}
