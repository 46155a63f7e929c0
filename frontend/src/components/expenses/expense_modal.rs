use dashboard_core::{DraftField, EditorMode, EditorState};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseModalProps {
    pub editor: EditorState,
    pub on_change: Callback<(DraftField, String)>,
    pub on_close: Callback<()>,
    pub on_submit_create: Callback<()>,
    pub on_submit_edit: Callback<()>,
    pub on_delete: Callback<()>,
}

/// Label of the primary button for the current editor state
pub fn submit_label(mode: EditorMode, submitting: bool) -> &'static str {
    let editing = matches!(mode, EditorMode::Editing(_));
    match (editing, submitting) {
        (true, true) => "Updating...",
        (true, false) => "Update",
        (false, true) => "Adding...",
        (false, false) => "Add Expense",
    }
}

fn field_input(
    field: DraftField,
    on_change: &Callback<(DraftField, String)>,
) -> Callback<InputEvent> {
    let on_change = on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_change.emit((field, input.value()));
    })
}

#[function_component(ExpenseModal)]
pub fn expense_modal(props: &ExpenseModalProps) -> Html {
    let editor = &props.editor;
    if !editor.is_open() {
        return html! {};
    }

    let editing = matches!(editor.mode, EditorMode::Editing(_));
    let draft = &editor.draft;

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    let onsubmit = {
        let on_submit = if editing {
            props.on_submit_edit.clone()
        } else {
            props.on_submit_create.clone()
        };
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    html! {
        <div class="modal-overlay" onclick={close.clone()}>
            <div class="modal-content" onclick={keep_open}>
                <div class="modal-header">
                    <h2 class="modal-title">{if editing { "Edit Expense" } else { "Add New Expense" }}</h2>
                    <button class="modal-close" onclick={close.clone()}>{"×"}</button>
                </div>

                <form class="expense-form" {onsubmit}>
                    <div class="form-row">
                        <div class="field">
                            <label class="field-label" for="amount">{"Amount *"}</label>
                            <input
                                id="amount"
                                type="number"
                                step="0.01"
                                min="0"
                                max="99999999.99"
                                placeholder="0.00"
                                class="input"
                                value={draft.amount.clone()}
                                oninput={field_input(DraftField::Amount, &props.on_change)}
                            />
                        </div>
                        <div class="field">
                            <label class="field-label" for="date">{"Date"}</label>
                            <input
                                id="date"
                                type="date"
                                class="input"
                                value={draft.date.clone()}
                                oninput={field_input(DraftField::Date, &props.on_change)}
                            />
                        </div>
                    </div>

                    <div class="field">
                        <label class="field-label" for="description">{"Description *"}</label>
                        <input
                            id="description"
                            type="text"
                            placeholder="e.g. Groceries, Coffee, Taxi..."
                            class="input"
                            value={draft.description.clone()}
                            oninput={field_input(DraftField::Description, &props.on_change)}
                        />
                    </div>

                    <div class="field">
                        <label class="field-label" for="category">
                            {if editing { "Category" } else { "Category (Optional)" }}
                        </label>
                        <input
                            id="category"
                            type="text"
                            placeholder="e.g. Food, Transport, Entertainment..."
                            class="input"
                            value={draft.category.clone()}
                            oninput={field_input(DraftField::Category, &props.on_change)}
                        />
                    </div>

                    {if let Some(error) = editor.error.as_ref() {
                        html! { <div class="alert alert-error">{error}</div> }
                    } else { html! {} }}

                    <div class="form-actions">
                        {if editing {
                            html! {
                                <button type="button" class="btn btn-danger" disabled={editor.submitting} onclick={delete}>
                                    {if editor.submitting { "Deleting..." } else { "Delete" }}
                                </button>
                            }
                        } else { html! {} }}
                        <div class={classes!(editing.then_some("form-actions-right"))}>
                            <button type="button" class="btn btn-secondary" disabled={editor.submitting} onclick={close}>
                                {"Cancel"}
                            </button>
                            <button type="submit" class="btn btn-primary" disabled={editor.submitting}>
                                {submit_label(editor.mode, editor.submitting)}
                            </button>
                        </div>
                    </div>
                </form>
            </div>
        </div>
    }
}
