//! Editable Rows View
//!
//! Renders a `RowTable` at the end of an existing table body: committed rows
//! as plain text, the draft row with its controls, and a Save/Cancel action
//! row below it.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::custom_input::is_custom;
use crate::descriptor::{ColumnSpec, ControlKind};
use crate::table::{CommittedRow, ConfirmSave, DraftCell, RowError, RowTable};

/// Mount the rows of `table` into `body` and bind `create_button` to
/// `create_row`. Server-rendered rows already in `body` are left untouched.
pub fn attach(body: HtmlElement, create_button: &Element, table: RwSignal<RowTable>, on_reject: Callback<RowError>) {
    leptos::mount::mount_to(body, move || view! { <EditableRows table=table on_reject=on_reject /> }).forget();

    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        ev.prevent_default();
        match table.try_update(|t| t.create_row()) {
            Some(Ok(key)) => log::debug!("[ROWS] Created draft row {}", key),
            Some(Err(err)) => log::debug!("[ROWS] Ignoring create: {}", err),
            None => {}
        }
    });
    let _ = create_button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

/// `window.confirm`; declines when no window is available
struct WindowConfirm;

impl ConfirmSave for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Committed rows followed by the draft (if any)
#[component]
pub fn EditableRows(
    table: RwSignal<RowTable>,
    #[prop(into)] on_reject: Callback<RowError>,
) -> impl IntoView {
    let draft_key = Memo::new(move |_| table.with(|t| t.draft_key()));

    view! {
        <For
            each=move || table.with(|t| t.committed().to_vec())
            key=|row| row.key
            children=move |row| view! { <CommittedRowView row=row /> }
        />
        // Keyed on the draft so typing never re-renders the controls
        {move || draft_key.get().map(|_| view! { <DraftRowView table=table on_reject=on_reject /> })}
    }
}

#[component]
fn CommittedRowView(row: CommittedRow) -> impl IntoView {
    view! {
        <tr class="committed-row">
            {row.cells.into_iter().map(|cell| view! {
                <td>
                    {cell.text}
                    {cell.fields.into_iter().map(|(name, value)| view! {
                        <input type="hidden" name=name value=value />
                    }).collect_view()}
                </td>
            }).collect_view()}
        </tr>
    }
}

#[component]
fn DraftRowView(table: RwSignal<RowTable>, on_reject: Callback<RowError>) -> impl IntoView {
    let (columns, cells) = table.with_untracked(|t| {
        (
            t.descriptor().columns.clone(),
            t.draft().map(|d| d.cells().to_vec()).unwrap_or_default(),
        )
    });
    let span = columns.len().max(1).to_string();

    let on_save = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        match table.try_update(|t| t.save_confirmed(&WindowConfirm).map(|row| row.map(|r| r.key))) {
            Some(Ok(Some(key))) => log::debug!("[ROWS] Committed row {}", key),
            Some(Ok(None)) => log::debug!("[ROWS] Save declined"),
            Some(Err(err)) => on_reject.run(err),
            None => {}
        }
    };

    let on_cancel = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        table.update(|t| {
            t.cancel();
        });
    };

    let cell_views = columns
        .into_iter()
        .zip(cells)
        .enumerate()
        .map(|(index, (column, cell))| draft_cell(table, index, column, cell))
        .collect_view();

    view! {
        <tr class="editable-row">{cell_views}</tr>
        <tr class="row-actions">
            <td colspan=span style="text-align: right; padding-top: 5px;">
                <button type="button" class="save-btn" on:click=on_save>"Save"</button>
                <button type="button" class="cancel-btn" on:click=on_cancel>"Cancel"</button>
            </td>
        </tr>
    }
}

fn draft_cell(table: RwSignal<RowTable>, index: usize, column: ColumnSpec, cell: DraftCell) -> AnyView {
    let set_value = move |value: String| {
        table.update_untracked(|t| {
            let _ = t.set_value(index, value);
        });
    };
    let options = column.rendered_options();

    match column.kind {
        ControlKind::Text { placeholder, .. } => view! {
            <td>
                <input
                    type="text"
                    placeholder=placeholder
                    value=cell.value
                    on:input=move |ev| set_value(event_target_value(&ev))
                />
            </td>
        }
        .into_any(),
        ControlKind::Number { .. } => view! {
            <td>
                <input
                    type="number"
                    min="0"
                    step="1"
                    value=cell.value
                    on:input=move |ev| set_value(event_target_value(&ev))
                />
            </td>
        }
        .into_any(),
        ControlKind::Select { custom, .. } => {
            let selected = RwSignal::new(cell.value.clone());
            let custom_text = RwSignal::new(cell.custom.clone());
            let initial = cell.value;
            let option_views = options
                .into_iter()
                .map(|o| {
                    let is_selected = o.value == initial;
                    view! { <option value=o.value selected=is_selected>{o.label}</option> }
                })
                .collect_view();

            view! {
                <td>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_value(value.clone());
                        let custom_now = table.with_untracked(|t| {
                            t.draft()
                                .and_then(|d| d.cells().get(index))
                                .map(|c| c.custom.clone())
                                .unwrap_or_default()
                        });
                        custom_text.set(custom_now);
                        selected.set(value);
                    }>
                        {option_views}
                    </select>
                    {custom.map(|field| view! {
                        <input
                            type="text"
                            placeholder=field.placeholder
                            style:display=move || if is_custom(&selected.get()) { "block" } else { "none" }
                            prop:value=move || custom_text.get()
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                custom_text.set(text.clone());
                                table.update_untracked(|t| {
                                    let _ = t.set_custom(index, text);
                                });
                            }
                        />
                    })}
                </td>
            }
            .into_any()
        }
        ControlKind::Editable { .. } => view! {
            <td
                contenteditable="true"
                on:input=move |ev| {
                    if let Some(el) = ev.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) {
                        set_value(el.inner_text());
                    }
                }
            >
                {cell.value}
            </td>
        }
        .into_any(),
        ControlKind::Checkbox { caption } => view! {
            <td>
                <label>
                    <input
                        type="checkbox"
                        on:change=move |ev| {
                            let checked = ev
                                .target()
                                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                                .map(|input| input.checked())
                                .unwrap_or(false);
                            set_value(if checked { "on" } else { "" }.to_string());
                        }
                    />
                    " "
                    {caption}
                </label>
            </td>
        }
        .into_any(),
    }
}
