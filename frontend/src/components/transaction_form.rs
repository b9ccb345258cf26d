use finanzas_core::format_currency;
use shared::{CategoryCatalog, EntryKind, PayFrequency, TransactionFormConfig, TransactionRecord, User};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_transaction_form::{use_transaction_form, CallbackCaller, FieldChange, UseTransactionFormResult};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub user: User,
    pub current_balance: f64,
    pub on_transaction_added: Callback<TransactionRecord>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub categories: CategoryCatalog,
    #[prop_or_default]
    pub config: TransactionFormConfig,
    #[prop_or_default]
    pub api_client: ApiClient,
}

fn on_text_input(on_change: &Callback<FieldChange>, field: fn(String) -> FieldChange) -> Callback<InputEvent> {
    let on_change = on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_change.emit(field(input.value()));
    })
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let caller = CallbackCaller {
        on_transaction_added: props.on_transaction_added.clone(),
        on_close: props.on_close.clone(),
    };
    let UseTransactionFormResult { state, actions } = use_transaction_form(
        &props.user,
        props.current_balance,
        &props.api_client,
        &props.categories,
        &props.config,
        caller,
    );
    let draft = &state.draft;

    let on_kind_change = {
        let on_change = actions.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(kind) = EntryKind::from_form_value(&input.value()) {
                on_change.emit(FieldChange::Kind(kind));
            }
        })
    };

    let on_category_change = {
        let on_change = actions.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(FieldChange::Category(select.value()));
        })
    };

    let on_frequency_change = {
        let on_change = actions.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(frequency) = PayFrequency::from_form_value(&select.value()) {
                on_change.emit(FieldChange::Frequency(frequency));
            }
        })
    };

    let on_description_input = {
        let on_change = actions.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(FieldChange::Description(textarea.value()));
        })
    };

    let on_cancel = actions.on_cancel.reform(|_: MouseEvent| ());
    let symbol = props.config.currency_symbol.clone();
    let placeholder = format!("{}0.00", symbol);

    let amount_fields = if draft.kind == EntryKind::Salary {
        html! {
            <>
                <div class="form-group">
                    <label for="salary-amount">{format!("Monto base ({})", symbol)}</label>
                    <input
                        id="salary-amount"
                        type="text"
                        inputmode="decimal"
                        required=true
                        value={draft.salary_amount.clone()}
                        oninput={on_text_input(&actions.on_change, FieldChange::SalaryAmount)}
                        placeholder={placeholder.clone()}
                    />
                </div>

                <div class="form-group">
                    <label for="salary-frequency">{"Frecuencia"}</label>
                    <select id="salary-frequency" onchange={on_frequency_change}>
                        {for PayFrequency::ALL.iter().map(|frequency| html! {
                            <option value={frequency.as_str()} selected={*frequency == draft.frequency}>
                                {frequency.label()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="extra-hours">{"Horas extra"}</label>
                        <input
                            id="extra-hours"
                            type="number"
                            min="0"
                            step="0.25"
                            value={draft.extra_hours.clone()}
                            oninput={on_text_input(&actions.on_change, FieldChange::ExtraHours)}
                            placeholder="0"
                        />
                    </div>
                    <div class="form-group">
                        <label for="extra-rate">{format!("Pago por hora ({})", symbol)}</label>
                        <input
                            id="extra-rate"
                            type="text"
                            inputmode="decimal"
                            value={draft.extra_rate.clone()}
                            oninput={on_text_input(&actions.on_change, FieldChange::ExtraRate)}
                            placeholder={placeholder.clone()}
                        />
                    </div>
                </div>
            </>
        }
    } else {
        html! {
            <>
                <div class="form-group">
                    <label for="amount">{"Monto"}</label>
                    <input
                        id="amount"
                        type="text"
                        inputmode="decimal"
                        required=true
                        value={draft.amount.clone()}
                        oninput={on_text_input(&actions.on_change, FieldChange::Amount)}
                        placeholder={placeholder.clone()}
                    />
                </div>

                <div class="form-group">
                    <label for="category">{"Categoría"}</label>
                    <select id="category" required=true onchange={on_category_change}>
                        <option value="" selected={draft.category.is_empty()}>{"Selecciona una categoría"}</option>
                        {for props.categories.categories_for(draft.kind).iter().map(|category| html! {
                            <option value={category.name.clone()} selected={category.name == draft.category}>
                                {category.name.clone()}
                            </option>
                        })}
                    </select>
                </div>
            </>
        }
    };

    html! {
        <div class="transaction-modal-backdrop">
            <div class="transaction-modal">
                <div class="transaction-modal-header">
                    <h3 class="transaction-modal-title">{"Nueva Transacción"}</h3>
                    <button
                        type="button"
                        class="transaction-modal-close"
                        disabled={state.is_loading}
                        onclick={on_cancel.clone()}
                    >
                        {"✕"}
                    </button>
                </div>

                <div class="balance-indicator">
                    <span class="balance-label">{"Balance disponible: "}</span>
                    {format_currency(props.current_balance, &props.config)}
                </div>

                <form class="transaction-form" onsubmit={actions.on_submit.clone()}>
                    <div class="form-group">
                        <label>{"Tipo"}</label>
                        <div class="kind-options">
                            {for EntryKind::ALL.iter().map(|kind| html! {
                                <label class={classes!("kind-option", kind.as_str())}>
                                    <input
                                        type="radio"
                                        name="kind"
                                        value={kind.as_str()}
                                        checked={*kind == draft.kind}
                                        onchange={on_kind_change.clone()}
                                    />
                                    <span>{kind.label()}</span>
                                </label>
                            })}
                        </div>
                    </div>

                    {amount_fields}

                    <div class="form-group">
                        <label for="date">{"Fecha"}</label>
                        <input
                            id="date"
                            type="date"
                            required=true
                            value={draft.date.clone()}
                            oninput={on_text_input(&actions.on_change, FieldChange::Date)}
                        />
                    </div>

                    <div class="form-group">
                        <label for="description">{"Descripción (opcional)"}</label>
                        <textarea
                            id="description"
                            rows="3"
                            value={draft.description.clone()}
                            oninput={on_description_input}
                            placeholder="Descripción de la transacción..."
                        />
                    </div>

                    <div class="transaction-form-buttons">
                        <button type="button" class="btn btn-secondary" disabled={state.is_loading} onclick={on_cancel}>
                            {"Cancelar"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={state.is_loading}>
                            {if state.is_loading { "Guardando..." } else { "Guardar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
