use finanzas_core::{FormCaller, TransactionDraft, TransactionSubmitter};
use shared::{CategoryCatalog, EntryKind, PayFrequency, TransactionFormConfig, TransactionRecord, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// One edit coming from a form control
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Kind(EntryKind),
    Amount(String),
    SalaryAmount(String),
    Category(String),
    Frequency(PayFrequency),
    ExtraHours(String),
    ExtraRate(String),
    Date(String),
    Description(String),
}

/// Next draft after a single edit. Amount fields are reformatted as typed,
/// and switching kind drops a category the new kind does not offer.
pub fn apply_change(draft: &TransactionDraft, change: FieldChange, catalog: &CategoryCatalog) -> TransactionDraft {
    let mut next = draft.clone();
    match change {
        FieldChange::Kind(kind) => {
            if !catalog.contains(kind, &next.category) {
                next.category.clear();
            }
            next.kind = kind;
        }
        FieldChange::Amount(raw) => next.set_amount_input(&raw),
        FieldChange::SalaryAmount(raw) => next.set_salary_amount_input(&raw),
        FieldChange::Category(category) => next.category = category,
        FieldChange::Frequency(frequency) => next.frequency = frequency,
        FieldChange::ExtraHours(raw) => next.extra_hours = raw,
        FieldChange::ExtraRate(raw) => next.set_extra_rate_input(&raw),
        FieldChange::Date(date) => next.date = date,
        FieldChange::Description(description) => next.description = description,
    }
    next
}

/// Everything a submitter is built from; a change to any part needs a new one
pub fn submitter_key(
    user: &User,
    api_client: &ApiClient,
    config: &TransactionFormConfig,
) -> (String, ApiClient, TransactionFormConfig) {
    (user.id.clone(), api_client.clone(), config.clone())
}

/// The caller's Yew callbacks seen through the domain caller contract
#[derive(Clone)]
pub struct CallbackCaller {
    pub on_transaction_added: Callback<TransactionRecord>,
    pub on_close: Callback<()>,
}

impl FormCaller for CallbackCaller {
    fn on_transaction_added(&self, record: TransactionRecord) {
        self.on_transaction_added.emit(record);
    }

    fn on_close(&self) {
        self.on_close.emit(());
    }
}

#[derive(Clone, PartialEq)]
pub struct TransactionFormState {
    pub draft: TransactionDraft,
    pub is_loading: bool,
}

#[derive(Clone)]
pub struct UseTransactionFormActions {
    pub on_change: Callback<FieldChange>,
    pub on_submit: Callback<SubmitEvent>,
    pub on_cancel: Callback<()>,
}

pub struct UseTransactionFormResult {
    pub state: TransactionFormState,
    pub actions: UseTransactionFormActions,
}

#[hook]
pub fn use_transaction_form(
    user: &User,
    current_balance: f64,
    api_client: &ApiClient,
    catalog: &CategoryCatalog,
    config: &TransactionFormConfig,
    caller: CallbackCaller,
) -> UseTransactionFormResult {
    let draft = use_state(TransactionDraft::today);
    let is_loading = use_state(|| false);

    let key = submitter_key(user, api_client, config);
    let submitter = {
        let user = user.clone();
        use_memo(key.clone(), move |(_, api_client, config)| {
            TransactionSubmitter::new(api_client.clone(), &user, current_balance, config.clone())
        })
    };

    // Keep validation in step with the caller's balance
    {
        let submitter = submitter.clone();
        use_effect_with(current_balance, move |balance| {
            submitter.set_current_balance(*balance);
            || ()
        });
    }

    // An insert still in flight on unmount, or on a submitter swap, must not reach the caller
    {
        let submitter = submitter.clone();
        use_effect_with(key, move |_| move || submitter.cancel());
    }

    let on_change = {
        let draft = draft.clone();
        let catalog = catalog.clone();
        Callback::from(move |change: FieldChange| {
            draft.set(apply_change(&draft, change, &catalog));
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let is_loading = is_loading.clone();
        let submitter = submitter.clone();
        let caller = caller.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if submitter.is_loading() {
                return;
            }
            is_loading.set(true);

            let current = (*draft).clone();
            let is_loading = is_loading.clone();
            let submitter = submitter.clone();
            let caller = caller.clone();

            spawn_local(async move {
                let outcome = submitter.submit(&current, &caller).await;
                if let Some(message) = outcome.user_message(submitter.config()) {
                    gloo::dialogs::alert(&message);
                }
                is_loading.set(false);
            });
        })
    };

    // Closing unmounts the form, which would drop a row still being stored
    let on_cancel = {
        let submitter = submitter.clone();
        Callback::from(move |_: ()| {
            if !submitter.is_loading() {
                submitter.close(&caller);
            }
        })
    };

    let state = TransactionFormState {
        draft: (*draft).clone(),
        is_loading: *is_loading,
    };

    let actions = UseTransactionFormActions {
        on_change,
        on_submit,
        on_cancel,
    };

    UseTransactionFormResult { state, actions }
}
