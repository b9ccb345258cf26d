use finanzas_core::format_currency;
use shared::{TransactionFormConfig, TransactionRecord, TransactionType, User};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::TransactionForm;
use services::api::ApiClient;

fn session_user() -> User {
    User {
        id: option_env!("FINANZAS_USER_ID").unwrap_or("local-user").to_string(),
        email: None,
    }
}

/// Thin host for the form: keeps the records added in this session and
/// derives the available balance from them.
#[function_component(App)]
fn app() -> Html {
    let user = use_memo((), |_| session_user());
    let records = use_state(Vec::<TransactionRecord>::new);
    let show_form = use_state(|| false);
    let config = TransactionFormConfig::default();

    let balance: f64 = records.iter().map(TransactionRecord::balance_delta).sum();

    let on_open = {
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| show_form.set(true))
    };

    let on_transaction_added = {
        let records = records.clone();
        Callback::from(move |record: TransactionRecord| {
            let mut next = (*records).clone();
            next.insert(0, record);
            records.set(next);
        })
    };

    let on_close = {
        let show_form = show_form.clone();
        Callback::from(move |_: ()| show_form.set(false))
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"Finanzas"}</h1>
                <div class="app-balance">{format_currency(balance, &config)}</div>
                <button class="btn btn-primary" onclick={on_open}>{"Nueva Transacción"}</button>
            </header>

            <ul class="recent-transactions">
                {for records.iter().map(|record| {
                    let sign = match record.transaction_type {
                        TransactionType::Income => "+",
                        TransactionType::Expense => "-",
                    };
                    html! {
                        <li key={record.id.clone()} class={classes!("transaction-row", record.transaction_type.as_str())}>
                            <span class="transaction-date">{record.date.clone()}</span>
                            <span class="transaction-category">{record.category.clone()}</span>
                            <span class="transaction-description">{record.description.clone().unwrap_or_default()}</span>
                            <span class="transaction-amount">{format!("{}{}", sign, format_currency(record.amount, &config))}</span>
                        </li>
                    }
                })}
            </ul>

            {if *show_form {
                html! {
                    <TransactionForm
                        user={(*user).clone()}
                        current_balance={balance}
                        on_transaction_added={on_transaction_added}
                        on_close={on_close}
                        config={config.clone()}
                        api_client={ApiClient::new()}
                    />
                }
            } else {
                html! {}
            }}
        </div>
    }
}

fn main() {
    services::logging::init(TransactionFormConfig::default().enable_debug_logging);
    yew::Renderer::<App>::new().render();
}
