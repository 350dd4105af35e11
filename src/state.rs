use crate::{
    config::{RuntimeConfiguration, StoreConfig},
    data::{StudentStore, memory_store::InMemoryStudentStore, postgres_store::PostgresStudentStore},
    error::RosterResult,
    routes::sse::SseEvent,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use sqlx::postgres::PgPoolOptions;
use std::{ops::Deref, sync::Arc};
use tokio::sync::broadcast::{Receiver, Sender, channel};

//failures show the `data-error-message` of whichever element's request failed,
//successes show the `roster_message` sent back in `HX-Trigger`
const ALERT_SCRIPT: &str = r"
document.addEventListener('htmx:responseError', (evt) => {
    const holder = evt.detail.elt.closest('[data-error-message]');
    alert(holder ? holder.dataset.errorMessage : 'Something went wrong');
});
document.addEventListener('roster_message', (evt) => alert(evt.detail.value));
";

#[derive(Clone, Debug)]
pub struct RosterState {
    store: Arc<dyn StudentStore>,
    sse_events_sender: Sender<SseEvent>,
}

impl RosterState {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        let (tx, _rx) = channel(16);

        Self {
            store,
            sse_events_sender: tx,
        }
    }

    pub async fn from_config(
        options: PgPoolOptions,
        config: &RuntimeConfiguration,
    ) -> RosterResult<Self> {
        let store: Arc<dyn StudentStore> = match config.store_config() {
            StoreConfig::Postgres(db_config) => {
                Arc::new(PostgresStudentStore::new(options, &db_config).await?)
            }
            StoreConfig::InMemory => {
                warn!("Using the in-memory store, nothing will outlive this process");
                Arc::new(InMemoryStudentStore::default())
            }
        };

        Ok(Self::new(store))
    }

    #[allow(clippy::unused_self)]
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    script { (PreEscaped(ALERT_SCRIPT)) }
                    title { "Student Registration" }
                }
                body hx-ext="sse" class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (markup)
                }
            }
        }
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        //no subscribers is fine, nobody has the page open
        let _ = self.sse_events_sender.send(event);
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for RosterState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        &*self.store
    }
}
