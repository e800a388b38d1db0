use std::sync::Arc;
use std::time::Duration;

use crate::application::services::Dispatcher;
use crate::domain::InboundMessage;
use crate::infrastructure::telegram::BotApi;

/// Long-poll delivery loop. Each update runs on its own task, so updates
/// for different conversations interleave freely; within one conversation
/// reply ordering is best-effort.
pub struct UpdatePoller {
    api: Arc<BotApi>,
    dispatcher: Arc<Dispatcher>,
    poll_timeout_secs: u64,
}

impl UpdatePoller {
    pub fn new(api: Arc<BotApi>, dispatcher: Arc<Dispatcher>, poll_timeout_secs: u64) -> Self {
        Self {
            api,
            dispatcher,
            poll_timeout_secs,
        }
    }

    pub async fn run(self) {
        let mut offset = 0i64;
        tracing::info!(poll_timeout_secs = self.poll_timeout_secs, "Update polling started");

        loop {
            let updates = match self.api.get_updates(offset, self.poll_timeout_secs).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!(error = %e, "getUpdates failed, backing off");
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);

                let Some(wire) = update.message else {
                    continue;
                };

                let message = InboundMessage::from(wire);
                let dispatcher = Arc::clone(&self.dispatcher);
                tokio::spawn(async move {
                    dispatcher.handle_update(message).await;
                });
            }
        }
    }
}
