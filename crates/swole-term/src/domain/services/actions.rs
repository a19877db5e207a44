use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use swole_core::{CompletionBox, Session};

use crate::domain::models::{Action, Author, Event, Message, MessageType};

/// The single worker loop that owns the session.
///
/// Actions arrive over a channel and are processed one at a time. Each
/// completion call runs in a spawned task that reports back over the action
/// channel, so the loop stays responsive to an abort while the call is in
/// flight. The history is committed only when a completed exchange is
/// delivered; a failed or aborted call reports an event and leaves the
/// session exactly as it was.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        client: CompletionBox,
        mut session: Session,
        mut model: String,
        action_tx: mpsc::UnboundedSender<Action>,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let client = Arc::new(client);

        #[allow(unused_assignments)]
        let mut worker: JoinHandle<()> = tokio::spawn(async {});

        while let Some(action) = rx.recv().await {
            match action {
                Action::SubmitPrompt { prompt, files } => {
                    let payload = session.compose(&prompt, &files);
                    let worker_client = client.clone();
                    let worker_action_tx = action_tx.clone();
                    let worker_model = model.clone();
                    worker = tokio::spawn(async move {
                        let result = worker_client.complete(payload, &worker_model).await;
                        let _ = worker_action_tx.send(Action::CompletionDelivered { prompt, result });
                    });
                }
                Action::CompletionDelivered { prompt, result } => match result {
                    Ok(reply) => {
                        session.commit(&prompt, &reply);
                        event_tx
                            .send(Event::CompletionDone(Message::new(Author::Model, &reply)))?;
                    }
                    Err(err) => {
                        log::error!("Completion failed: {err}");
                        event_tx.send(Event::CompletionFailed(Message::new_with_type(
                            Author::Swole,
                            MessageType::Error,
                            &format!("{err}\n\nYour prompt was kept; press Ctrl+R to resend it."),
                        )))?;
                    }
                },
                Action::AbortCompletion => {
                    worker.abort();
                    event_tx.send(Event::Notice(Message::new(
                        Author::Swole,
                        "Request aborted. Your prompt was kept; press Ctrl+R to resend it.",
                    )))?;
                }
                Action::ResetSession => {
                    session.reset();
                    event_tx.send(Event::Notice(Message::new(
                        Author::Swole,
                        "Chat history cleared.",
                    )))?;
                }
                Action::SetModel(name) => {
                    model = name.clone();
                    event_tx.send(Event::Notice(Message::new(
                        Author::Swole,
                        &format!("Model set to {name}."),
                    )))?;
                }
                Action::SetPersonality(enabled) => {
                    session.set_personality(enabled);
                    let text = if enabled {
                        "Personality enabled. Time to get huge."
                    } else {
                        "Personality disabled."
                    };
                    event_tx.send(Event::Notice(Message::new(Author::Swole, text)))?;
                }
            }
        }

        Ok(())
    }
}
