//! Conversation orchestrator.
//!
//! Turns a prompt into a gateway round trip and folds the outcome back into
//! the message list. Each turn publishes exactly two snapshots: the
//! optimistic one (user message plus a loading placeholder) and the final
//! one. The final list never contains a placeholder.

mod busy;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use papovloh_ai::{GatewayError, GenerationGateway, HistoryEntry, ModelReply, ToolInvocation};
use papovloh_common::{MessageId, Notification};
use tracing::{debug, info, warn};

use crate::error::ChatError;
use crate::model::{ChatMessage, Role};
use crate::texts;

use busy::BusyGuard;

/// Result of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Terminal message list.
    pub messages: Vec<ChatMessage>,
    /// Banners raised by failures inside the turn.
    pub notices: Vec<Notification>,
}

pub struct Orchestrator {
    gateway: Arc<dyn GenerationGateway>,
    busy: AtomicBool,
    /// Set once the missing-credential banner has been shown.
    credential_reported: AtomicBool,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            gateway,
            busy: AtomicBool::new(false),
            credential_reported: AtomicBool::new(false),
        }
    }

    /// Whether a turn is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one turn on top of `messages`.
    ///
    /// Whitespace-only prompts and calls made while another turn is running
    /// are rejected before anything is published.
    pub async fn submit_turn<F>(
        &self,
        messages: &[ChatMessage],
        prompt: &str,
        system_instruction: &str,
        publish: F,
    ) -> Result<TurnOutcome, ChatError>
    where
        F: FnMut(&[ChatMessage]),
    {
        if prompt.trim().is_empty() {
            return Err(ChatError::EmptyPrompt);
        }
        let _guard = BusyGuard::acquire(&self.busy)?;
        Ok(self
            .run_turn(messages, prompt, system_instruction, publish)
            .await)
    }

    /// Replay the user prompt that produced `target`, dropping `target` and
    /// everything after that prompt.
    pub async fn regenerate_from<F>(
        &self,
        messages: &[ChatMessage],
        target: &MessageId,
        system_instruction: &str,
        publish: F,
    ) -> Result<TurnOutcome, ChatError>
    where
        F: FnMut(&[ChatMessage]),
    {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let (base, prompt) = regeneration_base(messages, target)?;
        info!(target = %target.short(), kept = base.len(), "regenerating");
        Ok(self
            .run_turn(base, &prompt, system_instruction, publish)
            .await)
    }

    async fn run_turn<F>(
        &self,
        base: &[ChatMessage],
        prompt: &str,
        system_instruction: &str,
        mut publish: F,
    ) -> TurnOutcome
    where
        F: FnMut(&[ChatMessage]),
    {
        let mut messages = base.to_vec();
        messages.push(ChatMessage::user_text(prompt));

        let mut pending = messages.clone();
        pending.push(ChatMessage::loading_placeholder());
        publish(&pending);

        let history = to_history(base);
        let mut notices = Vec::new();

        match self
            .gateway
            .send_chat_turn(&history, prompt, system_instruction)
            .await
        {
            Ok(ModelReply::PlainText(text)) => {
                debug!(chars = text.chars().count(), "model replied with text");
                messages.push(ChatMessage::model_text(text));
            }
            Ok(ModelReply::ToolCalls(calls)) => {
                debug!(count = calls.len(), "model requested tools");
                for call in calls {
                    if let Some(msg) = self.dispatch(call, &mut notices).await {
                        messages.push(msg);
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "chat turn failed");
                messages.push(ChatMessage::model_text(texts::CHAT_FAILURE));
                notices.extend(self.chat_failure_notice(&e));
            }
        }

        publish(&messages);
        TurnOutcome { messages, notices }
    }

    /// Banner for a failed chat turn. A missing credential stays missing
    /// until restart, so it is announced only once.
    fn chat_failure_notice(&self, e: &GatewayError) -> Option<Notification> {
        if !e.is_configuration() {
            return Some(Notification::error(format!("{} {e}", texts::CHAT_FAILURE)));
        }
        if self.credential_reported.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Notification::error(format!("{} {e}", texts::MISSING_CREDENTIAL)))
    }

    /// Run one tool call. Failures are contained to the call: an apology
    /// message plus a banner, never an early return.
    async fn dispatch(
        &self,
        call: ToolInvocation,
        notices: &mut Vec<Notification>,
    ) -> Option<ChatMessage> {
        debug!(tool = call.name(), "dispatching tool call");
        match call {
            ToolInvocation::GenerateImage { prompt } => {
                let result = if prompt.is_empty() {
                    Err(GatewayError::Remote("generate_image called without a prompt".into()))
                } else {
                    self.gateway.generate_image(&prompt).await
                };
                Some(match result {
                    Ok(image) => ChatMessage::model_image(&image),
                    Err(e) => {
                        warn!(error = %e, "image tool failed");
                        notices.push(Notification::error(format!("{} {e}", texts::IMAGE_FAILURE)));
                        ChatMessage::model_text(texts::IMAGE_APOLOGY)
                    }
                })
            }
            ToolInvocation::ConductResearch { query, depth } => {
                let result = if query.is_empty() {
                    Err(GatewayError::Remote("conduct_research called without a query".into()))
                } else {
                    self.gateway.conduct_research(&query, depth).await
                };
                Some(match result {
                    Ok(research) => ChatMessage::model_research(research),
                    Err(e) => {
                        warn!(error = %e, depth = depth.as_str(), "research tool failed");
                        notices.push(Notification::error(format!(
                            "{} {e}",
                            texts::RESEARCH_FAILURE
                        )));
                        ChatMessage::model_text(texts::RESEARCH_APOLOGY)
                    }
                })
            }
            ToolInvocation::Unknown { .. } => {
                debug!("ignoring unknown tool call");
                None
            }
        }
    }
}

/// Messages kept by a regeneration, and the prompt to replay.
fn regeneration_base<'a>(
    messages: &'a [ChatMessage],
    target: &MessageId,
) -> Result<(&'a [ChatMessage], String), ChatError> {
    let idx = messages
        .iter()
        .position(|m| &m.id == target)
        .ok_or_else(|| ChatError::MessageNotFound(target.clone()))?;

    if messages[idx].role != Role::Model {
        return Err(ChatError::NotRegenerable(target.clone(), "not a model message"));
    }
    let Some(prev) = idx.checked_sub(1).map(|i| &messages[i]) else {
        return Err(ChatError::NotRegenerable(target.clone(), "no preceding prompt"));
    };
    match (prev.role, prev.as_text()) {
        (Role::User, Some(text)) => Ok((&messages[..idx - 1], text.to_string())),
        _ => Err(ChatError::NotRegenerable(
            target.clone(),
            "preceding message is not a text prompt",
        )),
    }
}

/// Text-only history for the gateway. Loading placeholders are skipped;
/// image and research content become an opaque marker.
pub fn to_history(messages: &[ChatMessage]) -> Vec<HistoryEntry> {
    messages
        .iter()
        .filter(|m| !m.is_loading)
        .map(|m| {
            let text = m.as_text().unwrap_or(texts::HISTORY_PLACEHOLDER);
            match m.role {
                Role::User => HistoryEntry::user(text),
                Role::Model => HistoryEntry::model(text),
            }
        })
        .collect()
}
