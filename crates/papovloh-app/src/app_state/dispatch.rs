//! Action dispatch: routes resolved actions to sessions, turns, and tools.

use std::io::{self, Write};

use papovloh_ai::ImageData;
use papovloh_chat::{ChatError, ChatMessage, MessageContent, Role, TurnOutcome};
use papovloh_common::{Action, MessageId, Notification, SessionId};
use tracing::debug;

use super::core::{Flow, PapovlohApp};
use super::render;
use super::suggestions::suggestion;

/// What a chat turn starts from.
enum Turn<'a> {
    Prompt(&'a str),
    Regenerate(&'a MessageId),
}

impl<W: Write> PapovlohApp<W> {
    /// Dispatch a resolved [`Action`].
    pub(super) async fn dispatch(&mut self, action: Action) -> io::Result<Flow> {
        match action {
            Action::Send(text) => self.submit(&text).await?,
            Action::TrySuggestion(n) => match suggestion(n) {
                Some(s) => {
                    self.say(&format!("{}: {}", render::USER_NAME, s.prompt))?;
                    self.submit(s.prompt).await?;
                }
                None => self.notify(Notification::warning(format!("Нет подсказки номер {n}."))),
            },
            Action::Regenerate(prefix) => self.regenerate(prefix.as_deref()).await?,
            Action::NewSession => {
                let persona = self.manager.persona();
                self.manager.create_session(persona);
                self.show_active()?;
            }
            Action::ListSessions => {
                let list = render::session_list(self.manager.sessions(), self.manager.active_id());
                self.say(&list)?;
            }
            Action::SelectSession(n) => {
                if let Some(id) = self.session_at(n) {
                    self.manager.select_session(&id);
                    self.show_active()?;
                }
            }
            Action::DeleteSession(n) => {
                if let Some(id) = self.session_at(n) {
                    let title = self
                        .manager
                        .get(&id)
                        .map(|s| s.title.clone())
                        .unwrap_or_default();
                    self.say(&format!("Точно удалить чат \"{title}\"? (y/N)"))?;
                    self.pending_delete = Some(id);
                }
            }
            Action::ShowPersonas => {
                let list = render::personas(self.manager.persona());
                self.say(&list)?;
            }
            Action::SetPersona(persona) => {
                self.manager.set_persona(persona);
                self.notify(Notification::info(format!(
                    "Настроение: {} {}. Так будут звучать новые диалоги (/new).",
                    persona.emoji(),
                    persona.label()
                )));
            }
            Action::GenerateImage(prompt) => self.image_tool(&prompt).await?,
            Action::Research { tier, query } => self.research_tool(tier, &query).await?,
            Action::SaveImage { message, path } => {
                self.save_image(message.as_deref(), path.as_deref())?
            }
            Action::Help => self.say(&render::help())?,
            Action::Quit => return Ok(Flow::Quit),
            Action::None => {}
        }
        Ok(Flow::Continue)
    }

    /// Answer to the delete confirmation.
    pub(super) fn confirm_delete(&mut self, id: &SessionId, answer: &str) -> io::Result<()> {
        let confirmed = matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes" | "д" | "да"
        );
        if !confirmed {
            return self.say("Ладно, не удаляю.");
        }
        if self.manager.delete_session(id) {
            self.say("Удалено.")?;
        }
        self.show_active()
    }

    fn session_at(&mut self, n: usize) -> Option<SessionId> {
        let id = self
            .manager
            .sessions()
            .get(n.saturating_sub(1))
            .map(|s| s.id.clone());
        if id.is_none() {
            self.notify(Notification::warning(format!(
                "Нет диалога номер {n}. /list покажет список."
            )));
        }
        id
    }

    fn show_active(&mut self) -> io::Result<()> {
        match self.manager.active().map(render::transcript) {
            Some(text) => self.say(&text),
            None => self.say("Диалогов не осталось. Напиши что-нибудь или набери /new."),
        }
    }

    async fn submit(&mut self, prompt: &str) -> io::Result<()> {
        let id = match self.manager.active_id() {
            Some(id) => id.clone(),
            None => {
                let persona = self.manager.persona();
                self.manager.create_session(persona)
            }
        };
        self.run_turn(&id, Turn::Prompt(prompt)).await
    }

    async fn regenerate(&mut self, prefix: Option<&str>) -> io::Result<()> {
        let Some(session) = self.manager.active() else {
            self.notify(Notification::warning("Нет активного диалога."));
            return Ok(());
        };
        let session_id = session.id.clone();
        let found = match prefix {
            Some(prefix) => session
                .messages
                .iter()
                .find(|m| m.id.as_str().starts_with(prefix)),
            None => latest_answer(&session.messages),
        }
        .map(|m| m.id.clone());

        match (found, prefix) {
            (Some(target), _) => self.run_turn(&session_id, Turn::Regenerate(&target)).await,
            (None, Some(prefix)) => {
                self.reject(ChatError::MessageNotFound(MessageId::from(prefix)));
                Ok(())
            }
            (None, None) => {
                self.notify(Notification::warning("Пока нечего перегенерировать."));
                Ok(())
            }
        }
    }

    /// Run one orchestrated turn on `session`, persisting every published
    /// snapshot, then print what the model added.
    async fn run_turn(&mut self, session: &SessionId, turn: Turn<'_>) -> io::Result<()> {
        let Some((messages, persona)) = self
            .manager
            .get(session)
            .map(|s| (s.messages.clone(), s.persona))
        else {
            return Ok(());
        };

        let manager = &mut self.manager;
        let out = &mut self.out;
        let publish = |snapshot: &[ChatMessage]| {
            manager.record_turn(session, snapshot.to_vec());
            if let Some(pending) = snapshot.last().filter(|m| m.is_loading) {
                let shown = writeln!(out, "{}", render::message(pending)).and_then(|()| out.flush());
                if let Err(e) = shown {
                    debug!(error = %e, "could not show the typing line");
                }
            }
        };

        let instruction = persona.instruction();
        let result = match turn {
            Turn::Prompt(prompt) => {
                self.orchestrator
                    .submit_turn(&messages, prompt, instruction, publish)
                    .await
            }
            Turn::Regenerate(target) => {
                self.orchestrator
                    .regenerate_from(&messages, target, instruction, publish)
                    .await
            }
        };

        match result {
            Ok(outcome) => self.show_outcome(outcome),
            Err(e) => {
                self.reject(e);
                Ok(())
            }
        }
    }

    /// Print the replies that follow the turn's prompt.
    fn show_outcome(&mut self, outcome: TurnOutcome) -> io::Result<()> {
        let start = outcome
            .messages
            .iter()
            .rposition(|m| m.role == Role::User)
            .map_or(0, |i| i + 1);
        for msg in &outcome.messages[start..] {
            if let MessageContent::Image { image_url } = &msg.content {
                self.last_image = ImageData::from_data_uri(image_url).ok();
            }
            self.say(&render::message(msg))?;
        }
        self.notifications.extend(outcome.notices);
        Ok(())
    }

    fn reject(&mut self, e: ChatError) {
        match e.notice() {
            Some(notice) => self.notify(notice),
            None => debug!(error = %e, "turn rejected"),
        }
    }
}

/// The first model message of the latest turn. A turn that produced no
/// model message has nothing to regenerate.
fn latest_answer(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    let prompt = messages.iter().rposition(|m| m.role == Role::User)?;
    messages.get(prompt + 1).filter(|m| m.role == Role::Model)
}
