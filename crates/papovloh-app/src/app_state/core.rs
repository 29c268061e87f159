//! PapovlohApp struct definition, constructor, and input loop.

use std::io::{self, Write};
use std::sync::Arc;

use papovloh_ai::{GenerationGateway, ImageData};
use papovloh_chat::{Orchestrator, SessionManager, SessionStore};
use papovloh_common::{Action, Notification, NotificationQueue, SessionId};
use papovloh_config::PapovlohConfig;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::render;

/// Whether the input loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

/// Top-level application state.
pub struct PapovlohApp<W: Write> {
    pub(super) manager: SessionManager,
    pub(super) orchestrator: Orchestrator,
    /// Shared with the orchestrator; the tool views call it directly.
    pub(super) gateway: Arc<dyn GenerationGateway>,
    pub(super) notifications: NotificationQueue,

    /// Session awaiting a yes/no answer before deletion.
    pub(super) pending_delete: Option<SessionId>,
    /// Most recent image, from a chat turn or the image tool.
    pub(super) last_image: Option<ImageData>,

    pub(super) out: W,
}

impl<W: Write> PapovlohApp<W> {
    pub fn new(
        config: &PapovlohConfig,
        gateway: Arc<dyn GenerationGateway>,
        store: Arc<dyn SessionStore>,
        out: W,
    ) -> Self {
        let manager = SessionManager::load(store, config.chat.default_persona)
            .with_title_max_chars(config.chat.title_max_chars as usize);
        Self {
            manager,
            orchestrator: Orchestrator::new(gateway.clone()),
            gateway,
            notifications: NotificationQueue::default(),
            pending_delete: None,
            last_image: None,
            out,
        }
    }

    /// Read lines until `/quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.greet()?;
        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if self.handle_line(&line).await? == Flow::Quit {
                break;
            }
        }
        self.say("Пока!")
    }

    pub(super) fn greet(&mut self) -> io::Result<()> {
        if self.manager.is_first_run() {
            self.say(&render::onboarding())?;
        }
        if let Some(text) = self.manager.active().map(render::transcript) {
            self.say(&text)?;
        }
        self.say("/help: список команд")
    }

    pub(super) async fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        if let Some(id) = self.pending_delete.take() {
            self.confirm_delete(&id, line)?;
            self.flush_notices()?;
            return Ok(Flow::Continue);
        }

        let flow = match Action::parse(line) {
            Ok(action) => {
                debug!(action = action.label(), "dispatching");
                self.dispatch(action).await?
            }
            Err(e) => {
                self.notify(Notification::warning(e.to_string()));
                Flow::Continue
            }
        };
        self.flush_notices()?;
        Ok(flow)
    }

    pub(super) fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub(super) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn flush_notices(&mut self) -> io::Result<()> {
        for n in self.notifications.drain_visible() {
            self.say(&render::notice(&n))?;
        }
        Ok(())
    }
}
