//! Standalone tool views: image generator, research, and image download.
//! Nothing here is recorded in a session.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use papovloh_ai::{ImageData, ResearchDepth};
use papovloh_chat::{texts, MessageContent};
use papovloh_common::{Notification, ResearchTier};
use tracing::warn;

use super::core::PapovlohApp;
use super::render;

impl<W: Write> PapovlohApp<W> {
    pub(super) async fn image_tool(&mut self, prompt: &str) -> io::Result<()> {
        self.say(render::IMAGE_PROGRESS)?;
        match self.gateway.generate_image(prompt).await {
            Ok(image) => {
                let line = render::image_summary(&image, None);
                self.last_image = Some(image);
                self.say(&line)?;
            }
            Err(e) => {
                warn!(error = %e, "image tool failed");
                self.notify(Notification::error(format!("{} {e}", texts::IMAGE_FAILURE)));
            }
        }
        Ok(())
    }

    pub(super) async fn research_tool(&mut self, tier: ResearchTier, query: &str) -> io::Result<()> {
        let depth = match tier {
            ResearchTier::Quick => ResearchDepth::Quick,
            ResearchTier::Deep => ResearchDepth::Deep,
            ResearchTier::Year => return self.say(render::YEAR_JOKE),
        };
        let progress = match depth {
            ResearchDepth::Quick => render::RESEARCH_QUICK_PROGRESS,
            ResearchDepth::Deep => render::RESEARCH_DEEP_PROGRESS,
        };
        self.say(&format!("{}: {progress}", tier.label()))?;
        match self.gateway.conduct_research(query, depth).await {
            Ok(result) => self.say(&render::research(&result))?,
            Err(e) => {
                warn!(error = %e, depth = depth.as_str(), "research tool failed");
                self.notify(Notification::error(format!("{} {e}", texts::RESEARCH_FAILURE)));
            }
        }
        Ok(())
    }

    /// Write an image to disk: the one behind a message id prefix in the
    /// active session, or the latest one seen.
    pub(super) fn save_image(&mut self, message: Option<&str>, path: Option<&Path>) -> io::Result<()> {
        let image = match message {
            Some(prefix) => self.image_in_active(prefix),
            None => self
                .last_image
                .clone()
                .ok_or_else(|| Notification::warning("Пока нечего сохранять: сначала нарисуй что-нибудь.")),
        };
        let image = match image {
            Ok(image) => image,
            Err(notice) => {
                self.notify(notice);
                return Ok(());
            }
        };

        let target = path.map(expand_home).unwrap_or_else(|| PathBuf::from("."));
        match image.save(&target) {
            Ok(written) => self.say(&format!("Сохранено: {}", written.display()))?,
            Err(e) => {
                warn!(error = %e, "image download failed");
                self.notify(Notification::error(format!("Не получилось сохранить картинку: {e}")));
            }
        }
        Ok(())
    }

    fn image_in_active(&self, prefix: &str) -> Result<ImageData, Notification> {
        let msg = self
            .manager
            .active()
            .and_then(|s| s.messages.iter().find(|m| m.id.as_str().starts_with(prefix)))
            .ok_or_else(|| Notification::warning(format!("Сообщение {prefix} не найдено.")))?;
        match &msg.content {
            MessageContent::Image { image_url } => ImageData::from_data_uri(image_url)
                .map_err(|e| Notification::error(format!("Картинка повреждена: {e}"))),
            _ => Err(Notification::warning(format!("Сообщение {prefix} не картинка."))),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
