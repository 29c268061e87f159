use super::{Action, ResearchTier};

impl Action {
    /// Short human-readable label, used in logs and the help screen.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Send(_) => "Отправить сообщение",
            Action::TrySuggestion(_) => "Подсказка",
            Action::Regenerate(_) => "Перегенерировать ответ",
            Action::NewSession => "Новый диалог",
            Action::ListSessions => "Список диалогов",
            Action::SelectSession(_) => "Открыть диалог",
            Action::DeleteSession(_) => "Удалить диалог",
            Action::ShowPersonas => "Настроения",
            Action::SetPersona(_) => "Сменить настроение",
            Action::GenerateImage(_) => "Генератор картинок",
            Action::Research { .. } => "Исследование",
            Action::SaveImage { .. } => "Скачать картинку",
            Action::Help => "Помощь",
            Action::Quit => "Выход",
            Action::None => "",
        }
    }

    /// Usage line and label for every command, in help order.
    pub fn help_entries() -> Vec<(&'static str, &'static str)> {
        vec![
            ("/new", Action::NewSession.label()),
            ("/list", Action::ListSessions.label()),
            ("/select <n>", Action::SelectSession(0).label()),
            ("/delete <n>", Action::DeleteSession(0).label()),
            ("/persona [имя|n]", Action::SetPersona(Default::default()).label()),
            ("/regen [#id]", Action::Regenerate(None).label()),
            ("/try <n>", Action::TrySuggestion(0).label()),
            ("/image <что нарисовать>", Action::GenerateImage(String::new()).label()),
            (
                "/research [quick|deep|year] <тема>",
                Action::Research {
                    tier: ResearchTier::Quick,
                    query: String::new(),
                }
                .label(),
            ),
            (
                "/save [#id] [путь]",
                Action::SaveImage {
                    message: None,
                    path: None,
                }
                .label(),
            ),
            ("/help", Action::Help.label()),
            ("/quit", Action::Quit.label()),
        ]
    }
}

impl ResearchTier {
    pub fn label(&self) -> &'static str {
        match self {
            ResearchTier::Quick => "Быстрый",
            ResearchTier::Deep => "Глубокий",
            ResearchTier::Year => "Год думать",
        }
    }
}
