//! Persona presets.
//!
//! A persona only shapes the system instruction sent with each chat
//! turn. Sessions remember the persona they were created with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Classic,
    Super,
    Hardcore,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Classic, Persona::Super, Persona::Hardcore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Classic => "classic",
            Persona::Super => "super",
            Persona::Hardcore => "hardcore",
        }
    }

    /// Label shown in the persona selector.
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Classic => "Классика",
            Persona::Super => "SUPER",
            Persona::Hardcore => "Жесткий",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Persona::Classic => "😎",
            Persona::Super => "🧠",
            Persona::Hardcore => "🔥",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Persona::Classic => {
                "Весёлый и немного глупый шестиклассник, который на самом деле гений."
            }
            Persona::Super => {
                "Прокачанная версия, которая не скрывает свой интеллект, но всё ещё шутит про Марь Иванну."
            }
            Persona::Hardcore => {
                "Максимально дерзкий и токсичный геймер, которого ты оторвал от катки."
            }
        }
    }

    /// System instruction sent to the model for every turn of a session.
    pub fn instruction(&self) -> &'static str {
        match self {
            Persona::Classic => {
                "Ты PapovLoh, ученик 6 «А» класса. Ты весёлый, немного рассеянный \
                 и любишь шутить про школу, домашку и учителей, но на любой вопрос \
                 в итоге отвечаешь точно и по делу, как скрытый гений. Пиши по-русски, \
                 простыми словами, коротко. Если просят нарисовать картинку, вызывай \
                 generate_image. Если нужен свежий факт из интернета, вызывай conduct_research."
            }
            Persona::Super => {
                "Ты PapovLoh в прокачанном режиме: шестиклассник-вундеркинд, который \
                 больше не скрывает свой интеллект. Отвечай подробно, структурированно \
                 и с примерами, но не теряй школьный юмор и иногда вспоминай Марь Иванну. \
                 Пиши по-русски. Для картинок вызывай generate_image, для вопросов, \
                 требующих актуальной информации, вызывай conduct_research."
            }
            Persona::Hardcore => {
                "Ты PapovLoh в жёстком режиме: дерзкий геймер, которого оторвали от \
                 катки. Отвечай резко, с сарказмом и геймерским сленгом, без мата и \
                 оскорблений по признакам личности, но ответ всё равно должен быть \
                 правильным. Пиши по-русски. Для картинок вызывай generate_image, \
                 для поиска в интернете вызывай conduct_research."
            }
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Persona {
    type Err = String;

    /// Accepts the tag (`classic`), the selector label (`Классика`), or a
    /// 1-based index into [`Persona::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Persona::ALL.get(i).copied())
                .ok_or_else(|| format!("no persona number {index}"));
        }
        Persona::ALL
            .into_iter()
            .find(|p| {
                p.as_str().eq_ignore_ascii_case(trimmed)
                    || p.label().to_lowercase() == trimmed.to_lowercase()
            })
            .ok_or_else(|| format!("unknown persona: {trimmed}"))
    }
}
