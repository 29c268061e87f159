//! Prompts offered in an empty chat.

pub(super) struct Suggestion {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub(super) const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        title: "Придумай идею",
        prompt: "Придумай, как сделать, чтобы домашка по математике делалась сама",
    },
    Suggestion {
        title: "Нарисуй что-нибудь",
        prompt: "Нарисуй, как Ольга Алексеевна (моя математичка) пытается съесть свой учебник",
    },
    Suggestion {
        title: "Объясни сложное",
        prompt: "Объясни, почему небо голубое, но чтобы даже мой кот понял",
    },
    Suggestion {
        title: "Напиши код",
        prompt: "Напиши код для взлома школьного вайфая, чтобы в контру на перемене рубиться",
    },
];

/// 1-based lookup.
pub(super) fn suggestion(n: usize) -> Option<&'static Suggestion> {
    n.checked_sub(1).and_then(|i| SUGGESTIONS.get(i))
}
