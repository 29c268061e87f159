use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::Mutex;

use async_trait::async_trait;
use papovloh_ai::{ImageData, ResearchDepth, ResearchResult, Source};
use papovloh_common::NotificationLevel;
use tokio::sync::Notify;

use super::*;
use crate::model::MessageContent;

type Script<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

/// Gateway that replays queued answers and records what it was asked.
#[derive(Default)]
struct ScriptedGateway {
    chat: Script<ModelReply>,
    images: Script<ImageData>,
    research: Script<ResearchResult>,
    chat_calls: AtomicUsize,
    image_calls: AtomicUsize,
    research_calls: AtomicUsize,
    last_history: Mutex<Vec<HistoryEntry>>,
    last_prompt: Mutex<String>,
    last_depth: Mutex<Option<ResearchDepth>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedGateway {
    fn chat(self, reply: Result<ModelReply, GatewayError>) -> Self {
        self.chat.lock().unwrap().push_back(reply);
        self
    }

    fn image(self, reply: Result<ImageData, GatewayError>) -> Self {
        self.images.lock().unwrap().push_back(reply);
        self
    }

    fn research(self, reply: Result<ResearchResult, GatewayError>) -> Self {
        self.research.lock().unwrap().push_back(reply);
        self
    }

    fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn next<T>(script: &Script<T>) -> Result<T, GatewayError> {
    script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(GatewayError::Remote("unscripted call".into())))
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn send_chat_turn(
        &self,
        history: &[HistoryEntry],
        prompt: &str,
        _system_instruction: &str,
    ) -> Result<ModelReply, GatewayError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = history.to_vec();
        *self.last_prompt.lock().unwrap() = prompt.to_string();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        next(&self.chat)
    }

    async fn generate_image(&self, _prompt: &str) -> Result<ImageData, GatewayError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.images)
    }

    async fn conduct_research(
        &self,
        _query: &str,
        depth: ResearchDepth,
    ) -> Result<ResearchResult, GatewayError> {
        self.research_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_depth.lock().unwrap() = Some(depth);
        next(&self.research)
    }
}

fn setup(gateway: ScriptedGateway) -> (Arc<ScriptedGateway>, Orchestrator) {
    let gateway = Arc::new(gateway);
    let orchestrator = Orchestrator::new(gateway.clone());
    (gateway, orchestrator)
}

fn text_reply(text: &str) -> Result<ModelReply, GatewayError> {
    Ok(ModelReply::PlainText(text.into()))
}

fn texts_of(messages: &[ChatMessage]) -> Vec<Option<&str>> {
    messages.iter().map(ChatMessage::as_text).collect()
}

fn research_result() -> ResearchResult {
    ResearchResult {
        text: "Коты спят по 16 часов.".into(),
        sources: vec![Source {
            uri: "https://cats.example".into(),
            title: "Cats".into(),
        }],
    }
}

#[tokio::test]
async fn plain_reply_appends_user_and_model() {
    let (gateway, orch) = setup(ScriptedGateway::default().chat(text_reply("Здарова!")));
    let base = vec![
        ChatMessage::user_text("раньше"),
        ChatMessage::model_text("было"),
    ];

    let mut snapshots: Vec<Vec<ChatMessage>> = Vec::new();
    let outcome = orch
        .submit_turn(&base, "Привет", "инструкция", |m| snapshots.push(m.to_vec()))
        .await
        .unwrap();

    assert_eq!(outcome.messages.len(), base.len() + 2);
    assert_eq!(
        texts_of(&outcome.messages[2..]),
        vec![Some("Привет"), Some("Здарова!")]
    );
    assert_eq!(outcome.messages[3].role, Role::Model);
    assert!(outcome.notices.is_empty());
    assert_eq!(ScriptedGateway::count(&gateway.chat_calls), 1);

    assert_eq!(snapshots.len(), 2);
    let pending = &snapshots[0];
    assert_eq!(pending.len(), base.len() + 2);
    assert!(pending.last().unwrap().is_loading);
    assert_eq!(pending[2].as_text(), Some("Привет"));
    assert_eq!(snapshots[1], outcome.messages);
    assert!(outcome.messages.iter().all(|m| !m.is_loading));
    assert!(!orch.is_busy());
}

#[tokio::test]
async fn history_excludes_new_prompt_and_masks_objects() {
    let (gateway, orch) = setup(ScriptedGateway::default().chat(text_reply("ок")));
    let stale = ChatMessage::loading_placeholder();
    let base = vec![
        ChatMessage::user_text("нарисуй кота"),
        ChatMessage::model_image(&ImageData::new("image/jpeg", "AAEC")),
        ChatMessage::model_research(research_result()),
        stale,
    ];

    orch.submit_turn(&base, "ещё", "и", |_| {}).await.unwrap();

    let history = gateway.last_history.lock().unwrap().clone();
    assert_eq!(
        history,
        vec![
            HistoryEntry::user("нарисуй кота"),
            HistoryEntry::model(texts::HISTORY_PLACEHOLDER),
            HistoryEntry::model(texts::HISTORY_PLACEHOLDER),
        ]
    );
    assert_eq!(*gateway.last_prompt.lock().unwrap(), "ещё");
}

#[tokio::test]
async fn blank_prompt_is_a_no_op() {
    let (gateway, orch) = setup(ScriptedGateway::default());
    let base = vec![ChatMessage::user_text("a")];
    let mut published = 0;

    for prompt in ["", "   ", "\n\t"] {
        let err = orch
            .submit_turn(&base, prompt, "i", |_| published += 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyPrompt));
    }

    assert_eq!(published, 0);
    assert_eq!(ScriptedGateway::count(&gateway.chat_calls), 0);
}

#[tokio::test]
async fn second_turn_is_rejected_while_first_is_in_flight() {
    let gate = Arc::new(Notify::new());
    let (gateway, orch) = setup(ScriptedGateway {
        gate: Some(gate.clone()),
        ..ScriptedGateway::default()
    }
    .chat(text_reply("первый")));

    let first = orch.submit_turn(&[], "раз", "i", |_| {});
    let second = async {
        tokio::task::yield_now().await;
        let busy = orch.is_busy();
        let result = orch.submit_turn(&[], "два", "i", |_| {}).await;
        gate.notify_one();
        (busy, result)
    };

    let (first, (was_busy, second)) = tokio::join!(first, second);

    assert!(was_busy);
    assert!(matches!(second, Err(ChatError::Busy)));
    assert_eq!(first.unwrap().messages.len(), 2);
    assert_eq!(ScriptedGateway::count(&gateway.chat_calls), 1);
    assert!(!orch.is_busy());
}

#[tokio::test]
async fn chat_failure_keeps_prompt_and_apologizes() {
    let (_, orch) = setup(
        ScriptedGateway::default().chat(Err(GatewayError::Remote("HTTP 500: boom".into()))),
    );

    let outcome = orch.submit_turn(&[], "привет", "i", |_| {}).await.unwrap();

    assert_eq!(
        texts_of(&outcome.messages),
        vec![Some("привет"), Some(texts::CHAT_FAILURE)]
    );
    assert_eq!(outcome.notices.len(), 1);
    assert_eq!(outcome.notices[0].level, NotificationLevel::Error);
    assert!(outcome.notices[0].body.contains("HTTP 500: boom"));
}

#[tokio::test]
async fn missing_credentials_are_announced_once() {
    let missing = || Err(GatewayError::Configuration("set GEMINI_API_KEY".into()));
    let (_, orch) = setup(ScriptedGateway::default().chat(missing()).chat(missing()));

    let first = orch.submit_turn(&[], "привет", "i", |_| {}).await.unwrap();
    let second = orch
        .submit_turn(&first.messages, "алло", "i", |_| {})
        .await
        .unwrap();

    assert_eq!(first.messages.len(), 2);
    assert!(first.messages.iter().all(|m| !m.is_loading));
    assert_eq!(first.notices.len(), 1);
    assert!(first.notices[0].body.starts_with(texts::MISSING_CREDENTIAL));
    assert!(first.notices[0].body.contains("GEMINI_API_KEY"));

    assert_eq!(second.messages.len(), 4);
    assert_eq!(second.messages[3].as_text(), Some(texts::CHAT_FAILURE));
    assert!(second.notices.is_empty());
}

#[tokio::test]
async fn upstream_failures_are_announced_every_time() {
    let (_, orch) = setup(
        ScriptedGateway::default()
            .chat(Err(GatewayError::RateLimited))
            .chat(Err(GatewayError::RateLimited)),
    );

    let first = orch.submit_turn(&[], "раз", "i", |_| {}).await.unwrap();
    let second = orch
        .submit_turn(&first.messages, "два", "i", |_| {})
        .await
        .unwrap();

    assert_eq!(first.notices.len(), 1);
    assert_eq!(second.notices.len(), 1);
    assert!(second.notices[0].body.starts_with(texts::CHAT_FAILURE));
}

#[tokio::test]
async fn failed_image_does_not_block_research() {
    let gateway = ScriptedGateway::default()
        .chat(Ok(ModelReply::ToolCalls(vec![
            ToolInvocation::GenerateImage {
                prompt: "кот".into(),
            },
            ToolInvocation::ConductResearch {
                query: "сон котов".into(),
                depth: ResearchDepth::Deep,
            },
        ])))
        .image(Err(GatewayError::Remote("no images".into())))
        .research(Ok(research_result()));
    let (gateway, orch) = setup(gateway);

    let outcome = orch.submit_turn(&[], "кот", "i", |_| {}).await.unwrap();

    assert_eq!(outcome.messages.len(), 3);
    assert_eq!(outcome.messages[1].as_text(), Some(texts::IMAGE_APOLOGY));
    assert_eq!(
        outcome.messages[2].content,
        MessageContent::Research(research_result())
    );
    assert_eq!(outcome.notices.len(), 1);
    assert!(outcome.notices[0].body.starts_with(texts::IMAGE_FAILURE));
    assert_eq!(ScriptedGateway::count(&gateway.image_calls), 1);
    assert_eq!(ScriptedGateway::count(&gateway.research_calls), 1);
    assert_eq!(*gateway.last_depth.lock().unwrap(), Some(ResearchDepth::Deep));
}

#[tokio::test]
async fn successful_image_becomes_data_uri() {
    let gateway = ScriptedGateway::default()
        .chat(Ok(ModelReply::ToolCalls(vec![ToolInvocation::GenerateImage {
            prompt: "кот".into(),
        }])))
        .image(Ok(ImageData::new("image/jpeg", "AAEC")));
    let (_, orch) = setup(gateway);

    let outcome = orch.submit_turn(&[], "нарисуй", "i", |_| {}).await.unwrap();

    assert_eq!(
        outcome.messages[1].content,
        MessageContent::Image {
            image_url: "data:image/jpeg;base64,AAEC".into()
        }
    );
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn research_failure_apologizes() {
    let gateway = ScriptedGateway::default()
        .chat(Ok(ModelReply::ToolCalls(vec![ToolInvocation::ConductResearch {
            query: "q".into(),
            depth: ResearchDepth::Quick,
        }])))
        .research(Err(GatewayError::Network("timeout".into())));
    let (_, orch) = setup(gateway);

    let outcome = orch.submit_turn(&[], "найди", "i", |_| {}).await.unwrap();

    assert_eq!(outcome.messages[1].as_text(), Some(texts::RESEARCH_APOLOGY));
    assert!(outcome.notices[0].body.starts_with(texts::RESEARCH_FAILURE));
}

#[tokio::test]
async fn unknown_tools_append_nothing() {
    let (_, orch) = setup(ScriptedGateway::default().chat(Ok(ModelReply::ToolCalls(vec![
        ToolInvocation::Unknown {
            name: "launch_rocket".into(),
        },
    ]))));

    let outcome = orch.submit_turn(&[], "запусти", "i", |_| {}).await.unwrap();

    assert_eq!(texts_of(&outcome.messages), vec![Some("запусти")]);
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn tool_call_without_argument_skips_gateway() {
    let (gateway, orch) = setup(ScriptedGateway::default().chat(Ok(ModelReply::ToolCalls(
        vec![ToolInvocation::GenerateImage {
            prompt: String::new(),
        }],
    ))));

    let outcome = orch.submit_turn(&[], "нарисуй", "i", |_| {}).await.unwrap();

    assert_eq!(outcome.messages[1].as_text(), Some(texts::IMAGE_APOLOGY));
    assert_eq!(ScriptedGateway::count(&gateway.image_calls), 0);
}

#[tokio::test]
async fn regenerate_replays_prompt_and_drops_tail() {
    let (gateway, orch) = setup(ScriptedGateway::default().chat(text_reply("новый ответ")));
    let earlier = vec![
        ChatMessage::user_text("первый"),
        ChatMessage::model_text("ответ"),
    ];
    let u = ChatMessage::user_text("второй");
    let m = ChatMessage::model_text("старый ответ");
    let mut messages = earlier.clone();
    messages.extend([
        u,
        m.clone(),
        ChatMessage::user_text("X"),
        ChatMessage::model_text("Y"),
    ]);

    let mut snapshots = 0;
    let outcome = orch
        .regenerate_from(&messages, &m.id, "i", |_| snapshots += 1)
        .await
        .unwrap();

    assert_eq!(snapshots, 2);
    assert_eq!(outcome.messages[..2], earlier[..]);
    assert_eq!(
        texts_of(&outcome.messages[2..]),
        vec![Some("второй"), Some("новый ответ")]
    );
    assert!(outcome.messages.iter().all(|msg| msg.id != m.id));
    assert_eq!(*gateway.last_prompt.lock().unwrap(), "второй");
    assert_eq!(gateway.last_history.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn regenerate_refuses_non_text_prompt() {
    let (gateway, orch) = setup(ScriptedGateway::default());
    let image = ChatMessage::model_image(&ImageData::new("image/jpeg", "AA"));
    let target = ChatMessage::model_text("ответ");
    let messages = vec![image, target.clone()];

    let err = orch
        .regenerate_from(&messages, &target.id, "i", |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ChatError::NotRegenerable(..)));
    assert!(err.notice().is_some());
    assert_eq!(ScriptedGateway::count(&gateway.chat_calls), 0);
    assert!(!orch.is_busy());
}

#[tokio::test]
async fn regenerate_refuses_first_message_and_user_targets() {
    let (_, orch) = setup(ScriptedGateway::default());
    let lone = ChatMessage::model_text("привет");
    let user = ChatMessage::user_text("вопрос");
    let messages = vec![lone.clone(), user.clone()];

    for id in [&lone.id, &user.id] {
        let err = orch
            .regenerate_from(&messages, id, "i", |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotRegenerable(..)));
    }
}

#[tokio::test]
async fn regenerate_unknown_id_is_not_found() {
    let (_, orch) = setup(ScriptedGateway::default());
    let err = orch
        .regenerate_from(&[], &MessageId::from("missing"), "i", |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::MessageNotFound(_)));
}
