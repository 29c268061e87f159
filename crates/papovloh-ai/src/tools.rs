//! The two tools the chat model may call, and the parsing of its calls.

use serde::{Deserialize, Serialize};

use crate::research::ResearchDepth;

pub const GENERATE_IMAGE: &str = "generate_image";
pub const CONDUCT_RESEARCH: &str = "conduct_research";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// The fixed pair of callable tools sent with every chat turn.
pub fn tool_declarations() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GENERATE_IMAGE.to_string(),
            description: "Создает изображение по описанию пользователя. Используй, когда \
                          пользователь просит нарисовать, создать или сгенерировать картинку."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Подробное описание изображения для генерации."
                    }
                },
                "required": ["prompt"]
            }),
        },
        ToolDefinition {
            name: CONDUCT_RESEARCH.to_string(),
            description: "Проводит исследование по теме с помощью Google Поиска. Используй, \
                          когда пользователь задает вопрос, требующий актуальной информации \
                          из интернета."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Поисковый запрос или вопрос."
                    },
                    "mode": {
                        "type": "string",
                        "description": "Глубина исследования. Используй 'quick' для простых \
                                        вопросов и 'deep' для сложных тем.",
                        "enum": ["quick", "deep"]
                    }
                },
                "required": ["query", "mode"]
            }),
        },
    ]
}

/// Convert a tool definition to the Gemini `functionDeclarations` format.
pub fn to_gemini_tool(tool: &ToolDefinition) -> serde_json::Value {
    serde_json::json!({
        "name": tool.name,
        "description": tool.description,
        "parameters": tool.parameters,
    })
}

/// A function call the model asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    GenerateImage { prompt: String },
    ConductResearch { query: String, depth: ResearchDepth },
    Unknown { name: String },
}

impl ToolInvocation {
    /// Interpret a raw `functionCall` name + args bundle. Missing string
    /// arguments become empty strings; the caller decides what that means.
    pub fn from_call(name: &str, args: &serde_json::Value) -> Self {
        let arg = |key: &str| args[key].as_str().unwrap_or("").trim().to_string();
        match name {
            GENERATE_IMAGE => ToolInvocation::GenerateImage {
                prompt: arg("prompt"),
            },
            CONDUCT_RESEARCH => ToolInvocation::ConductResearch {
                query: arg("query"),
                depth: ResearchDepth::from_mode(args["mode"].as_str()),
            },
            other => ToolInvocation::Unknown {
                name: other.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ToolInvocation::GenerateImage { .. } => GENERATE_IMAGE,
            ToolInvocation::ConductResearch { .. } => CONDUCT_RESEARCH,
            ToolInvocation::Unknown { name } => name,
        }
    }
}
