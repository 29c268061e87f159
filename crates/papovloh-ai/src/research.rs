//! Grounded research: depth levels, result bundle, and source extraction
//! from Gemini grounding metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How hard the research call should try. Selects the upstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResearchDepth {
    #[default]
    Quick,
    Deep,
}

impl ResearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchDepth::Quick => "quick",
            ResearchDepth::Deep => "deep",
        }
    }

    /// Interpret the `mode` argument of a `conduct_research` call. Also
    /// accepts the Russian labels; anything else falls back to quick.
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode.map(|m| m.trim().to_lowercase()).as_deref() {
            Some("deep") | Some("глубокий") => ResearchDepth::Deep,
            _ => ResearchDepth::Quick,
        }
    }
}

/// One cited web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// Response text plus the sources it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResearchResult {
    pub text: String,
    pub sources: Vec<Source>,
}

/// A source as it arrives upstream, before filtering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Keep only sources with both a uri and a title, preserving order.
pub fn collect_sources(raw: impl IntoIterator<Item = RawSource>) -> Vec<Source> {
    raw.into_iter()
        .filter_map(|s| match (s.uri, s.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(Source { uri, title })
            }
            _ => None,
        })
        .collect()
}

/// Pull `candidates[0].groundingMetadata.groundingChunks[].web` out of a
/// `generateContent` response.
pub fn extract_sources(response: &Value) -> Vec<Source> {
    let Some(chunks) = response["candidates"][0]["groundingMetadata"]["groundingChunks"].as_array()
    else {
        return Vec::new();
    };

    let raw = chunks.iter().map(|chunk| {
        let web = &chunk["web"];
        RawSource {
            uri: web["uri"].as_str().map(str::to_string),
            title: web["title"].as_str().map(str::to_string),
        }
    });
    collect_sources(raw)
}
