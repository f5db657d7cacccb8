//! Question generation through a hosted language model.
//!
//! The model is asked to answer in the tagged question format; its reply is
//! exported as-is and parsed without validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::render::RenderOptions;

pub const PROMPT_TEMPLATE: &str = r#"
You are an assistant that generates multiple-choice math questions.
Requirements:
- Use LaTeX for equations where needed (keep $...$).
- Follow the exact Question Output Format shown below.
- Choose subject, unit, topic from the provided curriculum list.
- Provide one correct answer marked with '@@option Correct Answer' and include an explanation.

Template:
@question [QUESTION_TEXT]
@instruction [INSTRUCTION]
@difficulty [easy/moderate/hard]
@Order [NUMBER]

@option [A]
@option [B]
@@option Correct Answer
@option [D]
@explanation [EXPLANATION]
@subject [subject]
@unit [unit]
@topic [topic]
@plusmarks 1
"#;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Full prompt asking for two new questions modelled on `base_question`.
pub fn build_prompt(base_question: &str) -> String {
    format!(
        "{PROMPT_TEMPLATE}\nNow create TWO new MCQ questions similar to the base question: '{base_question}' Provide outputs in exact Question Output Format.\n"
    )
}

/// Something that turns a prompt into question markup.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &GeneratorConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Read the API key from the environment variable named in `config`.
    pub fn from_env(config: &GeneratorConfig) -> Result<Self> {
        Self::from_key(config, std::env::var(&config.api_key_env).ok().as_deref())
    }

    /// Like [`GeminiClient::from_env`], reading from `vars` instead.
    pub fn from_vars(config: &GeneratorConfig, vars: &HashMap<String, String>) -> Result<Self> {
        Self::from_key(config, vars.get(&config.api_key_env).map(String::as_str))
    }

    fn from_key(config: &GeneratorConfig, key: Option<&str>) -> Result<Self> {
        match key.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Self::new(key, config)),
            _ => Err(Error::MissingCredential {
                var: config.api_key_env.clone(),
            }),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request URL. The key travels in a header so errors that echo the URL
    /// never contain it.
    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        info!(model = %self.model, "requesting questions from Gemini");
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            });
        }

        let json: Value = resp.json()?;
        extract_text(&json)
    }
}

/// Text of the first candidate, trimmed.
pub fn extract_text(response: &Value) -> Result<String> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(Error::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Files written by [`generate_and_export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub text: PathBuf,
    pub document: PathBuf,
}

/// Generate questions, then save the raw reply as `<stem>.txt` and the
/// rendered document as `<stem>.pdf` inside `out_dir`.
pub fn generate_and_export(
    generator: &dyn TextGenerator,
    prompt: &str,
    out_dir: &Path,
    stem: &str,
    options: &RenderOptions,
) -> Result<(String, GeneratedFiles)> {
    let text = generator.generate(prompt)?;
    info!(bytes = text.len(), "received generated questions");

    let files = GeneratedFiles {
        text: out_dir.join(format!("{stem}.txt")),
        document: out_dir.join(format!("{stem}.pdf")),
    };
    crate::export::write_text(&files.text, &text)?;
    crate::write_document(&text, &files.document, options)?;

    Ok((text, files))
}
