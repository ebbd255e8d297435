//! The llm_client module holds what the LLM-backed stages share: building a
//! model from a URL, request throttling, and prompting with `<think>` removal.

use anyhow::{Context, Result};
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatMessageBuilder, ChatProvider};
use log::info;
use once_cell::sync::Lazy;
use rate_guard::{RateLimit, StdTokenBucket, TokenBucketBuilder};
use regex::Regex;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::constants::{MODEL_API_KEY_ENV_NAME, THINK_STRIPPER};

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

/// Configuration containing shared data for LLM requests
pub struct LlmContext<'a> {
    /// LLM model to ask
    pub model: &'a dyn ChatProvider,
    /// Prompt template overriding the stage default
    pub prompt_template: Option<&'a str>,
    /// Rate limiter for controlling request frequency
    pub rate_limiter: Option<&'a StdTokenBucket>,
}

/// Builds a token bucket allowing `rpm` requests per minute, or `None` for no limit.
pub fn build_rate_limiter(rpm: Option<u32>) -> Option<StdTokenBucket> {
    rpm.and_then(|rpm| {
        let capacity = u64::from(rpm.max(1));
        let refill_interval = Duration::from_secs_f64(60.0 / capacity as f64);

        TokenBucketBuilder::builder()
            .capacity(capacity)
            .refill_amount(1_u64)
            .refill_every(refill_interval)
            .with_time(rate_guard::StdTimeSource::new())
            .with_precision::<rate_guard::Nanos>()
            .build()
            .ok()
    })
}

/// Creates an LLM builder from a model URL such as `openai://gpt-4o-mini` or
/// `ollama://llama3:8b`. The API key is read from the environment when set.
///
/// # Errors
///
/// Returns an error if the URL is invalid, names an unknown backend or has no model name.
pub fn llm_builder_from_url(model: &str) -> Result<LLMBuilder> {
    let model_url = Url::parse(model).map_err(|e| anyhow::anyhow!("Invalid model URL: {}", e))?;
    let llm_builder = LLMBuilder::new()
        .backend(
            LLMBackend::from_str(model_url.scheme())
                .map_err(|e| anyhow::anyhow!("Invalid LLM backend: {}", e))?,
        )
        .model(
            [
                model_url
                    .host_str()
                    .context("Specify model name as host URL.")?,
                model_url.username(),
            ]
            .iter()
            .filter(|x| !x.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(":"),
        );

    Ok(match std::env::var(MODEL_API_KEY_ENV_NAME) {
        Ok(model_key) => {
            info!("API key provided via {MODEL_API_KEY_ENV_NAME}");
            llm_builder.api_key(model_key)
        }
        Err(err) => {
            info!("{err} while providing api key");
            llm_builder
        }
    })
}

/// Waits until the rate limiter, if any, grants one request.
async fn acquire(limiter: Option<&StdTokenBucket>) {
    if let Some(limiter) = limiter {
        while limiter.try_acquire(1).is_err() {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}

/// Asks the model about `text` using `ctx.prompt_template`, or `default_template`
/// when the context has none. `{text}` in the template is replaced by the text;
/// a template without the placeholder gets the text as a second message.
///
/// Returns the answer with `<think>` blocks removed and trimmed.
///
/// # Errors
///
/// Returns an error if the LLM request fails
pub async fn ask(ctx: &LlmContext<'_>, default_template: &str, text: &str) -> Result<String> {
    let prompt_template = ctx.prompt_template.unwrap_or(default_template);
    let prompt = prompt_template.replace("{text}", text);

    let mut messages: Vec<ChatMessageBuilder> = vec![ChatMessage::user().content(prompt)];

    if !prompt_template.contains("{text}") {
        messages.push(ChatMessage::user().content(text));
    }

    let messages: Vec<ChatMessage> = messages
        .into_iter()
        .map(|message| message.build())
        .collect();

    acquire(ctx.rate_limiter).await;

    let response = ctx
        .model
        .chat(&messages)
        .await
        .map_err(|err| anyhow::anyhow!("LLM error: {err}."))?
        .to_string();

    Ok(THINK_STRIPPER_REGEX
        .replace_all(&response, "")
        .trim()
        .to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_optional() {
        assert!(build_rate_limiter(None).is_none());
        assert!(build_rate_limiter(Some(30)).is_some());
    }

    #[test]
    fn test_invalid_model_url() {
        assert!(llm_builder_from_url("not a url").is_err());
        assert!(llm_builder_from_url("nosuchbackend://model").is_err());
    }

    #[test]
    fn test_think_stripper() {
        let stripped = THINK_STRIPPER_REGEX.replace_all("<think>\nhmm\n</think>\nIndia", "");
        assert_eq!(stripped, "India");
    }
}
