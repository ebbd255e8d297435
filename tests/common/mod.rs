use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};

/// Generates one test per case asserting what `generate_headline` keeps of a
/// canned model response.
#[macro_export]
macro_rules! assert_headlines {
    (
        $(
            $test_name:ident : response => $response:expr, headline => $headline:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let context = storycard::llm_client::LlmContext {
                    model: &StubLlmProvider::new($response),
                    prompt_template: None,
                    rate_limiter: None,
                };
                let headline = storycard::headline::generate_headline("", &context)
                    .await
                    .expect("Expected successful processing.");

                assert_that(&headline).is_equal_to($headline.to_owned());
            }
        )+
    }
}

/// A chat model answering every request with the same text, or failing.
pub struct StubLlmProvider {
    response_content: Option<String>,
}

impl StubLlmProvider {
    pub fn new(response_content: &str) -> Self {
        StubLlmProvider {
            response_content: Some(response_content.to_owned()),
        }
    }

    pub fn failing() -> Self {
        StubLlmProvider {
            response_content: None,
        }
    }
}

impl ChatProvider for StubLlmProvider {
    fn chat<'life0, 'life1, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            #[derive(Debug)]
            struct StringResponse(String);

            impl ChatResponse for StringResponse {
                fn text(&self) -> Option<String> {
                    Some(self.0.clone())
                }

                fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
                    None
                }

                fn thinking(&self) -> Option<String> {
                    None
                }

                fn usage(&self) -> Option<llm::chat::Usage> {
                    None
                }
            }

            impl std::fmt::Display for StringResponse {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(formatter, "{}", self.0)
                }
            }

            match &self.response_content {
                Some(content) => {
                    Ok(Box::new(StringResponse(content.clone())) as Box<dyn ChatResponse>)
                }
                None => Err(LLMError::ProviderError("stub model is down".to_owned())),
            }
        })
    }

    fn chat_with_tools<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
        _tools: Option<&'life2 [Tool]>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Err(LLMError::ProviderError(
                "stub model has no tools".to_owned(),
            ))
        })
    }
}
