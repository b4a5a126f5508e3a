use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagentruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockagentruntime::operation::invoke_agent::InvokeAgentError;
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use aws_sdk_bedrockagentruntime::Client as AgentClient;
use uuid::Uuid;

use crate::error::PromptServiceError;
use crate::traits::PromptService;

/// Prompt extraction through a Bedrock agent.
///
/// Each call opens a fresh agent session and aggregates the streamed
/// completion chunks into one string.
pub struct BedrockPromptService {
    client: AgentClient,
    agent_id: String,
    agent_alias_id: String,
}

impl BedrockPromptService {
    pub fn new(sdk_config: &SdkConfig, agent_id: String, agent_alias_id: String) -> Self {
        Self {
            client: AgentClient::new(sdk_config),
            agent_id,
            agent_alias_id,
        }
    }
}

fn map_invoke_agent_error<R: std::fmt::Debug>(
    err: SdkError<InvokeAgentError, R>,
) -> PromptServiceError {
    let message = DisplayErrorContext(&err).to_string();
    match err.as_service_error() {
        Some(InvokeAgentError::AccessDeniedException(_)) => PromptServiceError::AccessDenied(message),
        Some(InvokeAgentError::ThrottlingException(_))
        | Some(InvokeAgentError::ServiceQuotaExceededException(_)) => {
            PromptServiceError::Throttled(message)
        }
        Some(InvokeAgentError::ValidationException(_))
        | Some(InvokeAgentError::ResourceNotFoundException(_))
        | Some(InvokeAgentError::ConflictException(_)) => PromptServiceError::Rejected(message),
        _ => PromptServiceError::Unavailable(message),
    }
}

#[async_trait]
impl PromptService for BedrockPromptService {
    fn name(&self) -> &str {
        "bedrock-agent"
    }

    async fn extract(&self, input: &str) -> Result<String, PromptServiceError> {
        let session_id = Uuid::new_v4().to_string();

        let mut output = self
            .client
            .invoke_agent()
            .agent_id(&self.agent_id)
            .agent_alias_id(&self.agent_alias_id)
            .session_id(&session_id)
            .input_text(input)
            .send()
            .await
            .map_err(map_invoke_agent_error)?;

        let mut completion = String::new();
        loop {
            let event = output.completion.recv().await.map_err(|e| {
                PromptServiceError::Unavailable(DisplayErrorContext(&e).to_string())
            })?;

            let Some(event) = event else { break };
            if let ResponseStream::Chunk(part) = event {
                if let Some(bytes) = part.bytes() {
                    completion.push_str(&String::from_utf8_lossy(bytes.as_ref()));
                }
            }
        }

        tracing::debug!(
            session_id = %session_id,
            completion_chars = completion.chars().count(),
            "Agent completion received"
        );

        if completion.trim().is_empty() {
            return Err(PromptServiceError::EmptyResponse);
        }

        Ok(completion)
    }
}
