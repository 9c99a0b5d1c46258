//! Agents for Troupe
//!
//! An agent classifies free-text input with an ordered list of route rules
//! and dispatches the winning rule's tool invocation through its role-keyed
//! tool set. Every exchange is appended to the agent's conversation log.

pub mod agents;
pub mod conversation;
pub mod registry;
pub mod render;
pub mod router;
pub mod toolset;

pub use agents::{CustomerServiceAgent, DataAnalystAgent, LearningAssistantAgent, WeatherAgent};
pub use conversation::{ConversationEntry, ConversationLog, Role};
pub use registry::AgentRegistry;
pub use router::{RouteAction, RouteContext, RouteRule, Router};
pub use toolset::ToolSet;

use async_trait::async_trait;

/// Core trait for agents in the Troupe system.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable identifier for this agent (registry key).
    fn name(&self) -> &str;

    /// One-line description of what this agent handles.
    fn description(&self) -> &str;

    /// Classify the input, run the selected tool, and return the reply text.
    async fn process_request(&mut self, input: &str) -> String;

    /// The agent's append-only conversation log.
    fn conversation(&self) -> &ConversationLog;

    fn conversation_mut(&mut self) -> &mut ConversationLog;

    /// Top-level entry point: records the user turn, processes it, records
    /// the assistant turn. Exactly two log entries per call.
    async fn get_response(&mut self, input: &str) -> String {
        self.conversation_mut().push_user(input);
        let reply = self.process_request(input).await;
        self.conversation_mut().push_assistant(&reply);
        reply
    }
}
