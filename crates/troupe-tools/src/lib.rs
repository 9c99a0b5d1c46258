//! Tools for Troupe agents
//!
//! Each tool maps a JSON parameter object to a structured outcome backed by a
//! static fixture table. Failures come back as [`ToolError`] variants, never
//! as panics; rendering outcomes into user-facing text is the agent layer's
//! job.

pub mod customer_info;
pub mod data_analysis;
pub mod knowledge_base;
pub mod learning;
pub mod weather;

pub use customer_info::{CustomerInfoTool, CustomerProfile, OrderDetails};
pub use data_analysis::{AnalysisReport, ColumnStats, DataAnalysisTool};
pub use knowledge_base::{KnowledgeAnswer, KnowledgeBaseTool, KnowledgeEntry};
pub use learning::{ExercisePrompt, LearningResourceTool, ResourceRecommendation};
pub use weather::{WeatherReport, WeatherTool};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use troupe_common::ToolError;

/// Tagged result of a successful tool execution.
///
/// Every variant carries the typed payload of one tool; presentation decides
/// how it reads.
#[derive(Debug, Clone, Serialize)]
pub enum ToolOutput {
    Weather(WeatherReport),
    Analysis(AnalysisReport),
    Profile(CustomerProfile),
    Order(OrderDetails),
    Knowledge(KnowledgeAnswer),
    Resources(ResourceRecommendation),
    Exercise(ExercisePrompt),
}

/// A tool that can be dispatched to by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name of the tool; agents look tools up by this role name.
    fn name(&self) -> &str;

    /// A description of what the tool does.
    fn description(&self) -> &str;

    /// The JSON schema for the tool's parameters.
    fn schema(&self) -> Value;

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError>;

    /// Validate the parameters against the schema.
    fn validate_params(&self, params: &Value) -> Result<(), ToolError> {
        if !params.is_object() {
            return Err(ToolError::InvalidParams(
                "parameters must be a JSON object".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fetch a required string parameter, treating absence and emptiness alike.
pub(crate) fn required_str<'a>(
    params: &'a Value,
    key: &'static str,
) -> Result<&'a str, ToolError> {
    match params.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ToolError::MissingParam(key)),
    }
}

/// Fetch an optional string parameter, defaulting to the empty string.
pub(crate) fn optional_str<'a>(params: &'a Value, key: &str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or("")
}
