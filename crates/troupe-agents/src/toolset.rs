//! Role-keyed tool storage
//!
//! Tools register under their declared name; agents dispatch by that role
//! name rather than by position in a list.

use crate::render;
use crate::router::RouteAction;
use std::collections::HashMap;
use tracing::{error, info};
use troupe_common::ToolError;
use troupe_tools::Tool;

/// The tools owned by one agent, looked up by role name.
#[derive(Default)]
pub struct ToolSet {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name. A later registration with the
    /// same name replaces the earlier one.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, role: &str) -> Option<&dyn Tool> {
        self.tools.get(role).map(Box::as_ref)
    }

    /// Registered role names, sorted for stable output.
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        roles.sort_unstable();
        roles
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Carry out a routing decision: run the named tool (or return the
    /// direct reply) and render the outcome as user-facing text.
    pub async fn dispatch(&self, action: RouteAction) -> String {
        match action {
            RouteAction::Reply(text) => text,
            RouteAction::Invoke { role, params } => match self.get(role) {
                Some(tool) => match tool.execute(params).await {
                    Ok(output) => render::render_output(&output),
                    Err(err) => {
                        info!(role, %err, "tool reported an error");
                        render::render_error(&err)
                    }
                },
                None => {
                    error!(role, "no tool registered for role");
                    render::render_error(&ToolError::Other(format!(
                        "没有注册名为 {} 的工具",
                        role
                    )))
                }
            },
        }
    }
}
