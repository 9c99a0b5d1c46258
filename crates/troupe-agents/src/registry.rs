//! Agent registry for managing multiple agents

use crate::Agent;
use anyhow::{Error, anyhow};
use std::collections::HashMap;
use tracing::debug;

/// Registry holding agents by name, for drivers that front several agents.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Box<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own name. Duplicate names are rejected.
    pub fn register(&mut self, agent: Box<dyn Agent>) -> Result<(), Error> {
        let name = agent.name().to_string();
        debug!(agent = %name, "registering agent");
        if self.agents.contains_key(&name) {
            return Err(anyhow!("agent `{}` is already registered", name));
        }
        self.agents.insert(name, agent);
        Ok(())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Agent>> {
        self.agents.get_mut(name)
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// (name, description) pairs, sorted by name.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .agents
            .values()
            .map(|agent| (agent.name().to_string(), agent.description().to_string()))
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherAgent;
    use troupe_common::Config;

    #[tokio::test]
    async fn register_and_route_by_name() {
        let mut registry = AgentRegistry::new();
        registry
            .register(Box::new(WeatherAgent::new(Config::new())))
            .unwrap();

        assert!(registry.has_agent("weather"));
        let agent = registry.get_mut("weather").unwrap();
        let reply = agent.get_response("上海的天气").await;
        assert!(reply.contains("上海"));
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let mut registry = AgentRegistry::new();
        registry
            .register(Box::new(WeatherAgent::new(Config::new())))
            .unwrap();
        let err = registry
            .register(Box::new(WeatherAgent::new(Config::new())))
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
