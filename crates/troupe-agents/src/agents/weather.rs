//! Weather query agent

use crate::conversation::ConversationLog;
use crate::router::{RouteAction, RouteContext, Router};
use crate::toolset::ToolSet;
use crate::Agent;
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use troupe_common::Config;
use troupe_tools::WeatherTool;

const HELP: &str = "我是天气查询助手，可以帮您查询指定城市的天气信息。";
const CITY_PROMPT: &str = "请提供您想查询天气的城市名称。";

/// Agent answering weather queries for a named city.
///
/// City resolution: regex against the current input first, then a memory
/// fallback scanning the conversation log in reverse for a JSON body with a
/// `city` field.
pub struct WeatherAgent {
    config: Config,
    tools: ToolSet,
    router: Router,
    conversation: ConversationLog,
}

impl WeatherAgent {
    pub fn new(config: Config) -> Self {
        let mut tools = ToolSet::new();
        tools.register(Box::new(WeatherTool));

        let city_pattern = Regex::new(
            r"([A-Za-z\x{4e00}-\x{9fa5}]+)的天气|weather in ([A-Za-z\x{4e00}-\x{9fa5}]+)",
        )
        .expect("city pattern is valid");

        let router = Router::new(|_| RouteAction::Reply(HELP.to_string())).rule(
            "weather-query",
            move |ctx| {
                if !(ctx.contains_any_raw(&["天气"]) || ctx.lowered.contains("weather")) {
                    return None;
                }
                let city = city_pattern
                    .captures(ctx.input)
                    .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
                    .map(|m| m.as_str().to_string())
                    .or_else(|| city_from_memory(ctx.conversation));

                Some(match city {
                    Some(city) => RouteAction::Invoke {
                        role: "weather",
                        params: json!({ "city": city }),
                    },
                    None => RouteAction::Reply(CITY_PROMPT.to_string()),
                })
            },
        );

        Self {
            config,
            tools,
            router,
            conversation: ConversationLog::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }
}

/// Look back through the log for the most recent entry that mentions a city
/// as JSON, e.g. `{"city": "上海"}`. Only the newest candidate entry is
/// considered; if it does not parse, the lookup gives up rather than
/// scanning further.
fn city_from_memory(conversation: &ConversationLog) -> Option<String> {
    let entry = conversation
        .iter_rev()
        .find(|entry| entry.content.contains("city"))?;
    let value: serde_json::Value = serde_json::from_str(&entry.content).ok()?;
    value
        .get("city")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl Agent for WeatherAgent {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "查询指定城市的天气信息"
    }

    async fn process_request(&mut self, input: &str) -> String {
        let ctx = RouteContext::new(input, &self.conversation, "guest");
        let action = self.router.route(&ctx);
        self.tools.dispatch(action).await
    }

    fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    fn conversation_mut(&mut self) -> &mut ConversationLog {
        &mut self.conversation
    }
}
