//! Data analyst agent

use crate::conversation::ConversationLog;
use crate::router::{RouteAction, RouteContext, Router};
use crate::toolset::ToolSet;
use crate::Agent;
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use troupe_common::Config;
use troupe_tools::DataAnalysisTool;

const HELP: &str = "我是数据分析助手，可以帮您分析数据文件并提供洞察。";
const PATH_PROMPT: &str = "请提供数据分析的路径或文件名。";

const ANALYSIS_KEYWORDS: &[&str] = &["分析", "analyze", "统计", "statistics", "数据", "data"];

/// Agent routing analysis requests to the data analysis tool.
pub struct DataAnalystAgent {
    config: Config,
    tools: ToolSet,
    router: Router,
    conversation: ConversationLog,
}

impl DataAnalystAgent {
    pub fn new(config: Config) -> Self {
        let mut tools = ToolSet::new();
        tools.register(Box::new(DataAnalysisTool));

        // Tried in order; the first hit supplies the path.
        let path_patterns = vec![
            Regex::new(r"数据路径[:：]\s*([^\s,;]+)").expect("valid pattern"),
            Regex::new(r"data path[:：]\s*([^\s,;]+)").expect("valid pattern"),
            Regex::new(r"([^\s,;]+\.(?:csv|xlsx|json))").expect("valid pattern"),
        ];

        let router = Router::new(|_| RouteAction::Reply(HELP.to_string())).rule(
            "analysis-request",
            move |ctx| {
                if !ctx.contains_any(ANALYSIS_KEYWORDS) {
                    return None;
                }
                let path = path_patterns
                    .iter()
                    .find_map(|pattern| pattern.captures(ctx.input))
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string());

                Some(match path {
                    Some(data_path) => RouteAction::Invoke {
                        role: "data_analysis",
                        params: json!({ "data_path": data_path, "query": ctx.input }),
                    },
                    None => RouteAction::Reply(PATH_PROMPT.to_string()),
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
}

#[async_trait]
impl Agent for DataAnalystAgent {
    fn name(&self) -> &str {
        "data_analyst"
    }

    fn description(&self) -> &str {
        "分析数据文件并提供统计洞察"
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn labelled_path_is_extracted() {
        let mut agent = DataAnalystAgent::new(Config::new());
        let reply = agent
            .process_request("请分析数据，数据路径: sample.csv")
            .await;
        // File does not exist; the error still names it.
        assert!(reply.contains("sample.csv"));
        assert!(reply.contains("错误"));
    }

    #[tokio::test]
    async fn bare_filename_is_extracted() {
        let mut agent = DataAnalystAgent::new(Config::new());
        let reply = agent.process_request("帮我统计一下 metrics.json 的情况").await;
        assert!(reply.contains("metrics.json"));
    }

    #[tokio::test]
    async fn analysis_request_without_path_prompts() {
        let mut agent = DataAnalystAgent::new(Config::new());
        let reply = agent.process_request("帮我分析一下销售数据").await;
        assert_eq!(reply, PATH_PROMPT);
    }

    #[tokio::test]
    async fn off_topic_input_gets_help_text() {
        let mut agent = DataAnalystAgent::new(Config::new());
        let reply = agent.process_request("今天吃什么？").await;
        assert_eq!(reply, HELP);
    }
}
