//! Personalized learning assistant agent

use crate::conversation::ConversationLog;
use crate::router::{RouteAction, RouteContext, Router};
use crate::toolset::ToolSet;
use crate::Agent;
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use troupe_common::Config;
use troupe_tools::LearningResourceTool;

const HELP: &str = "我是个性化学习助手，可以根据您的兴趣和进度推荐学习资源，解答学习问题。";
const DEFAULT_USER: &str = "default_user";

const LEARNING_KEYWORDS: &[&str] = &[
    "学习", "课程", "教程", "推荐", "练习", "题目", "question", "learn", "study", "education",
];

const AI_SYNONYMS: &[&str] = &["ai", "人工智能", "机器学习", "ml"];
const WEB_SYNONYMS: &[&str] = &["web", "前端", "react", "javascript", "js"];

/// Agent recommending learning resources and practice exercises.
pub struct LearningAssistantAgent {
    config: Config,
    tools: ToolSet,
    router: Router,
    conversation: ConversationLog,
    current_user_id: Option<String>,
}

impl LearningAssistantAgent {
    pub fn new(config: Config) -> Self {
        Self::with_tool(config, LearningResourceTool::new())
    }

    /// Seeded constructor so resource/exercise selection is reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_tool(config, LearningResourceTool::with_seed(seed))
    }

    fn with_tool(config: Config, learning_tool: LearningResourceTool) -> Self {
        let mut tools = ToolSet::new();
        tools.register(Box::new(learning_tool));

        let topic_pattern = Regex::new(
            r"学习(.+?)|推荐(.+?)学习|学习(.+?)资源|tutorial on ([^|]+)|learn ([^|]+)|练习(.+?)|(.+?)练习|(.+?)题目",
        )
        .expect("topic pattern is valid");

        let router = Router::new(|_| RouteAction::Reply(HELP.to_string())).rule(
            "learning-request",
            move |ctx| {
                if !ctx.contains_any(LEARNING_KEYWORDS) {
                    return None;
                }
                let mut params = json!({
                    "query": ctx.input,
                    "user_id": ctx.user_id,
                });
                if let Some(subject) = extract_subject(ctx, &topic_pattern) {
                    params["subject"] = json!(subject);
                }
                Some(RouteAction::Invoke {
                    role: "learning_resource",
                    params,
                })
            },
        );

        Self {
            config,
            tools,
            router,
            conversation: ConversationLog::new(),
            current_user_id: None,
        }
    }

    /// Set the user id attached to subsequent requests (would come from an
    /// authentication layer in a real deployment).
    pub fn set_current_user(&mut self, user_id: impl Into<String>) {
        self.current_user_id = Some(user_id.into());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Three-tier subject extraction: exact keyword groups in priority order,
/// then the disjunctive pattern's first non-empty capture group.
fn extract_subject(ctx: &RouteContext, topic_pattern: &Regex) -> Option<String> {
    if ctx.lowered.contains("python") {
        return Some("python".to_string());
    }
    if AI_SYNONYMS.iter().any(|kw| ctx.lowered.contains(kw)) {
        return Some("ai".to_string());
    }
    if WEB_SYNONYMS.iter().any(|kw| ctx.lowered.contains(kw)) {
        return Some("web".to_string());
    }

    let caps = topic_pattern.captures(ctx.input)?;
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Agent for LearningAssistantAgent {
    fn name(&self) -> &str {
        "learning_assistant"
    }

    fn description(&self) -> &str {
        "推荐学习资源并生成练习题"
    }

    async fn process_request(&mut self, input: &str) -> String {
        let user_id = self
            .current_user_id
            .clone()
            .unwrap_or_else(|| DEFAULT_USER.to_string());
        let ctx = RouteContext::new(input, &self.conversation, &user_id);
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
