//! Customer service agent
//!
//! Routes order queries and profile queries to the customer info tool;
//! everything else, including explicit help questions, lands on the
//! knowledge base.

use crate::conversation::ConversationLog;
use crate::router::{RouteAction, RouteContext, Router};
use crate::toolset::ToolSet;
use crate::Agent;
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use troupe_common::Config;
use troupe_tools::{CustomerInfoTool, KnowledgeBaseTool};

const ORDER_PROMPT: &str = "请提供订单号以便查询订单信息。";
const DEFAULT_USER: &str = "guest";

const ORDER_KEYWORDS: &[&str] = &["订单", "购买", "订单号", "order", "购买记录"];
const PROFILE_KEYWORDS: &[&str] = &["个人信息", "账户", "资料", "profile", "信息"];
const HELP_KEYWORDS: &[&str] = &["怎么办", "怎么解决", "如何", "help", "帮助", "问题"];

/// Agent handling customer enquiries.
pub struct CustomerServiceAgent {
    config: Config,
    tools: ToolSet,
    router: Router,
    conversation: ConversationLog,
    current_user_id: Option<String>,
}

impl CustomerServiceAgent {
    pub fn new(config: Config) -> Self {
        let mut tools = ToolSet::new();
        tools.register(Box::new(CustomerInfoTool::new()));
        tools.register(Box::new(KnowledgeBaseTool::new()));

        // Tried in order against the raw input; the bare uppercase pattern
        // is the last resort against the uppercased input.
        let order_patterns = vec![
            Regex::new(r"订单号[:：\s]*(\w+)").expect("valid pattern"),
            Regex::new(r"(?i)order[ \w]*[:：\s]*(\w+)").expect("valid pattern"),
            Regex::new(r"订单[:：\s]*(\w+)").expect("valid pattern"),
        ];
        let bare_order_pattern =
            Regex::new(r"([A-Z]{2,}[0-9]{2,})").expect("valid pattern");

        let router = Router::new(|ctx| RouteAction::Invoke {
            role: "knowledge_base",
            params: json!({ "query": ctx.input }),
        })
        .rule("order-query", move |ctx| {
            if !ctx.contains_any(ORDER_KEYWORDS) {
                return None;
            }
            let order_id = order_patterns
                .iter()
                .find_map(|pattern| pattern.captures(ctx.input))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .or_else(|| {
                    let upper = ctx.input.to_uppercase();
                    bare_order_pattern
                        .captures(&upper)
                        .and_then(|caps| caps.get(1))
                        .map(|m| m.as_str().to_string())
                });

            Some(match order_id {
                Some(order_id) => RouteAction::Invoke {
                    role: "customer_info",
                    params: json!({
                        "query_type": "order",
                        "order_id": order_id,
                        "user_id": ctx.user_id,
                    }),
                },
                None => RouteAction::Reply(ORDER_PROMPT.to_string()),
            })
        })
        .rule("profile-query", |ctx| {
            ctx.contains_any_raw(PROFILE_KEYWORDS).then(|| {
                RouteAction::Invoke {
                    role: "customer_info",
                    params: json!({
                        "query_type": "profile",
                        "user_id": ctx.user_id,
                    }),
                }
            })
        })
        .rule("help-question", |ctx| {
            ctx.contains_any(HELP_KEYWORDS).then(|| {
                RouteAction::Invoke {
                    role: "knowledge_base",
                    params: json!({ "query": ctx.input }),
                }
            })
        });

        Self {
            config,
            tools,
            router,
            conversation: ConversationLog::new(),
            current_user_id: None,
        }
    }

    /// Set the authenticated user id for subsequent requests.
    pub fn set_current_user(&mut self, user_id: impl Into<String>) {
        self.current_user_id = Some(user_id.into());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl Agent for CustomerServiceAgent {
    fn name(&self) -> &str {
        "customer_service"
    }

    fn description(&self) -> &str {
        "处理订单、账户和常见问题咨询"
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

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_for(user: &str) -> CustomerServiceAgent {
        let mut agent = CustomerServiceAgent::new(Config::new());
        agent.set_current_user(user);
        agent
    }

    #[tokio::test]
    async fn order_query_finds_order_id_in_text() {
        let mut agent = agent_for("user123");
        let reply = agent.process_request("我想查询订单 ORD001 的状态").await;
        assert!(reply.contains("ORD001"));
        assert!(reply.contains("无线耳机"));
    }

    #[tokio::test]
    async fn bare_order_id_is_found_case_insensitively() {
        let mut agent = agent_for("user123");
        let reply = agent.process_request("帮我查一下购买记录 ord002").await;
        assert!(reply.contains("ORD002"));
        assert!(reply.contains("智能手表"));
    }

    #[tokio::test]
    async fn order_query_without_id_prompts() {
        let mut agent = agent_for("user123");
        let reply = agent.process_request("我想查订单").await;
        assert_eq!(reply, ORDER_PROMPT);
    }

    #[tokio::test]
    async fn profile_query_uses_current_user() {
        let mut agent = agent_for("user123");
        let reply = agent.process_request("我的个人信息是什么？").await;
        assert!(reply.contains("张三"));
        assert!(reply.contains("姓名"));
    }

    #[tokio::test]
    async fn guest_profile_query_reports_unknown_user() {
        let mut agent = CustomerServiceAgent::new(Config::new());
        let reply = agent.process_request("我的个人信息是什么？").await;
        assert!(reply.contains("未找到"));
        assert!(reply.contains("guest"));
    }

    #[tokio::test]
    async fn help_question_hits_knowledge_base() {
        let mut agent = agent_for("user123");
        let reply = agent.process_request("退货怎么办？").await;
        assert!(reply.contains("退货政策"));
    }

    #[tokio::test]
    async fn unmatched_input_falls_back_to_knowledge_base() {
        let mut agent = agent_for("user123");
        let reply = agent.process_request("你们的退货政策是什么？").await;
        assert!(reply.contains("7天"));
    }
}
