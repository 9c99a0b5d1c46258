//! Ordered-rule request router
//!
//! Each agent declares its classification policy as an ordered list of
//! [`RouteRule`]s. A rule inspects the request context and either declines
//! or yields a [`RouteAction`]. Evaluation is strictly first-match-wins;
//! every router carries a fallback action for input no rule claims.

use crate::conversation::ConversationLog;
use serde_json::Value;
use tracing::debug;

/// Everything a rule may inspect when classifying a request.
pub struct RouteContext<'a> {
    /// Raw user input.
    pub input: &'a str,
    /// Lowercased input, for the case-folded keyword checks.
    pub lowered: String,
    /// The agent's conversation log (memory fallbacks read it in reverse).
    pub conversation: &'a ConversationLog,
    /// Effective user id for this request.
    pub user_id: &'a str,
}

impl<'a> RouteContext<'a> {
    pub fn new(input: &'a str, conversation: &'a ConversationLog, user_id: &'a str) -> Self {
        Self {
            input,
            lowered: input.to_lowercase(),
            conversation,
            user_id,
        }
    }

    /// Case-folded substring test against any of the keywords.
    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| self.lowered.contains(kw))
    }

    /// Case-sensitive substring test against any of the keywords.
    pub fn contains_any_raw(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| self.input.contains(kw))
    }
}

/// Outcome of a routing decision.
#[derive(Debug)]
pub enum RouteAction {
    /// Invoke the tool registered under `role` with `params`.
    Invoke { role: &'static str, params: Value },
    /// Answer directly without any tool.
    Reply(String),
}

type Matcher = Box<dyn Fn(&RouteContext) -> Option<RouteAction> + Send + Sync>;
type Fallback = Box<dyn Fn(&RouteContext) -> RouteAction + Send + Sync>;

/// One named routing rule.
pub struct RouteRule {
    name: &'static str,
    matcher: Matcher,
}

impl RouteRule {
    pub fn new(
        name: &'static str,
        matcher: impl Fn(&RouteContext) -> Option<RouteAction> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            matcher: Box::new(matcher),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn try_match(&self, ctx: &RouteContext) -> Option<RouteAction> {
        (self.matcher)(ctx)
    }
}

/// First-match-wins evaluator over an ordered rule list.
pub struct Router {
    rules: Vec<RouteRule>,
    fallback: Fallback,
}

impl Router {
    /// Create a router whose fallback produces `action` for unclaimed input.
    pub fn new(fallback: impl Fn(&RouteContext) -> RouteAction + Send + Sync + 'static) -> Self {
        Self {
            rules: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Append a rule. Order of calls is evaluation order.
    pub fn rule(
        mut self,
        name: &'static str,
        matcher: impl Fn(&RouteContext) -> Option<RouteAction> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(RouteRule::new(name, matcher));
        self
    }

    pub fn route(&self, ctx: &RouteContext) -> RouteAction {
        for rule in &self.rules {
            if let Some(action) = rule.try_match(ctx) {
                debug!(rule = rule.name(), "route matched");
                return action;
            }
        }
        debug!("no route matched, using fallback");
        (self.fallback)(ctx)
    }
}
