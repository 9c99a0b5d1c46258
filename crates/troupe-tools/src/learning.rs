//! Learning resource tool
//!
//! Recommends learning resources or serves practice exercises from fixture
//! libraries. Selection is randomized; the RNG is injectable so tests can
//! seed it and pin outcomes.

use crate::{Tool, ToolOutput, optional_str};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::Value;
use std::sync::Mutex;
use tracing::debug;
use troupe_common::ToolError;

const EXERCISE_KEYWORDS: &[&str] = &["练习", "题目", "question", "test", "quiz", "习题"];

const PYTHON_TERMS: &[&str] = &["python", "py", "编程"];
const AI_TERMS: &[&str] = &["ai", "人工智能", "机器学习", "ml", "深度学习", "dl"];
const WEB_TERMS: &[&str] = &["web", "前端", "react", "javascript", "js", "html", "css"];

/// A recommended learning resource.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceEntry {
    pub title: String,
    pub url: String,
    pub kind: String,
}

/// Up to two resources picked for a subject.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecommendation {
    pub subject: String,
    pub resources: Vec<ResourceEntry>,
}

/// One practice exercise for a subject.
#[derive(Debug, Clone, Serialize)]
pub struct ExercisePrompt {
    pub subject: String,
    pub question: String,
    pub answer: String,
}

struct ResourceFixture {
    title: &'static str,
    url: &'static str,
    kind: &'static str,
}

struct ExerciseFixture {
    question: &'static str,
    answer: &'static str,
}

/// Tool recommending learning resources and generating practice exercises.
pub struct LearningResourceTool {
    resources: Vec<(&'static str, Vec<ResourceFixture>)>,
    exercises: Vec<(&'static str, Vec<ExerciseFixture>)>,
    rng: Mutex<StdRng>,
}

impl LearningResourceTool {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Construct with a fixed seed so selection is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let resources = vec![
            (
                "python",
                vec![
                    ResourceFixture {
                        title: "Python基础教程",
                        url: "https://example.com/python-basics",
                        kind: "tutorial",
                    },
                    ResourceFixture {
                        title: "Python进阶指南",
                        url: "https://example.com/python-advanced",
                        kind: "tutorial",
                    },
                    ResourceFixture {
                        title: "Python实战项目",
                        url: "https://example.com/python-projects",
                        kind: "project",
                    },
                ],
            ),
            (
                "ai",
                vec![
                    ResourceFixture {
                        title: "人工智能入门",
                        url: "https://example.com/ai-intro",
                        kind: "course",
                    },
                    ResourceFixture {
                        title: "机器学习基础",
                        url: "https://example.com/ml-basics",
                        kind: "tutorial",
                    },
                    ResourceFixture {
                        title: "深度学习原理",
                        url: "https://example.com/dl-principles",
                        kind: "tutorial",
                    },
                ],
            ),
            (
                "web",
                vec![
                    ResourceFixture {
                        title: "前端开发入门",
                        url: "https://example.com/frontend-basics",
                        kind: "tutorial",
                    },
                    ResourceFixture {
                        title: "React实战",
                        url: "https://example.com/react-practice",
                        kind: "course",
                    },
                    ResourceFixture {
                        title: "JavaScript高级特性",
                        url: "https://example.com/js-advanced",
                        kind: "tutorial",
                    },
                ],
            ),
        ];

        let exercises = vec![
            (
                "python",
                vec![
                    ExerciseFixture {
                        question: "Python中列表和元组有什么区别？",
                        answer: "列表是可变的，元组是不可变的。",
                    },
                    ExerciseFixture {
                        question: "如何在Python中创建一个虚拟环境？",
                        answer: "使用venv模块：python -m venv env_name",
                    },
                    ExerciseFixture {
                        question: "Python中的装饰器是什么？",
                        answer: "装饰器是一种设计模式，用于在不修改原函数的情况下增加函数功能。",
                    },
                ],
            ),
            (
                "ai",
                vec![
                    ExerciseFixture {
                        question: "什么是过拟合？",
                        answer: "过拟合是指模型在训练数据上表现很好，但在新数据上表现较差的现象。",
                    },
                    ExerciseFixture {
                        question: "梯度下降算法的原理是什么？",
                        answer: "梯度下降通过计算损失函数的梯度，沿着梯度的反方向更新参数来最小化损失。",
                    },
                ],
            ),
        ];

        Self {
            resources,
            exercises,
            rng: Mutex::new(rng),
        }
    }

    /// Infer the subject from query keywords; fall back to a random known
    /// subject when nothing matches. The fallback is the documented
    /// non-deterministic path.
    fn infer_subject(&self, query: &str) -> String {
        if PYTHON_TERMS.iter().any(|term| query.contains(term)) {
            return "python".to_string();
        }
        if AI_TERMS.iter().any(|term| query.contains(term)) {
            return "ai".to_string();
        }
        if WEB_TERMS.iter().any(|term| query.contains(term)) {
            return "web".to_string();
        }
        let mut rng = self.rng.lock().expect("rng lock poisoned");
        let index = rng.gen_range(0..self.resources.len());
        self.resources[index].0.to_string()
    }

    fn recommend(&self, subject: &str) -> Result<ToolOutput, ToolError> {
        let (_, pool) = self
            .resources
            .iter()
            .find(|(name, _)| *name == subject)
            .ok_or_else(|| ToolError::UnknownSubject {
                subject: subject.to_string(),
                available: self.resources.iter().map(|(s, _)| s.to_string()).collect(),
                exercises: false,
            })?;

        let mut rng = self.rng.lock().expect("rng lock poisoned");
        let picked: Vec<ResourceEntry> = pool
            .choose_multiple(&mut *rng, 2.min(pool.len()))
            .map(|r| ResourceEntry {
                title: r.title.to_string(),
                url: r.url.to_string(),
                kind: r.kind.to_string(),
            })
            .collect();

        Ok(ToolOutput::Resources(ResourceRecommendation {
            subject: subject.to_string(),
            resources: picked,
        }))
    }

    fn exercise(&self, subject: &str) -> Result<ToolOutput, ToolError> {
        let (_, pool) = self
            .exercises
            .iter()
            .find(|(name, _)| *name == subject)
            .ok_or_else(|| ToolError::UnknownSubject {
                subject: subject.to_string(),
                available: self.exercises.iter().map(|(s, _)| s.to_string()).collect(),
                exercises: true,
            })?;

        let mut rng = self.rng.lock().expect("rng lock poisoned");
        let picked = pool
            .choose(&mut *rng)
            .expect("exercise pools are non-empty");

        Ok(ToolOutput::Exercise(ExercisePrompt {
            subject: subject.to_string(),
            question: picked.question.to_string(),
            answer: picked.answer.to_string(),
        }))
    }
}

impl Default for LearningResourceTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for LearningResourceTool {
    fn name(&self) -> &str {
        "learning_resource"
    }

    fn description(&self) -> &str {
        "Recommend learning resources and generate practice exercises"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user's learning request"
                },
                "subject": {
                    "type": "string",
                    "description": "Subject to look up; inferred from the query when absent"
                },
                "user_id": {
                    "type": "string",
                    "description": "Identifier of the learner"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError> {
        self.validate_params(&params)?;
        let query = optional_str(&params, "query").to_lowercase();
        let subject_param = optional_str(&params, "subject").trim().to_lowercase();
        let user_id = params
            .get("user_id")
            .and_then(Value::as_str)
            .unwrap_or("default");

        let subject = if subject_param.is_empty() {
            self.infer_subject(&query)
        } else {
            subject_param
        };
        debug!(user_id, %subject, "learning resource lookup");

        if EXERCISE_KEYWORDS.iter().any(|kw| query.contains(kw)) {
            self.exercise(&subject)
        } else {
            self.recommend(&subject)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn python_exercise_comes_from_known_pool() {
        let tool = LearningResourceTool::with_seed(7);
        for _ in 0..10 {
            let output = tool
                .execute(json!({"query": "Python练习题", "subject": "python"}))
                .await
                .unwrap();
            match output {
                ToolOutput::Exercise(exercise) => {
                    assert_eq!(exercise.subject, "python");
                    assert!(!exercise.question.is_empty());
                    assert!(!exercise.answer.is_empty());
                    assert!(exercise.question.contains("Python") || exercise.question.contains("虚拟环境"));
                }
                other => panic!("unexpected output: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn recommendation_picks_at_most_two() {
        let tool = LearningResourceTool::with_seed(7);
        let output = tool
            .execute(json!({"query": "推荐Python资源", "subject": "python"}))
            .await
            .unwrap();
        match output {
            ToolOutput::Resources(rec) => {
                assert_eq!(rec.subject, "python");
                assert_eq!(rec.resources.len(), 2);
                assert!(rec.resources.iter().all(|r| r.title.contains("Python")));
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn seeded_selection_is_reproducible() {
        let pick = |seed| async move {
            let tool = LearningResourceTool::with_seed(seed);
            match tool
                .execute(json!({"query": "给我出一道ai题目", "subject": "ai"}))
                .await
                .unwrap()
            {
                ToolOutput::Exercise(exercise) => exercise.question,
                other => panic!("unexpected output: {:?}", other),
            }
        };
        assert_eq!(pick(42).await, pick(42).await);
    }

    #[tokio::test]
    async fn subject_inference_prefers_keyword_groups() {
        let tool = LearningResourceTool::with_seed(1);
        let output = tool
            .execute(json!({"query": "我想学习机器学习"}))
            .await
            .unwrap();
        match output {
            ToolOutput::Resources(rec) => assert_eq!(rec.subject, "ai"),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_subject_lists_alternatives() {
        let tool = LearningResourceTool::with_seed(1);
        let err = tool
            .execute(json!({"query": "推荐资源", "subject": "rust"}))
            .await
            .unwrap_err();
        match err {
            ToolError::UnknownSubject {
                subject,
                available,
                exercises,
            } => {
                assert_eq!(subject, "rust");
                assert!(!exercises);
                assert_eq!(available, vec!["python", "ai", "web"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
