//! Troupe Common Error Types
//!
//! Centralized structured error type for tool execution. Tools report
//! failures as tagged variants; the presentation layer turns them into the
//! user-facing sentences via [`ToolError::user_message`]. No tool failure is
//! ever fatal to the process.

use std::fmt;
use std::path::PathBuf;

/// Structured error produced by tool execution.
#[derive(Debug)]
pub enum ToolError {
    /// A required parameter was absent or empty.
    MissingParam(&'static str),
    /// Parameters were present but malformed (wrong type, not an object, ...).
    InvalidParams(String),
    /// No customer record exists for the given user id.
    UserNotFound { user_id: String },
    /// The user exists but has no such order.
    OrderNotFound { order_id: String },
    /// The learning libraries have no entry for the subject.
    UnknownSubject {
        subject: String,
        available: Vec<String>,
        exercises: bool,
    },
    /// `query_type` was neither `profile` nor `order`.
    UnsupportedQueryType(String),
    /// The data file does not exist.
    FileNotFound(PathBuf),
    /// The data file extension is not one we can read.
    UnsupportedFormat(String),
    /// The data file parsed to zero rows.
    EmptyData(PathBuf),
    /// The data file could not be parsed.
    Parse { path: PathBuf, message: String },
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// Catch-all for anything else.
    Other(String),
}

impl ToolError {
    /// Render the error as the sentence shown to the end user.
    ///
    /// The phrasing is load-bearing: downstream keyword checks
    /// (错误, 未找到, ...) rely on it.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::MissingParam("city") => "错误：未提供城市名称".to_string(),
            ToolError::MissingParam("data_path") => "错误：未提供数据路径".to_string(),
            ToolError::MissingParam("order_id") => "请提供订单号。".to_string(),
            ToolError::MissingParam(name) => format!("错误：缺少参数 {}", name),
            ToolError::InvalidParams(msg) => format!("错误：参数无效：{}", msg),
            ToolError::UserNotFound { user_id } => {
                format!("未找到用户 {} 的信息，请确认用户身份或联系客服。", user_id)
            }
            ToolError::OrderNotFound { order_id } => {
                format!("未找到订单号 {} 的信息，请确认订单号是否正确。", order_id)
            }
            ToolError::UnknownSubject {
                subject,
                available,
                exercises,
            } => {
                if *exercises {
                    format!(
                        "抱歉，没有找到关于 {} 的练习题。我们当前提供以下主题的练习题：{}",
                        subject,
                        available.join("、")
                    )
                } else {
                    let mut msg = format!(
                        "抱歉，没有找到关于 {} 的资源。我们当前提供以下主题的学习资源：\n",
                        subject
                    );
                    for topic in available {
                        msg.push_str(&format!("- {}\n", topic));
                    }
                    msg
                }
            }
            ToolError::UnsupportedQueryType(query_type) => {
                format!("不支持的查询类型: {}", query_type)
            }
            ToolError::FileNotFound(path) => {
                format!("错误：文件 {} 不存在", path.display())
            }
            ToolError::UnsupportedFormat(path) => {
                format!("错误：不支持的文件格式: {}", path)
            }
            ToolError::EmptyData(_) => "错误：数据文件为空".to_string(),
            ToolError::Parse { .. } => "错误：数据文件解析失败".to_string(),
            ToolError::Io(err) => format!("数据分析时出错：Io: {}", err),
            ToolError::Other(msg) => format!("处理请求时出错：{}", msg),
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::MissingParam(name) => write!(f, "missing parameter `{}`", name),
            ToolError::InvalidParams(msg) => write!(f, "invalid parameters: {}", msg),
            ToolError::UserNotFound { user_id } => write!(f, "unknown user `{}`", user_id),
            ToolError::OrderNotFound { order_id } => write!(f, "unknown order `{}`", order_id),
            ToolError::UnknownSubject { subject, .. } => {
                write!(f, "unknown subject `{}`", subject)
            }
            ToolError::UnsupportedQueryType(query_type) => {
                write!(f, "unsupported query type `{}`", query_type)
            }
            ToolError::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            ToolError::UnsupportedFormat(path) => write!(f, "unsupported file format: {}", path),
            ToolError::EmptyData(path) => write!(f, "data file is empty: {}", path.display()),
            ToolError::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            ToolError::Io(err) => write!(f, "io error: {}", err),
            ToolError::Other(msg) => write!(f, "tool error: {}", msg),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::Io(err)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidParams(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_distinct_per_tier() {
        let missing = ToolError::MissingParam("city").user_message();
        assert!(missing.contains("错误"));
        assert!(missing.contains("城市"));

        let not_found = ToolError::UserNotFound {
            user_id: "nobody".to_string(),
        }
        .user_message();
        assert!(not_found.contains("未找到"));
        assert!(not_found.contains("nobody"));

        let bad_type = ToolError::UnsupportedQueryType("refund".to_string()).user_message();
        assert!(bad_type.contains("不支持"));
        assert!(bad_type.contains("refund"));
    }

    #[test]
    fn unknown_subject_lists_alternatives() {
        let err = ToolError::UnknownSubject {
            subject: "rust".to_string(),
            available: vec!["python".to_string(), "ai".to_string(), "web".to_string()],
            exercises: false,
        };
        let msg = err.user_message();
        assert!(msg.contains("rust"));
        assert!(msg.contains("- python"));
        assert!(msg.contains("- web"));
    }
}
