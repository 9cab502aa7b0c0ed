use std::fmt;

/// 固定的未登录提示
pub const NOT_LOGGED_IN: &str = "Not logged in";

/// 后端未提供消息时的通用失败提示
pub const GENERIC_FAILURE: &str = "Failed";

/// 短码冲突消息中的标记（不区分大小写）
const SHORT_CODE_MARKER: &str = "short code";

/// 表单字段，用于把错误归属到具体输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    LongUrl,
    ShortCode,
    Token,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::LongUrl => write!(f, "destination"),
            FormField::ShortCode => write!(f, "short code"),
            FormField::Token => write!(f, "token"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TinylinkError {
    Unauthenticated(String),
    Validation { field: FormField, message: String },
    Conflict { field: FormField, message: String },
    Backend { status: u16, message: String },
    Transport(String),
    Storage(String),
    Serialization(String),
    Config(String),
}

impl TinylinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::Unauthenticated(_) => "E001",
            TinylinkError::Validation { .. } => "E002",
            TinylinkError::Conflict { .. } => "E003",
            TinylinkError::Backend { .. } => "E004",
            TinylinkError::Transport(_) => "E005",
            TinylinkError::Storage(_) => "E006",
            TinylinkError::Serialization(_) => "E007",
            TinylinkError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::Unauthenticated(_) => "Unauthenticated",
            TinylinkError::Validation { .. } => "Validation Error",
            TinylinkError::Conflict { .. } => "Conflict",
            TinylinkError::Backend { .. } => "Backend Error",
            TinylinkError::Transport(_) => "Transport Error",
            TinylinkError::Storage(_) => "Storage Error",
            TinylinkError::Serialization(_) => "Serialization Error",
            TinylinkError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TinylinkError::Unauthenticated(msg) => msg,
            TinylinkError::Validation { message, .. } => message,
            TinylinkError::Conflict { message, .. } => message,
            TinylinkError::Backend { message, .. } => message,
            TinylinkError::Transport(msg) => msg,
            TinylinkError::Storage(msg) => msg,
            TinylinkError::Serialization(msg) => msg,
            TinylinkError::Config(msg) => msg,
        }
    }

    /// 错误可归属的表单字段；表单级错误返回 None
    pub fn field(&self) -> Option<FormField> {
        match self {
            TinylinkError::Validation { field, .. } | TinylinkError::Conflict { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkError {}

// 便捷的构造函数
impl TinylinkError {
    pub fn unauthenticated() -> Self {
        TinylinkError::Unauthenticated(NOT_LOGGED_IN.to_string())
    }

    pub fn validation<T: Into<String>>(field: FormField, msg: T) -> Self {
        TinylinkError::Validation {
            field,
            message: msg.into(),
        }
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Transport(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Storage(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Config(msg.into())
    }

    /// 根据后端返回的状态码与消息构造错误
    ///
    /// 消息包含短码标记时归为 `Conflict`，以便调用方把错误显示在短码输入框上。
    pub fn from_backend(status: u16, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_FAILURE)
            .to_string();

        if message.to_lowercase().contains(SHORT_CODE_MARKER) {
            TinylinkError::Conflict {
                field: FormField::ShortCode,
                message,
            }
        } else {
            TinylinkError::Backend { status, message }
        }
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for TinylinkError {
    fn from(err: std::io::Error) -> Self {
        TinylinkError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TinylinkError {
    fn from(err: serde_json::Error) -> Self {
        TinylinkError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TinylinkError {
    fn from(err: config::ConfigError) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_message_becomes_conflict() {
        let err = TinylinkError::from_backend(409, Some("Short code already exists"));
        assert!(matches!(err, TinylinkError::Conflict { .. }));
        assert_eq!(err.field(), Some(FormField::ShortCode));
        assert_eq!(err.message(), "Short code already exists");
    }

    #[test]
    fn test_other_backend_message_is_form_level() {
        let err = TinylinkError::from_backend(500, Some("Database unavailable"));
        assert_eq!(
            err,
            TinylinkError::Backend {
                status: 500,
                message: "Database unavailable".into()
            }
        );
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_missing_backend_message_falls_back_to_generic() {
        assert_eq!(TinylinkError::from_backend(502, None).message(), "Failed");
        assert_eq!(TinylinkError::from_backend(502, Some("  ")).message(), "Failed");
    }

    #[test]
    fn test_unauthenticated_message() {
        let err = TinylinkError::unauthenticated();
        assert_eq!(err.message(), "Not logged in");
        assert_eq!(err.code(), "E001");
        assert_eq!(format!("{}", err), "Unauthenticated: Not logged in");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TinylinkError = io.into();
        assert!(matches!(err, TinylinkError::Storage(_)));
    }
}
