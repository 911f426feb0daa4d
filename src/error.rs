use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 底层错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求构建失败（URL 非法、序列化失败等）
    Build,
    /// 网络不可达、连接被拒绝
    Network,
    /// 超过配置的请求超时
    Timeout,
    /// 服务端返回非 2xx 状态码
    Status(u16),
    /// 响应体无法解析
    Parse,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Build => "REQUEST_BUILD_FAILED",
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Timeout => "TIMEOUT",
            ApiErrorKind::Status(_) => "HTTP_STATUS",
            ApiErrorKind::Parse => "RESPONSE_PARSE_FAILED",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段，如 `pedidos.update("42")`
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSpan {
    pub operation: String,
    pub detail: Option<String>,
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// 只用于日志与分支判断；界面上展示的永远是 [`Notice`] 中的固定文案。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Build, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Status(status), message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan {
            operation: operation.into(),
            detail: None,
        });
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan {
            operation: operation.into(),
            detail: Some(detail.into()),
        });
        self
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// 服务端状态码（仅 `Status` 类错误）
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::parse(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 用户可见的提示
// =========================================================

/// 成功提示对应的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessKind {
    Create,
    Update,
    Delete,
}

/// 失败提示对应的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Validation,
    InvalidAmount,
    Create,
    Update,
    Delete,
    Login,
}

/// 界面提示：成功或失败，文案固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success(SuccessKind),
    Error(FailureKind),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Success(SuccessKind::Create) => "Pedido adicionado com sucesso!",
            Notice::Success(SuccessKind::Update) => "Pedido atualizado com sucesso!",
            Notice::Success(SuccessKind::Delete) => "Pedido excluído com sucesso!",
            Notice::Error(FailureKind::Fetch) => "Erro ao buscar pedidos.",
            Notice::Error(FailureKind::Validation) => "Todos os campos são obrigatórios.",
            Notice::Error(FailureKind::InvalidAmount) => {
                "O valor informado não é um número válido."
            }
            Notice::Error(FailureKind::Create | FailureKind::Update) => {
                "Erro ao adicionar ou atualizar pedido."
            }
            Notice::Error(FailureKind::Delete) => "Erro ao excluir pedido.",
            Notice::Error(FailureKind::Login) => "Usuário ou senha inválidos",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_trace() {
        let err = ApiError::status(500, "boom")
            .in_op("http.send")
            .in_op_with("pedidos.update", "42");
        assert_eq!(
            err.to_string(),
            "[HTTP_STATUS] boom | trace: http.send -> pedidos.update(42)"
        );
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn create_and_update_failures_share_one_message() {
        assert_eq!(
            Notice::Error(FailureKind::Create).message(),
            Notice::Error(FailureKind::Update).message()
        );
        assert!(Notice::Error(FailureKind::Delete).is_error());
        assert!(!Notice::Success(SuccessKind::Delete).is_error());
        assert_eq!(
            Notice::Success(SuccessKind::Delete).to_string(),
            "Pedido excluído com sucesso!"
        );
    }
}
