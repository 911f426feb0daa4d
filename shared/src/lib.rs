use serde::{Deserialize, Serialize};

pub mod csv;
pub mod filter;
pub mod protocol;
pub mod serde_helper;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 订单资源路径（相对于 API 基础地址）
pub const PEDIDOS_PATH: &str = "/pedidos/";
/// 登录端点路径（相对于认证服务基础地址）
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
/// 浏览器 LocalStorage 中保存令牌的键
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 创建/更新订单时提交的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoPayload {
    pub cliente: String,
    #[serde(deserialize_with = "serde_helper::number_or_string")]
    pub valor: f64,
    pub descricao: String,
}

/// 服务端返回的订单
///
/// `id` 由服务端分配，前端只把它当作不透明字符串处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pedido {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub dados: PedidoPayload,
}

impl Pedido {
    pub fn new(id: impl Into<String>, dados: PedidoPayload) -> Self {
        Self {
            id: id.into(),
            dados,
        }
    }

    pub fn cliente(&self) -> &str {
        &self.dados.cliente
    }

    pub fn valor(&self) -> f64 {
        self.dados.valor
    }

    pub fn descricao(&self) -> &str {
        &self.dados.descricao
    }

    /// 以两位小数格式化金额，如 `10.00`
    pub fn valor_formatado(&self) -> String {
        format_valor(self.dados.valor)
    }
}

pub fn format_valor(valor: f64) -> String {
    format!("{:.2}", valor)
}

/// 登录端点的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}
