use std::time::Duration;

use pedidos_shared::filter::FilterScope;

use crate::api::{AuthGateway, PedidosGateway};
use crate::request::HttpClient;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果构建环境中没有定义对应变量，则使用这些值
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENV_API_URL: &str = "PEDIDOS_API_URL";
pub const ENV_AUTH_URL: &str = "PEDIDOS_AUTH_URL";
pub const ENV_TIMEOUT_MS: &str = "PEDIDOS_TIMEOUT_MS";
pub const ENV_ATTACH_TOKEN: &str = "PEDIDOS_ATTACH_TOKEN";
pub const ENV_FILTER_SCOPE: &str = "PEDIDOS_FILTER_SCOPE";
pub const ENV_CONFIRM_DELETE: &str = "PEDIDOS_CONFIRM_DELETE";

/// 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// 订单接口基础地址
    pub api_base_url: String,
    /// 登录接口基础地址
    pub auth_base_url: String,
    /// 单个请求的超时时间
    pub timeout: Duration,
    /// 是否在订单请求上附加 `Authorization: Bearer`
    pub attach_token: bool,
    pub filter_scope: FilterScope,
    /// 删除前是否要求确认
    pub confirm_delete: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            attach_token: true,
            filter_scope: FilterScope::default(),
            confirm_delete: true,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "sim" => Some(true),
        "0" | "false" | "no" | "off" | "nao" | "não" => Some(false),
        _ => None,
    }
}

fn parse_url(value: &str) -> Option<String> {
    let url = value.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        None
    }
}

/// 读取一个变量；值非法时记录警告并返回 `None`
fn read<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("ignoring invalid {}={:?}, using default", key, raw);
    }
    parsed
}

impl ClientConfig {
    /// 通过键查找函数构建配置，未设置或非法的键回退到默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: read(&lookup, ENV_API_URL, parse_url).unwrap_or(defaults.api_base_url),
            auth_base_url: read(&lookup, ENV_AUTH_URL, parse_url)
                .unwrap_or(defaults.auth_base_url),
            timeout: read(&lookup, ENV_TIMEOUT_MS, |v| {
                v.trim().parse::<u64>().ok().filter(|ms| *ms > 0)
            })
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout),
            attach_token: read(&lookup, ENV_ATTACH_TOKEN, parse_bool)
                .unwrap_or(defaults.attach_token),
            filter_scope: read(&lookup, ENV_FILTER_SCOPE, FilterScope::parse)
                .unwrap_or(defaults.filter_scope),
            confirm_delete: read(&lookup, ENV_CONFIRM_DELETE, parse_bool)
                .unwrap_or(defaults.confirm_delete),
        }
    }

    /// 订单网关；`attach_token` 关闭时忽略令牌
    pub fn pedidos_gateway<C: HttpClient>(
        &self,
        client: C,
        token: Option<&str>,
    ) -> PedidosGateway<C> {
        let bearer = token
            .filter(|_| self.attach_token)
            .map(str::to_string);
        PedidosGateway::new(client, self.api_base_url.clone()).with_bearer(bearer)
    }

    pub fn auth_gateway<C: HttpClient>(&self, client: C) -> AuthGateway<C> {
        AuthGateway::new(client, self.auth_base_url.clone())
    }
}
