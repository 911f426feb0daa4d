//! 客户端装配
//!
//! 构建期配置 + 浏览器 fetch 客户端 -> 核心库中的网关。

use pedidos::config::{
    ENV_API_URL, ENV_ATTACH_TOKEN, ENV_AUTH_URL, ENV_CONFIRM_DELETE, ENV_FILTER_SCOPE,
    ENV_TIMEOUT_MS,
};
use pedidos::{AuthGateway, ClientConfig, PedidosGateway};

use crate::web::FetchHttpClient;

/// 构建期环境变量（由 Trunk/cargo 在编译时注入）
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_URL => option_env!("PEDIDOS_API_URL"),
        ENV_AUTH_URL => option_env!("PEDIDOS_AUTH_URL"),
        ENV_TIMEOUT_MS => option_env!("PEDIDOS_TIMEOUT_MS"),
        ENV_ATTACH_TOKEN => option_env!("PEDIDOS_ATTACH_TOKEN"),
        ENV_FILTER_SCOPE => option_env!("PEDIDOS_FILTER_SCOPE"),
        ENV_CONFIRM_DELETE => option_env!("PEDIDOS_CONFIRM_DELETE"),
        _ => None,
    };
    value.map(str::to_string)
}

pub fn build_config() -> ClientConfig {
    let config = ClientConfig::from_lookup(build_env);
    log::info!(
        "api: {}, auth: {}, timeout: {:?}",
        config.api_base_url,
        config.auth_base_url,
        config.timeout
    );
    config
}

/// 订单网关；令牌是否附加由配置决定
pub fn pedidos_gateway(config: &ClientConfig, token: Option<&str>) -> PedidosGateway<FetchHttpClient> {
    config.pedidos_gateway(FetchHttpClient::new(config.timeout), token)
}

pub fn auth_gateway(config: &ClientConfig) -> AuthGateway<FetchHttpClient> {
    config.auth_gateway(FetchHttpClient::new(config.timeout))
}
