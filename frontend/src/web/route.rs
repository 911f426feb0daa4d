//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及守卫规则。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 订单列表/编辑 (首页，需要认证)
    #[default]
    Pedidos,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/pedidos" => Self::Pedidos,
            "/login" => Self::Login,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Pedidos => "/",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Pedidos)
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Pedidos
    }

    /// 根据认证状态决定实际进入的路由
    ///
    /// 返回值与 `self` 不同即表示需要重定向。
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Pedidos);
        assert_eq!(AppRoute::from_path("/pedidos/"), AppRoute::Pedidos);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/nada"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(AppRoute::Login.to_path()), AppRoute::Login);
    }

    #[test]
    fn anonymous_users_are_sent_to_login() {
        assert_eq!(AppRoute::Pedidos.guard(false), AppRoute::Login);
        assert_eq!(AppRoute::Login.guard(false), AppRoute::Login);
        assert_eq!(AppRoute::NotFound.guard(false), AppRoute::NotFound);
    }

    #[test]
    fn authenticated_users_skip_login() {
        assert_eq!(AppRoute::Login.guard(true), AppRoute::Pedidos);
        assert_eq!(AppRoute::Pedidos.guard(true), AppRoute::Pedidos);
    }
}
