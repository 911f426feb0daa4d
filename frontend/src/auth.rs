//! 认证模块
//!
//! 会话对象放在 Context 中，登录时写入、登出时清除；
//! 路由服务通过注入的认证信号检查状态，订单请求从这里取令牌。

use leptos::prelude::*;
use pedidos::session::authenticate;
use pedidos::{AuthGateway, ClientConfig, Notice, PedidosGateway, Session};

use crate::api;
use crate::web::{FetchHttpClient, LocalTokenStore};

pub type BrowserSession = Session<LocalTokenStore>;

/// 认证上下文
///
/// 所有字段都是 `Copy`，可以直接被事件闭包捕获。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话（只读）
    pub session: ReadSignal<BrowserSession>,
    /// 会话（写入）
    pub set_session: WriteSignal<BrowserSession>,
    /// 客户端配置
    pub config: StoredValue<ClientConfig>,
}

impl AuthContext {
    /// 创建上下文并从 LocalStorage 恢复上次的令牌
    pub fn new(config: ClientConfig) -> Self {
        let restored = Session::restore(LocalTokenStore);
        if restored.is_authenticated() {
            log::info!("restored session from local storage");
        }
        let (session, set_session) = signal(restored);
        Self {
            session,
            set_session,
            config: StoredValue::new(config),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_authenticated()))
    }

    /// 当前令牌（不追踪）
    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.token().map(str::to_string))
    }

    /// 带上当前令牌的订单网关
    pub fn pedidos_gateway(&self) -> PedidosGateway<FetchHttpClient> {
        let token = self.token();
        self.config
            .with_value(|config| api::pedidos_gateway(config, token.as_deref()))
    }

    fn auth_gateway(&self) -> AuthGateway<FetchHttpClient> {
        self.config.with_value(api::auth_gateway)
    }

    pub fn confirm_delete(&self) -> bool {
        self.config.with_value(|config| config.confirm_delete)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录并开始会话
///
/// 成功后无需手动导航，路由服务监听认证状态并重定向到首页。
pub async fn login(ctx: AuthContext, username: String, password: String) -> Result<(), Notice> {
    let gateway = ctx.auth_gateway();
    let token = authenticate(&gateway, &username, &password).await?;
    ctx.set_session.update(|session| session.begin(token));
    Ok(())
}

/// 注销并清除令牌
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: AuthContext) {
    ctx.set_session.update(|session| session.end());
    log::info!("session ended");
}
