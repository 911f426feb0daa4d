//! 订单管理前端
//!
//! 采用 Context-Driven 架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（History API + 守卫）
//! - `auth`: 会话上下文
//! - `components`: UI 组件层
//!
//! 业务状态与 REST 调用位于 `pedidos` 核心库，这里只负责浏览器绑定与渲染。

mod api;
mod auth;
mod components {
    mod icons;
    pub mod login;
    mod notice;
    pub mod pedidos;
    pub mod protected;
}
pub mod panic_hook;

use crate::auth::AuthContext;
use crate::components::login::LoginPage;
use crate::components::pedidos::PedidosPage;
use crate::components::protected::ProtectedRoute;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装，直接基于 web_sys，以减小 WASM 二进制体积。
pub(crate) mod web {
    mod dialog;
    mod download;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use dialog::confirm;
    pub use download::save_text;
    pub use http::FetchHttpClient;
    pub use storage::LocalTokenStore;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Pedidos => view! {
            <ProtectedRoute>
                <PedidosPage />
            </ProtectedRoute>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取构建期配置并创建会话上下文（从 LocalStorage 恢复令牌）
    let auth_ctx = AuthContext::new(api::build_config());
    provide_context(auth_ctx);

    // 2. 认证状态信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
