//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API：所有对 window.history 的操作都集中在此模块。
//! 导航流程为 "请求 -> 守卫 -> 写入 History -> 更新信号"。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History；`push` 为 false 时使用 replaceState（用于重定向）
fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let res = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = res {
        log::warn!("[Router] history update failed: {:?}", e);
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新，认证状态以信号形式注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始路由同样经过守卫，地址栏与实际页面保持一致
        let requested = AppRoute::from_path(&current_path());
        let initial = requested.clone().guard(is_authenticated.get_untracked());
        if initial != requested {
            write_history(initial.to_path(), false);
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路径（经过守卫）
    pub fn navigate(&self, path: &str) {
        self.go(AppRoute::from_path(path), true);
    }

    fn go(&self, target: AppRoute, push: bool) {
        let resolved = target.clone().guard(self.is_authenticated.get_untracked());
        if resolved != target {
            log::info!("[Router] {} redirected to {}", target, resolved);
        }
        write_history(resolved.to_path(), push);
        self.set_route.set(resolved);
    }

    /// 浏览器后退/前进按钮同样经过守卫
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = target.clone().guard(router.is_authenticated.get_untracked());
            if resolved != target {
                write_history(resolved.to_path(), false);
            }
            router.set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            if let Err(e) = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                log::warn!("[Router] popstate listener not installed: {:?}", e);
            }
        }

        // 监听器与页面同生命周期
        closure.forget();
    }

    /// 认证状态变化（登录/登出）时重新评估当前路由
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            let resolved = route.clone().guard(is_auth);
            if resolved != route {
                log::info!(
                    "[Router] auth changed (authenticated: {}), redirecting to {}",
                    is_auth,
                    resolved
                );
                write_history(resolved.to_path(), true);
                router.set_route.set(resolved);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口组件：根据当前路由渲染对应的视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}
