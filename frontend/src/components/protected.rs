//! 受保护路由组件
//!
//! 只在已认证时渲染子组件；未认证时交给路由服务重定向到登录页。

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let is_authenticated = use_auth().is_authenticated_signal();
    let router = use_router();

    Effect::new(move |_| {
        if !is_authenticated.get() {
            router.navigate(AppRoute::auth_failure_redirect().to_path());
        }
    });

    view! {
        <Show when=move || is_authenticated.get()>
            {children()}
        </Show>
    }
}
