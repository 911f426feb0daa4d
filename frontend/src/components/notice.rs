use leptos::prelude::*;
use pedidos::Notice;
use std::time::Duration;

/// 提示自动消失的时间
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// 操作结果提示条
///
/// 提示附带序号。显示后 3 秒以该序号调用 `on_expire`，
/// 之后出现的提示（即使文案相同）序号不同，不会被这次计时清除。
#[component]
pub fn NoticeBanner(
    #[prop(into)] notice: Signal<Option<(u32, Notice)>>,
    #[prop(into)] on_expire: Callback<u32>,
) -> impl IntoView {
    Effect::new(move |_| {
        if let Some((seq, _)) = notice.get() {
            set_timeout(move || on_expire.run(seq), NOTICE_TTL);
        }
    });

    move || {
        notice.get().map(|(_, n)| {
            let class = if n.is_error() {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div role="alert" class=class>
                        <span>{n.message()}</span>
                    </div>
                </div>
            }
        })
    }
}
