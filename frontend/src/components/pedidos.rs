//! 订单列表/编辑页面
//!
//! 页面状态由核心库的 [`PedidoBoard`] 持有，放在一个 `RwSignal` 中。
//! 网络请求期间不持有借用：先 `update` 准备，再 await，最后 `update` 应用结果。

mod pedido_editor;
mod pedido_table;
mod summary;

use leptos::prelude::*;
use leptos::task::spawn_local;
use pedidos::PedidoBoard;
use pedidos_shared::csv::{CSV_FILE_NAME, CSV_MIME_TYPE};

use self::pedido_editor::PedidoEditor;
use self::pedido_table::PedidoTable;
use self::summary::Summary;
use crate::auth::{logout, use_auth};
use crate::components::icons::{Download, LogOut, RefreshCw, ShoppingBag};
use crate::components::notice::NoticeBanner;
use crate::web::{confirm, save_text};

const CONFIRM_DELETE_MESSAGE: &str = "Tem certeza que deseja excluir este pedido?";

#[component]
pub fn PedidosPage() -> impl IntoView {
    let auth = use_auth();
    let scope = auth.config.with_value(|config| config.filter_scope);
    let board = RwSignal::new(PedidoBoard::new(scope));

    let load = move || {
        board.update(|b| b.begin_load());
        let gateway = auth.pedidos_gateway();
        spawn_local(async move {
            let result = gateway.list().await;
            board.update(|b| b.apply_load(result));
        });
    };

    // 首次渲染时加载全部订单
    load();

    let submit = Callback::new(move |()| {
        let mut plan = None;
        board.update(|b| plan = b.prepare_submit());
        let Some(plan) = plan else {
            return;
        };

        let gateway = auth.pedidos_gateway();
        spawn_local(async move {
            let result = plan.execute(&gateway).await;
            board.update(|b| b.apply_submit(result));
        });
    });

    let on_edit = Callback::new(move |id: String| {
        board.update(|b| {
            if !b.edit(&id) {
                log::warn!("pedido {} is no longer in the list", id);
            }
        });
    });

    let on_delete = Callback::new(move |id: String| {
        if auth.confirm_delete() && !confirm(CONFIRM_DELETE_MESSAGE) {
            return;
        }

        board.update(|b| b.begin_delete());
        let gateway = auth.pedidos_gateway();
        spawn_local(async move {
            let result = gateway.delete(&id).await;
            board.update(|b| b.apply_delete(&id, result));
        });
    });

    let on_export = move |_| {
        let csv = board.with_untracked(|b| b.export_csv());
        if let Err(e) = save_text(CSV_FILE_NAME, CSV_MIME_TYPE, &csv) {
            log::error!("CSV export failed: {:?}", e);
        }
    };

    // Memo 只在提示本身变化时通知，输入表单或过滤不会重新计时
    let notice = Memo::new(move |_| board.with(|b| b.posted_notice()));
    let on_expire = Callback::new(move |seq: u32| {
        board.update(|b| {
            b.dismiss_notice(seq);
        });
    });

    let is_loading = move || board.with(|b| b.is_loading());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-6xl mx-auto space-y-8">
                <NoticeBanner notice=notice on_expire=on_expire />

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <ShoppingBag attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-bold px-2">"Sistema de Gestão de Pedidos"</span>
                    </div>
                    <div class="flex-none">
                        <button on:click=move |_| logout(auth) class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sair"
                        </button>
                    </div>
                </div>

                <Summary board=board />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <PedidoEditor board=board on_submit=submit />
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex flex-wrap items-center gap-2 p-6 pb-2">
                            <input
                                type="text"
                                placeholder="Filtrar pedidos..."
                                class="input input-bordered flex-1"
                                prop:value=move || board.with(|b| b.filter().to_string())
                                on:input=move |ev| board.update(|b| b.set_filter(event_target_value(&ev)))
                            />
                            <button on:click=on_export class="btn btn-success gap-2">
                                <Download attr:class="h-4 w-4" /> "Exportar CSV"
                            </button>
                            <button
                                on:click=move |_| load()
                                disabled=is_loading
                                class="btn btn-ghost btn-circle"
                                title="Recarregar"
                            >
                                <RefreshCw attr:class=move || if is_loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>

                        <PedidoTable board=board on_edit=on_edit on_delete=on_delete />
                    </div>
                </div>
            </div>
        </div>
    }
}
