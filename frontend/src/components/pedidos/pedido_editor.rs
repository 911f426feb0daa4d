//! 新建/编辑表单
//!
//! 只负责字段渲染与输入绑定，校验在提交时由看板完成。

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use pedidos::PedidoBoard;

use crate::components::icons::{Pencil, Plus};

#[component]
pub fn PedidoEditor(board: RwSignal<PedidoBoard>, on_submit: Callback<()>) -> impl IntoView {
    let is_editing = move || board.with(|b| b.editing().is_some());
    let is_saving = move || board.with(|b| b.is_saving());

    view! {
        <form
            class="flex flex-wrap gap-2"
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <input
                type="text"
                placeholder="Cliente"
                class="input input-bordered flex-1"
                prop:value=move || board.with(|b| b.form.cliente.clone())
                on:input=move |ev| board.update(|b| b.form.cliente = event_target_value(&ev))
            />
            <input
                type="text"
                inputmode="decimal"
                placeholder="Valor"
                class="input input-bordered flex-1"
                prop:value=move || board.with(|b| b.form.valor.clone())
                on:input=move |ev| board.update(|b| b.form.valor = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Descrição"
                class="input input-bordered flex-[2]"
                prop:value=move || board.with(|b| b.form.descricao.clone())
                on:input=move |ev| board.update(|b| b.form.descricao = event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary gap-2" disabled=is_saving>
                {move || if is_editing() {
                    view! { <Pencil attr:class="h-4 w-4" /> "Atualizar Pedido" }.into_any()
                } else {
                    view! { <Plus attr:class="h-4 w-4" /> "Adicionar Pedido" }.into_any()
                }}
            </button>
            <Show when=is_editing>
                <button type="button" class="btn btn-ghost" on:click=move |_| board.update(|b| b.cancel_edit())>
                    "Cancelar"
                </button>
            </Show>
        </form>
    }
}
