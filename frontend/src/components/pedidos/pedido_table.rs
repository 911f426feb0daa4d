use leptos::prelude::*;
use pedidos::PedidoBoard;
use pedidos_shared::Pedido;

use crate::components::icons::{Pencil, Trash2};

/// 行的 key 包含全部字段，编辑后的行会被重新渲染
fn row_key(pedido: &Pedido) -> String {
    format!(
        "{}|{}|{}|{}",
        pedido.id,
        pedido.cliente(),
        pedido.valor_formatado(),
        pedido.descricao()
    )
}

#[component]
pub fn PedidoTable(
    board: RwSignal<PedidoBoard>,
    on_edit: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let is_saving = move || board.with(|b| b.is_saving());
    let is_empty = move || board.with(|b| b.filtered().is_empty());
    let is_loading = move || board.with(|b| b.is_loading());

    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Cliente"</th>
                        <th>"Valor"</th>
                        <th>"Descrição"</th>
                        <th>"Ações"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || is_empty() && !is_loading()>
                        <tr>
                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                "Nenhum pedido encontrado."
                            </td>
                        </tr>
                    </Show>
                    <Show when=move || is_empty() && is_loading()>
                        <tr>
                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                <span class="loading loading-spinner loading-md"></span> " Carregando..."
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=move || board.with(|b| b.filtered().into_iter().cloned().collect::<Vec<_>>())
                        key=row_key
                        children=move |pedido: Pedido| {
                            let row_id = pedido.id.clone();
                            let edit_id = pedido.id.clone();
                            let delete_id = pedido.id.clone();
                            let row_class = move || {
                                if board.with(|b| b.editing() == Some(row_id.as_str())) {
                                    "bg-warning/10"
                                } else {
                                    ""
                                }
                            };
                            view! {
                                <tr class=row_class>
                                    <td class="font-mono text-sm opacity-70">{pedido.id.clone()}</td>
                                    <td class="font-bold">{pedido.cliente().to_string()}</td>
                                    <td class="font-mono">{format!("R$ {}", pedido.valor_formatado())}</td>
                                    <td>{pedido.descricao().to_string()}</td>
                                    <td>
                                        <div class="flex gap-1">
                                            <button
                                                class="btn btn-warning btn-sm btn-square"
                                                title="Editar"
                                                disabled=is_saving
                                                on:click=move |_| on_edit.run(edit_id.clone())
                                            >
                                                <Pencil attr:class="h-4 w-4" />
                                            </button>
                                            <button
                                                class="btn btn-error btn-sm btn-square"
                                                title="Excluir"
                                                disabled=is_saving
                                                on:click=move |_| on_delete.run(delete_id.clone())
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
