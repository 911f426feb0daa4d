use leptos::prelude::*;
use pedidos::PedidoBoard;
use pedidos_shared::format_valor;

/// 汇总统计（基于全部已加载订单，过滤只影响 "exibindo"）
#[component]
pub fn Summary(board: RwSignal<PedidoBoard>) -> impl IntoView {
    let totals = move || board.with(|b| b.totals());
    let shown = move || board.with(|b| b.filtered().len());

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Total de pedidos"</div>
                <div class="stat-value text-primary">{move || totals().count}</div>
                <div class="stat-desc">{move || format!("Exibindo {}", shown())}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Valor total"</div>
                <div class="stat-value text-secondary text-2xl">
                    {move || format!("R$ {}", format_valor(totals().valor))}
                </div>
            </div>
        </div>
    }
}
