//! CSV 导出
//!
//! 导出的是当前加载的完整列表（不是过滤后的结果）。

use crate::Pedido;

pub const CSV_FILE_NAME: &str = "pedidos.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";
pub const CSV_HEADER: [&str; 4] = ["ID", "Cliente", "Valor", "Descrição"];

/// 按需给字段加引号：包含逗号、引号或换行时用双引号包裹，内部引号加倍
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// 将订单序列化为 CSV 文本：表头 + 每个订单一行，行之间用 `\n` 分隔
pub fn to_csv(pedidos: &[Pedido]) -> String {
    let mut lines = Vec::with_capacity(pedidos.len() + 1);
    lines.push(row(CSV_HEADER));

    for p in pedidos {
        let valor = p.valor_formatado();
        lines.push(row([p.id.as_str(), p.cliente(), valor.as_str(), p.descricao()]));
    }

    lines.join("\n")
}
