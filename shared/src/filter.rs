//! 订单列表的本地过滤
//!
//! 过滤只在内存中对已加载的列表进行，不请求服务端。

use serde::{Deserialize, Serialize};

use crate::Pedido;

/// 过滤范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterScope {
    /// 仅匹配客户名
    Client,
    /// 匹配客户名或描述
    #[default]
    ClientAndDescription,
}

impl FilterScope {
    /// 从配置字符串解析，无法识别时返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "client" | "cliente" => Some(Self::Client),
            "client_and_description" | "cliente_descricao" | "all" => {
                Some(Self::ClientAndDescription)
            }
            _ => None,
        }
    }
}

/// 判断订单是否匹配过滤字符串（不区分大小写的子串匹配）
///
/// 空字符串匹配所有订单。
pub fn matches(pedido: &Pedido, needle: &str, scope: FilterScope) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    if pedido.cliente().to_lowercase().contains(&needle) {
        return true;
    }

    match scope {
        FilterScope::Client => false,
        FilterScope::ClientAndDescription => pedido.descricao().to_lowercase().contains(&needle),
    }
}

/// 返回匹配的订单（保持原顺序）
pub fn filter_pedidos<'a>(
    pedidos: &'a [Pedido],
    needle: &str,
    scope: FilterScope,
) -> Vec<&'a Pedido> {
    pedidos
        .iter()
        .filter(|p| matches(p, needle, scope))
        .collect()
}
