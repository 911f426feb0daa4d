//! LocalStorage 封装模块
//!
//! 直接基于 `web_sys::Storage`，并为会话提供 [`TokenStore`] 实现。

use pedidos::TokenStore;
use pedidos_shared::TOKEN_STORAGE_KEY;

/// 浏览器 LocalStorage 的静态访问入口
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 键不存在或存储不可用（如隐私模式）时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 令牌保存在固定键 `token` 下
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(TOKEN_STORAGE_KEY)
    }

    fn save(&self, token: &str) -> bool {
        LocalStorage::set(TOKEN_STORAGE_KEY, token)
    }

    fn clear(&self) -> bool {
        LocalStorage::delete(TOKEN_STORAGE_KEY)
    }
}
