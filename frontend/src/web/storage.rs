//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现 `zspace::KeyValueStorage`。

use zspace::KeyValueStorage;

/// 浏览器 `localStorage`
///
/// 无状态句柄，每次操作时重新获取 `window.localStorage`；
/// 隐私模式等拿不到存储的情况下读返回 `None`，写返回 `false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
