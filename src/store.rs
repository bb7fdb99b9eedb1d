//! 全局客户端状态
//!
//! 以一条 `app-storage` 记录持久化 `{state, version}`，
//! 由根布局创建后通过上下文注入各页面，不使用全局单例。

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use zspace_shared::{CategoryItem, CompanyInfo, UserInfo};

use crate::api::ZSpaceApi;
use crate::client::TOKEN_STORAGE_KEY;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::storage::KeyValueStorage;

pub const STORE_STORAGE_KEY: &str = "app-storage";
const STORE_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub company_info: Option<CompanyInfo>,
    #[serde(default)]
    pub category_list: Option<Vec<CategoryItem>>,
}

#[derive(Serialize, Deserialize)]
struct PersistedStore {
    state: StoreState,
    #[serde(default)]
    version: u32,
}

/// 持久化的共享状态容器，克隆体共享同一份数据
///
/// 读方需要容忍字段在首次加载完成前为空。
#[derive(Clone)]
pub struct AppStore<S> {
    storage: S,
    state: Rc<RefCell<StoreState>>,
}

impl<S: KeyValueStorage> AppStore<S> {
    /// 从存储恢复；记录缺失或无法解析时以空状态开始
    pub fn load(storage: S) -> Self {
        let state = storage
            .get(STORE_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<PersistedStore>(&raw) {
                Ok(persisted) => Some(persisted.state),
                Err(e) => {
                    warn!(error = %e, key = STORE_STORAGE_KEY, "discarding unreadable store entry");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            storage,
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state
            .borrow()
            .token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.borrow().user.clone()
    }

    pub fn company_info(&self) -> Option<CompanyInfo> {
        self.state.borrow().company_info.clone()
    }

    pub fn category_list(&self) -> Option<Vec<CategoryItem>> {
        self.state.borrow().category_list.clone()
    }

    // --- 写入 ---

    /// 保存登录 token，同时写入 HTTP 客户端读取的原始键
    pub fn set_token(&self, token: &str) -> ApiResult<()> {
        if !self.storage.set(TOKEN_STORAGE_KEY, token) {
            return Err(ApiError::storage("failed to write token").in_op("store.set_token"));
        }
        self.state.borrow_mut().token = Some(token.to_string());
        info!("session token stored");
        self.persist().map_err(|e| e.in_op("store.set_token"))
    }

    pub fn set_user(&self, user: Option<UserInfo>) -> ApiResult<()> {
        self.state.borrow_mut().user = user;
        self.persist().map_err(|e| e.in_op("store.set_user"))
    }

    pub fn set_company_info(&self, info: CompanyInfo) -> ApiResult<()> {
        self.state.borrow_mut().company_info = Some(info);
        self.persist().map_err(|e| e.in_op("store.set_company_info"))
    }

    pub fn set_category_list(&self, items: Vec<CategoryItem>) -> ApiResult<()> {
        self.state.borrow_mut().category_list = Some(items);
        self.persist().map_err(|e| e.in_op("store.set_category_list"))
    }

    /// 退出登录：清除 token 与用户
    pub fn clear_session(&self) -> ApiResult<()> {
        {
            let mut state = self.state.borrow_mut();
            state.token = None;
            state.user = None;
        }
        self.storage.delete(TOKEN_STORAGE_KEY);
        info!("session cleared");
        self.persist().map_err(|e| e.in_op("store.clear_session"))
    }

    fn persist(&self) -> ApiResult<()> {
        let persisted = PersistedStore {
            state: self.snapshot(),
            version: STORE_VERSION,
        };
        let raw = serde_json::to_string(&persisted)?;
        if self.storage.set(STORE_STORAGE_KEY, &raw) {
            Ok(())
        } else {
            Err(ApiError::storage(format!("failed to write {STORE_STORAGE_KEY}")))
        }
    }

    // --- 启动加载 ---

    /// 根布局挂载时获取公司信息与品类列表；失败时保留旧值
    pub async fn bootstrap<C>(&self, api: &ZSpaceApi<C, S>)
    where
        C: HttpClient,
    {
        let (company, categories) =
            futures::join!(api.fetch_company_info(), api.fetch_category_list());

        match company {
            Ok(info) => {
                if let Err(e) = self.set_company_info(info) {
                    warn!(error = %e, "company info not persisted");
                }
            }
            Err(e) => warn!(error = %e, "company info unavailable"),
        }
        match categories {
            Ok(items) => {
                if let Err(e) = self.set_category_list(items) {
                    warn!(error = %e, "category list not persisted");
                }
            }
            Err(e) => warn!(error = %e, "category list unavailable"),
        }
    }
}
