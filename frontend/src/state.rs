//! 全局状态上下文
//!
//! 根组件创建 `AppStore` 与 `ZSpaceApi`，经 Context 注入各页面。
//! 二者基于 `Rc`，放在本地 `StoredValue` 中；`snapshot` 信号镜像存储内容，
//! 负责驱动界面更新。

use leptos::prelude::*;
use zspace::config::{
    KEY_API_BASE_URL, KEY_API_TIMEOUT_MS, KEY_APP_NAME, KEY_APP_VERSION, KEY_DEBUG,
    KEY_DEFAULT_LANGUAGE,
};
use zspace::forms::LoginForm;
use zspace::{ApiClient, ApiResult, AppStore, ClientConfig, StoreState, ZSpaceApi};

use crate::web::{BrowserStorage, FetchHttpClient};

pub type Api = ZSpaceApi<FetchHttpClient, BrowserStorage>;
pub type Store = AppStore<BrowserStorage>;

/// 编译期注入的配置（`ZSPACE_*` 环境变量），缺省时使用内置默认值
pub fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        let value = match key {
            KEY_API_BASE_URL => option_env!("ZSPACE_API_BASE_URL"),
            KEY_API_TIMEOUT_MS => option_env!("ZSPACE_API_TIMEOUT_MS"),
            KEY_APP_NAME => option_env!("ZSPACE_APP_NAME"),
            KEY_APP_VERSION => option_env!("ZSPACE_APP_VERSION"),
            KEY_DEFAULT_LANGUAGE => option_env!("ZSPACE_DEFAULT_LANGUAGE"),
            KEY_DEBUG => option_env!("ZSPACE_DEBUG"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// 应用上下文
#[derive(Clone, Copy)]
pub struct AppState {
    api: StoredValue<Api, LocalStorage>,
    store: StoredValue<Store, LocalStorage>,
    snapshot: RwSignal<StoreState>,
}

impl AppState {
    pub fn new() -> Self {
        let config = client_config();
        if let Err(e) = config.validate() {
            web_sys::console::warn_1(&format!("[Config] {e}").into());
        }
        if config.debug {
            web_sys::console::log_1(
                &format!("[Config] {} {} -> {}", config.app_name, config.app_version, config.base_url)
                    .into(),
            );
        }

        let store = AppStore::load(BrowserStorage);
        let api = ZSpaceApi::new(ApiClient::new(FetchHttpClient, BrowserStorage, config));
        let snapshot = RwSignal::new(store.snapshot());

        Self {
            api: StoredValue::new_local(api),
            store: StoredValue::new_local(store),
            snapshot,
        }
    }

    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    pub fn store(&self) -> Store {
        self.store.get_value()
    }

    /// 存储内容的响应式镜像
    pub fn snapshot(&self) -> ReadSignal<StoreState> {
        self.snapshot.read_only()
    }

    pub fn is_logged_in_signal(&self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || {
            snapshot.with(|s| s.token.as_deref().is_some_and(|t| !t.is_empty()))
        })
    }

    fn sync(&self) {
        self.snapshot.set(self.store().snapshot());
    }

    /// 根组件挂载时获取公司信息、品类列表与当前用户
    pub async fn bootstrap(self) {
        let (api, store) = (self.api(), self.store());
        store.bootstrap(&api).await;
        self.sync();
        self.refresh_user().await;
    }

    async fn refresh_user(self) {
        let store = self.store();
        if !store.is_logged_in() {
            return;
        }
        match self.api().get_user_info().await {
            Ok(user) => {
                if let Err(e) = store.set_user(Some(user)) {
                    web_sys::console::warn_1(&format!("[Store] {e}").into());
                }
                self.sync();
            }
            Err(e) => web_sys::console::warn_1(&format!("[Store] user info unavailable: {e}").into()),
        }
    }

    pub async fn login(self, form: LoginForm) -> ApiResult<()> {
        form.login(&self.api(), &self.store()).await?;
        self.sync();
        self.refresh_user().await;
        Ok(())
    }

    pub fn logout(self) {
        if let Err(e) = self.store().clear_session() {
            web_sys::console::warn_1(&format!("[Store] {e}").into());
        }
        self.sync();
    }
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
