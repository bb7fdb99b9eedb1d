//! ZSpace 站点客户端
//!
//! 远程接口、全局状态与商品目录筛选逻辑，不依赖任何渲染框架，
//! 可在原生环境下直接测试；浏览器端由 `zspace-frontend` 提供传输与存储实现。

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod request;
pub mod storage;
pub mod store;
pub mod view;

pub use api::{CatalogSource, ZSpaceApi};
pub use client::{ApiClient, TOKEN_STORAGE_KEY};
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorStatus, ApiResult};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{AppStore, StoreState};
