//! 原生 Web API 封装模块
//!
//! fetch、localStorage 与定时器的轻量封装，
//! 接入核心 crate 的 `HttpClient` / `KeyValueStorage` 抽象。

mod http;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use http::FetchHttpClient;
pub use storage::BrowserStorage;
pub use timer::{Interval, sleep};
