//! 定时器封装模块
//!
//! `Interval` 直接使用 `setInterval`；一次性等待使用 `gloo-timers` 的 future。

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建周期性定时器；拿不到 window 或注册失败时返回 `None`
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let window = web_sys::window()?;
        let timeout = i32::try_from(millis).unwrap_or(i32::MAX);

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            )
            .ok()?;

        Some(Self { handle, closure })
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 等待指定时长，供目录页去抖使用
pub fn sleep(duration: Duration) -> TimeoutFuture {
    TimeoutFuture::new(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX))
}
