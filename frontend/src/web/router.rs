//! 路由服务模块 - 核心引擎
//!
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程："解析 -> 守卫 -> 写入 History -> 更新信号"。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 用于重定向，不留下历史记录
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 路由器服务
///
/// 通过注入的登录状态信号实现守卫，与全局状态解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    pub fn go(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 只同步地址栏，不切换页面（页面内部状态已自行更新时使用）
    pub fn replace_address(&self, route: &AppRoute) {
        replace_history_state(&route.to_path());
    }

    /// 导航到指定路由
    ///
    /// `use_push` 为 false 时使用 replaceState。
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let target_route = self.guard(target_route);
        let path = target_route.to_path();

        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(target_route);
        scroll_to_top();
    }

    /// 已登录用户访问登录页时改去首页
    fn guard(&self, target_route: AppRoute) -> AppRoute {
        if target_route.should_redirect_when_authenticated() && self.is_authenticated.get_untracked() {
            web_sys::console::log_1(&"[Router] Already signed in. Redirecting home.".into());
            return AppRoute::auth_success_redirect();
        }
        target_route
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let guarded = router.guard(target_route.clone());
            if guarded != target_route {
                replace_history_state(&guarded.to_path());
            }
            router.set_route.set(guarded);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与页面同寿命
        closure.forget();
    }

    /// 登录状态变为已登录时离开登录页
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                web_sys::console::log_1(&"[Router] Signed in, leaving auth page.".into());
                router.navigate_to_route(AppRoute::auth_success_redirect(), false);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 首屏也走一次守卫
    let initial = router.current_route.get_untracked();
    let guarded = router.guard(initial.clone());
    if guarded != initial {
        router.navigate_to_route(guarded, false);
    }

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
///
/// 在 `Router` 之外调用时返回一个不带守卫的独立实例。
pub fn use_router() -> RouterService {
    use_context::<RouterService>().unwrap_or_else(|| {
        web_sys::console::warn_1(&"[Router] RouterService missing from context.".into());
        RouterService::new(Signal::derive(|| false))
    })
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 登录状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改走 History API
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
