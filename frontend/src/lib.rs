//! ZSPACEPLUS 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `state`: 全局状态（存储 + 接口）经 Context 注入
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: 页面与 UI 组件

mod components {
    pub mod brands;
    pub mod catalog;
    pub mod company;
    pub mod contact_form;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod product_detail;
    mod widgets;
}
mod state;
pub(crate) mod web;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::brands::{BrandDetailPage, GlobalFurniturePage};
use crate::components::catalog::CatalogPage;
use crate::components::company::{AboutPage, ZSpacePlusPage};
use crate::components::home::HomePage;
use crate::components::layout::{FloatingActions, Footer, Navbar};
use crate::components::login::AuthPage;
use crate::components::product_detail::ProductDetailPage;
use crate::state::AppState;
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Products { category } => view! { <CatalogPage category=category /> }.into_any(),
        AppRoute::ProductDetail { id, .. } => view! { <ProductDetailPage id=id /> }.into_any(),
        AppRoute::GlobalFurniture => view! { <GlobalFurniturePage /> }.into_any(),
        AppRoute::BrandDetail { id } => view! { <BrandDetailPage id=id /> }.into_any(),
        AppRoute::ZSpacePlus => view! { <ZSpacePlusPage /> }.into_any(),
        AppRoute::About => view! { <AboutPage /> }.into_any(),
        AppRoute::Auth => view! { <AuthPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-brand-600">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                    <Link to=AppRoute::Home.to_path() class="btn bg-brand-600 text-white mt-8">"返回首页"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建全局状态并注入
    let app = AppState::new();
    provide_context(app);

    // 2. 拉取公司信息、品类列表与当前用户
    spawn_local(app.bootstrap());

    // 3. 登录状态信号注入路由服务
    let is_authenticated = app.is_logged_in_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
            <Footer />
            <FloatingActions />
        </Router>
    }
}
