//! 站点框架：导航栏、页脚与悬浮按钮

use leptos::prelude::*;

use crate::components::icons::{ArrowUp, Close, Headset, Home, Menu, QrCode, UserCircle};
use crate::state::use_app_state;
use crate::web::route::{AppRoute, DEFAULT_CATALOG_CATEGORY};
use crate::web::router::{Link, use_router};

pub const SERVICE_PHONE: &str = "021-61259481";

fn menu_items() -> [(&'static str, String); 4] {
    [
        ("首页", AppRoute::Home.to_path()),
        ("设计严选库", AppRoute::catalog(DEFAULT_CATALOG_CATEGORY).to_path()),
        ("家具全球购", AppRoute::GlobalFurniture.to_path()),
        ("ZSPACEPLUS", AppRoute::ZSpacePlus.to_path()),
    ]
}

#[component]
pub fn Navbar() -> impl IntoView {
    let app = use_app_state();
    let router = use_router();
    let (menu_open, set_menu_open) = signal(false);

    let snapshot = app.snapshot();
    let avatar = move || snapshot.with(|s| s.user.as_ref().and_then(|u| u.avatar.clone()));
    let user_name = move || {
        snapshot.with(|s| s.user.as_ref().map(|u| u.display_name().to_string()).unwrap_or_default())
    };
    let logged_in = app.is_logged_in_signal();

    let on_logout = move |_| {
        app.logout();
        router.go(AppRoute::Home);
    };

    view! {
        <nav class="fixed w-full z-50 bg-white shadow-sm">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-20">
                    <Link to="/" class="flex-shrink-0">
                        <img src="/images/logo.png" alt="Z Space plus Logo" class="h-10 object-contain" />
                    </Link>

                    <div class="hidden md:flex md:items-center">
                        <div class="flex items-baseline space-x-8">
                            {menu_items()
                                .into_iter()
                                .map(|(title, href)| view! {
                                    <Link to=href class="text-brand-700 hover:text-brand-900 hover:font-bold px-3 py-2 text-sm transition-all">
                                        {title}
                                    </Link>
                                })
                                .collect_view()}
                        </div>
                        <div class="ml-8">
                            <Show
                                when=move || logged_in.get()
                                fallback=|| view! {
                                    <Link to="/auth" class="btn btn-sm bg-brand-600 text-white px-8">"登录/注册"</Link>
                                }
                            >
                                <div class="dropdown dropdown-end">
                                    <div tabindex="0" role="button" class="avatar placeholder cursor-pointer">
                                        {move || match avatar() {
                                            Some(src) => view! {
                                                <div class="w-10 rounded-full"><img src=src alt="avatar" /></div>
                                            }
                                            .into_any(),
                                            None => view! {
                                                <UserCircle attr:class="h-10 w-10 text-brand-700" />
                                            }
                                            .into_any(),
                                        }}
                                    </div>
                                    <ul tabindex="0" class="dropdown-content menu bg-base-100 rounded-box shadow w-40 mt-2">
                                        <li class="menu-title">{user_name}</li>
                                        <li><a on:click=on_logout>"退出登录"</a></li>
                                    </ul>
                                </div>
                            </Show>
                        </div>
                    </div>

                    <div class="md:hidden">
                        <button
                            class="text-brand-700 hover:text-brand-900"
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            {move || if menu_open.get() {
                                view! { <Close attr:class="h-6 w-6" /> }.into_any()
                            } else {
                                view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                            }}
                        </button>
                    </div>
                </div>
            </div>

            <div class=move || {
                let base = "fixed top-0 right-0 h-full w-64 bg-brand-600/90 backdrop-blur-lg transition-transform duration-300 z-50";
                if menu_open.get() { format!("{base} translate-x-0") } else { format!("{base} translate-x-full") }
            }>
                <div class="flex flex-col p-8" on:click=move |_| set_menu_open.set(false)>
                    <button class="self-end text-white mb-8">
                        <Close attr:class="h-6 w-6" />
                    </button>
                    <div class="flex flex-col space-y-4">
                        {menu_items()
                            .into_iter()
                            .map(|(title, href)| view! {
                                <Link to=href class="text-white hover:text-brand-200">{title}</Link>
                            })
                            .collect_view()}
                        <Link to="/auth" class="text-white hover:text-brand-200">"登录/注册"</Link>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-brand-600 text-white pt-8 pb-8">
            <div class="container mx-auto px-4">
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-2">
                        <h4 class="text-lg font-medium mb-3 pb-2 border-b border-white/10">"联系我们"</h4>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div class="space-y-1.5">
                                <p class="text-xl font-bold">{SERVICE_PHONE}</p>
                                <p class="text-white/80 text-sm">"邮箱：info@zspaceplus.com"</p>
                            </div>
                            <div class="space-y-1.5">
                                <p class="text-white/80 text-sm">"地址：上海市嘉定区娄塘路988弄"</p>
                                <p class="text-white/80 text-sm">"慧创园视界南写字楼1号5号1-2层"</p>
                            </div>
                        </div>
                        <div class="mt-4 pt-3 border-t border-white/5 flex flex-col sm:flex-row gap-2 sm:gap-4 text-xs text-white/60">
                            <span>"ZSPACEPLUS是一家专注集合品牌的渠道运营商"</span>
                            <span>"备案号：沪ICP备20024331号"</span>
                        </div>
                    </div>
                    <div class="flex justify-center lg:justify-end">
                        <QrCards size="w-20 h-20" caption="text-xs text-white/70" />
                    </div>
                </div>
            </div>
        </footer>
    }
}

/// 官方微信与官方商城二维码
#[component]
fn QrCards(size: &'static str, caption: &'static str) -> impl IntoView {
    [("/qr-weixin.jpg", "官方微信"), ("/qr-web.jpg", "官方商城")]
        .into_iter()
        .map(|(src, title)| {
            view! {
                <div class="text-center mx-3">
                    <div class=format!("{size} bg-white p-1.5 rounded-lg mb-2")>
                        <img src=src alt=title class="w-full h-full rounded" />
                    </div>
                    <p class=caption>{title}</p>
                </div>
            }
        })
        .collect_view()
}

#[component]
pub fn FloatingActions() -> impl IntoView {
    let (show_qr, set_show_qr) = signal(false);
    let button = "w-12 h-12 bg-brand-600 rounded-full flex items-center justify-center text-white hover:bg-brand-700 transition-colors shadow-lg";

    let scroll_to_top = move |_| {
        if let Some(window) = web_sys::window() {
            let options = web_sys::ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    };

    view! {
        <div class="fixed right-6 bottom-[20%] z-50 select-none">
            <div class="flex flex-col gap-3">
                <div class="relative">
                    <button
                        class=button
                        on:mouseenter=move |_| set_show_qr.set(true)
                        on:mouseleave=move |_| set_show_qr.set(false)
                    >
                        <QrCode attr:class="h-6 w-6" />
                    </button>
                    <Show when=move || show_qr.get()>
                        <div class="absolute right-full top-1/2 -translate-y-1/2 mr-4 bg-white p-4 rounded-xl shadow-xl flex w-80">
                            <QrCards size="w-32 h-32" caption="text-sm text-gray-600" />
                        </div>
                    </Show>
                </div>
                <div class="relative group">
                    <button class=button>
                        <Headset attr:class="h-6 w-6" />
                    </button>
                    <div class="absolute right-full top-1/2 -translate-y-1/2 mr-4 bg-white px-4 py-2 rounded-lg shadow-lg pointer-events-none opacity-0 group-hover:opacity-100 transition-opacity whitespace-nowrap">
                        <p class="text-brand-600 font-medium">{SERVICE_PHONE}</p>
                    </div>
                </div>
                <Link to="/" class=button>
                    <Home attr:class="h-6 w-6" />
                </Link>
                <button class=button on:click=scroll_to_top>
                    <ArrowUp attr:class="h-6 w-6" />
                </button>
            </div>
        </div>
    }
}
