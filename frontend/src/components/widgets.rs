//! 页面间共用的小部件：提示条、页码条、加载占位

use std::time::Duration;

use leptos::prelude::*;
use zspace::catalog::{PageEntry, Pagination};
use zspace::forms::Notice;

use crate::components::icons::{ChevronLeft, ChevronRight};

/// 右上角提示，3 秒后自动消失
#[component]
pub fn Toast(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    Effect::new(move |_| {
        if notice.with(Option::is_some) {
            set_timeout(move || notice.set(None), Duration::from_secs(3));
        }
    });

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-[60]">
                <div class=move || {
                    if notice.with(|n| n.as_ref().is_some_and(Notice::is_success)) {
                        "alert alert-success shadow-lg"
                    } else {
                        "alert alert-warning shadow-lg"
                    }
                }>
                    <span>
                        {move || notice.with(|n| n.as_ref().map(|n| n.text().to_string()).unwrap_or_default())}
                    </span>
                </div>
            </div>
        </Show>
    }
}

/// 页码条；只有一页时不渲染
#[component]
pub fn Pager(
    #[prop(into)] pagination: Signal<Pagination>,
    #[prop(into)] on_select: Callback<usize>,
) -> impl IntoView {
    let button_class = |active: bool| {
        if active {
            "btn btn-sm bg-brand-600 text-white border-brand-600"
        } else {
            "btn btn-sm btn-ghost"
        }
    };

    view! {
        <Show when=move || pagination.with(|p| p.page_count() > 1)>
            <div class="flex items-center justify-center gap-2 mt-10">
                <button
                    class="btn btn-sm btn-ghost"
                    disabled=move || !pagination.with(Pagination::has_prev)
                    on:click=move |_| on_select.run(pagination.get_untracked().current().saturating_sub(1))
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                {move || {
                    let current = pagination.with(Pagination::current);
                    pagination
                        .with(Pagination::page_numbers)
                        .into_iter()
                        .map(|entry| match entry {
                            PageEntry::Page(page) => view! {
                                <button
                                    class=button_class(page == current)
                                    on:click=move |_| on_select.run(page)
                                >
                                    {page}
                                </button>
                            }
                            .into_any(),
                            PageEntry::Ellipsis => view! { <span class="px-2 text-gray-400">"..."</span> }.into_any(),
                        })
                        .collect_view()
                }}
                <button
                    class="btn btn-sm btn-ghost"
                    disabled=move || !pagination.with(Pagination::has_next)
                    on:click=move |_| on_select.run(pagination.get_untracked().current() + 1)
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </Show>
    }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <span class="loading loading-spinner loading-lg text-brand-600"></span>
        </div>
    }
}

/// 加载失败或数据为空时的占位
#[component]
pub fn Empty(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="text-center py-24 text-gray-500">{message}</div>
    }
}

/// 单次加载的页面数据
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Loading,
    Failed(String),
    Ready(T),
}

/// 浏览器后退
pub fn go_back() {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.back();
    }
}
