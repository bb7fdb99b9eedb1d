//! 首页：主视觉轮播、设计严选、服务优势与联系表单

use leptos::prelude::*;
use leptos::task::spawn_local;
use zspace::view::{Carousel, visible};
use zspace_shared::{Banner, ProductBanner};

use crate::components::contact_form::ContactForm;
use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::state::use_app_state;
use crate::web::Interval;
use crate::web::route::AppRoute;
use crate::web::router::Link;

const AUTOPLAY_MS: u32 = 5000;

/// 轮播自动播放；定时器随组件销毁而清除
fn autoplay(carousel: RwSignal<Carousel>) {
    let interval = Interval::new(AUTOPLAY_MS, move || {
        carousel.update(|c| {
            c.next();
        });
    });
    if interval.is_none() {
        web_sys::console::warn_1(&"[Carousel] autoplay unavailable".into());
    }
    StoredValue::new_local(interval);
}

fn dots(carousel: RwSignal<Carousel>, active: &'static str, idle: &'static str) -> impl IntoView {
    move || {
        let (len, current) = carousel.with(|c| (c.len(), c.index()));
        (0..len)
            .map(|i| {
                let class = if i == current { active } else { idle };
                view! {
                    <button
                        class=class
                        on:click=move |_| carousel.update(|c| {
                            c.go_to(i);
                        })
                    ></button>
                }
            })
            .collect_view()
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main>
            <HeroBanner />
            <ProductShowcase />
            <ServiceAdvantage />
            <ContactForm />
        </main>
    }
}

#[component]
pub fn HeroBanner() -> impl IntoView {
    let app = use_app_state();
    let banners = RwSignal::new(Vec::<Banner>::new());
    let carousel = RwSignal::new(Carousel::default());

    spawn_local(async move {
        match app.api().get_banner_list().await {
            Ok(list) => {
                let list = visible(&list);
                carousel.update(|c| c.set_len(list.len()));
                banners.set(list);
            }
            Err(e) => web_sys::console::warn_1(&format!("[Home] banners: {e}").into()),
        }
    });
    autoplay(carousel);

    let current = move || {
        let index = carousel.with(Carousel::index);
        banners.with(|list| list.get(index).cloned())
    };

    view! {
        <section class="relative h-screen w-full overflow-hidden bg-brand-700">
            {move || current().map(|banner| view! {
                <div class="absolute inset-0">
                    <img src=banner.cover_image.clone() alt=banner.title1.clone() class="w-full h-full object-cover" />
                    <div class="absolute inset-0 bg-black/30"></div>
                    <div class="absolute inset-0 flex flex-col items-center justify-center text-white text-center px-4">
                        <h1 class="text-4xl md:text-6xl font-bold mb-4">{banner.title1.clone()}</h1>
                        <h2 class="text-xl md:text-2xl mb-2">{banner.title2.clone()}</h2>
                        {banner.title3.clone().map(|t| view! { <p class="text-lg text-white/80">{t}</p> })}
                    </div>
                </div>
            })}
            <div class="absolute bottom-8 left-1/2 -translate-x-1/2 flex gap-3">
                {dots(carousel, "w-8 h-2 rounded-full bg-white", "w-2 h-2 rounded-full bg-white/50")}
            </div>
        </section>
    }
}

#[component]
pub fn ProductShowcase() -> impl IntoView {
    let app = use_app_state();
    let slides = RwSignal::new(Vec::<ProductBanner>::new());
    let carousel = RwSignal::new(Carousel::default());

    spawn_local(async move {
        match app.api().get_product_banner_list().await {
            Ok(list) => {
                let list = visible(&list);
                carousel.update(|c| c.set_len(list.len()));
                slides.set(list);
            }
            Err(e) => web_sys::console::warn_1(&format!("[Home] product banners: {e}").into()),
        }
    });
    autoplay(carousel);

    let current = move || {
        let index = carousel.with(Carousel::index);
        slides.with(|list| list.get(index).cloned())
    };
    let categories = [("家具", "furniture"), ("灯具", "lighting"), ("配饰", "decor")];

    view! {
        <section class="container mx-auto px-4 py-16">
            <div class="mb-8">
                <h2 class="text-4xl font-bold text-brand-600 mb-2">"Design Selection"</h2>
                <div class="flex items-center gap-4">
                    <h3 class="text-3xl font-bold text-brand-600">"设计严选"</h3>
                    <span class="text-gray-500">"毫不费力 创意开关"</span>
                </div>
            </div>
            <div class="flex flex-col md:flex-row gap-8">
                <div class="flex md:flex-col gap-4 md:w-40">
                    {categories
                        .into_iter()
                        .map(|(label, id)| view! {
                            <Link to=AppRoute::catalog(id).to_path() class="btn btn-outline border-brand-600 text-brand-600 hover:bg-brand-600 hover:text-white">
                                {label}
                            </Link>
                        })
                        .collect_view()}
                </div>
                <div class="relative flex-1 overflow-hidden rounded-2xl bg-gray-50">
                    {move || current().map(|slide| view! {
                        <div class="grid md:grid-cols-2 gap-6 items-center">
                            <img src=slide.cover_image.clone() alt=slide.title.clone() class="w-full h-96 object-cover" />
                            <div class="p-6 space-y-3">
                                <h4 class="text-2xl font-bold text-gray-900">{slide.title.clone()}</h4>
                                {slide.introduce.clone().map(|text| view! {
                                    <p class="text-gray-600">"品牌介绍:" {text}</p>
                                })}
                                {slide.designer.clone().map(|name| view! {
                                    <p class="text-brand-600 pt-2">"设计师:" {name}</p>
                                })}
                            </div>
                        </div>
                    })}
                    <button
                        class="absolute left-4 top-1/2 -translate-y-1/2 btn btn-circle btn-sm bg-white/80"
                        on:click=move |_| carousel.update(|c| {
                            c.prev();
                        })
                    >
                        <ChevronLeft attr:class="h-4 w-4" />
                    </button>
                    <button
                        class="absolute right-4 top-1/2 -translate-y-1/2 btn btn-circle btn-sm bg-white/80"
                        on:click=move |_| carousel.update(|c| {
                            c.next();
                        })
                    >
                        <ChevronRight attr:class="h-4 w-4" />
                    </button>
                    <div class="absolute bottom-4 left-1/2 -translate-x-1/2 flex gap-2">
                        {dots(carousel, "w-6 h-2 rounded-full bg-brand-600", "w-2 h-2 rounded-full bg-brand-600/40")}
                    </div>
                </div>
            </div>
        </section>
    }
}

/// 服务优势，内容来自全局状态中的公司信息
#[component]
pub fn ServiceAdvantage() -> impl IntoView {
    let snapshot = use_app_state().snapshot();
    let services = move || {
        snapshot.with(|s| {
            s.company_info
                .as_ref()
                .map(|info| info.service_list.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <section class="w-full bg-brand-600 text-white py-12">
            <div class="container mx-auto px-4">
                <div class="mb-8">
                    <h2 class="text-4xl font-bold mb-2">"Service"</h2>
                    <div class="flex items-center gap-4">
                        <h3 class="text-3xl font-bold">"服务优势"</h3>
                        <span class="text-white/80">"全球甄选 合作省心"</span>
                    </div>
                </div>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    <For each=services key=|item| item.url.clone() let:item>
                        <div class="relative group">
                            <div class="relative h-80 overflow-hidden rounded-2xl mb-6">
                                <img src=item.url.clone() alt=item.string1.clone() class="w-full h-full object-cover group-hover:scale-105 transition-transform duration-700" />
                                <div class="absolute inset-0 flex items-center justify-center">
                                    <span class="text-8xl font-bold">{item.string1.clone()}</span>
                                </div>
                            </div>
                            <h4 class="text-2xl font-bold mb-1">{item.string2.clone()}</h4>
                            <p class="text-white/80">{item.string3.clone()}</p>
                        </div>
                    </For>
                </div>
            </div>
        </section>
    }
}
