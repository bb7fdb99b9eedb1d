//! 家具全球购：品牌墙与品牌详情

use leptos::prelude::*;
use leptos::task::spawn_local;
use zspace::catalog::Pagination;
use zspace::view::{brand_pagination, effective_brands};
use zspace_shared::{BrandDetail, BrandSummary, PageRequest};

use crate::components::icons::Close;
use crate::components::widgets::{Empty, Loading, Pager, Remote};
use crate::state::use_app_state;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 品牌墙一次取回全部品牌，在前端分页
const BRAND_WALL_REQUEST: PageRequest = PageRequest::new(1, 999);

#[component]
pub fn GlobalFurniturePage() -> impl IntoView {
    let app = use_app_state();
    let brands = RwSignal::new(Remote::<Vec<BrandSummary>>::Loading);
    let pagination = RwSignal::new(Pagination::default());

    spawn_local(async move {
        match app.api().get_brand_list(BRAND_WALL_REQUEST).await {
            Ok(page) => {
                let list = effective_brands(&page.records);
                pagination.set(brand_pagination(&list));
                brands.set(Remote::Ready(list));
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("[Brands] {e}").into());
                brands.set(Remote::Failed(e.user_message("品牌列表加载失败").to_string()));
            }
        }
    });

    let current_page = move || {
        brands.with(|state| match state {
            Remote::Ready(list) => pagination.with(|p| p.slice(list).to_vec()),
            _ => Vec::new(),
        })
    };

    view! {
        <main class="min-h-screen bg-white pt-16">
            <div class="bg-brand-600 py-16">
                <div class="container mx-auto px-4">
                    <h1 class="text-4xl md:text-5xl font-bold text-white text-center">"进口家具全球购"</h1>
                    <p class="text-brand-100 text-center mt-4 text-lg">"甄选全球顶级家具品牌，打造专属于您的品质生活"</p>
                </div>
            </div>

            <div class="container mx-auto px-4 py-16">
                {move || match brands.get() {
                    Remote::Loading => view! { <Loading /> }.into_any(),
                    Remote::Failed(message) => view! { <Empty message=message /> }.into_any(),
                    Remote::Ready(list) if list.is_empty() => view! { <Empty message="暂无品牌" /> }.into_any(),
                    Remote::Ready(_) => view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                            <For each=current_page key=|brand| brand.id.clone() let:brand>
                                <BrandTile brand=brand />
                            </For>
                        </div>
                    }
                    .into_any(),
                }}
                <Pager
                    pagination=pagination
                    on_select=move |page: usize| pagination.update(|p| {
                        p.set_page(page);
                    })
                />
            </div>

            <div class="bg-gray-50 py-16">
                <div class="container mx-auto px-4 text-center">
                    <p class="text-gray-600 text-lg">"我们与全球顶级家具品牌保持长期合作关系"</p>
                    <p class="text-gray-600 text-lg mt-2">"为您提供原装正品、专业配送、品质保障服务"</p>
                </div>
            </div>
        </main>
    }
}

#[component]
fn BrandTile(brand: BrandSummary) -> impl IntoView {
    let to = AppRoute::BrandDetail { id: brand.id.clone() }.to_path();

    view! {
        <div class="group relative">
            <Link to=to class="block">
                <div class="relative aspect-[4/3] overflow-hidden rounded-lg">
                    <img
                        src=brand.brand_logo.clone()
                        alt=brand.brand_name.clone()
                        class="absolute inset-0 w-full h-full object-cover group-hover:scale-105 transition-transform duration-500"
                    />
                    <div class="absolute inset-0 bg-gradient-to-t from-black/60 to-transparent opacity-0 group-hover:opacity-100 transition-opacity duration-300"></div>
                </div>
                <div class="absolute bottom-0 left-0 right-0 p-6 text-white">
                    <h3 class="text-2xl font-bold mb-2">{brand.brand_name.clone()}</h3>
                    <p class="text-sm text-white/90 opacity-0 group-hover:opacity-100 transition-opacity duration-300">
                        {brand.sub_product_name.clone().unwrap_or_default()}
                    </p>
                </div>
            </Link>
        </div>
    }
}

#[component]
pub fn BrandDetailPage(id: String) -> impl IntoView {
    let app = use_app_state();
    let detail = RwSignal::new(Remote::<BrandDetail>::Loading);

    spawn_local(async move {
        match app.api().get_brand_detail(&id).await {
            Ok(brand) => detail.set(Remote::Ready(brand)),
            Err(e) => {
                web_sys::console::warn_1(&format!("[Brands] {e}").into());
                detail.set(Remote::Failed(e.user_message("品牌详情加载失败").to_string()));
            }
        }
    });

    move || match detail.get() {
        Remote::Loading => view! { <main class="pt-32"><Loading /></main> }.into_any(),
        Remote::Failed(message) => view! { <main class="pt-32"><Empty message=message /></main> }.into_any(),
        Remote::Ready(brand) => view! { <BrandView brand=brand /> }.into_any(),
    }
}

#[component]
fn BrandView(brand: BrandDetail) -> impl IntoView {
    let preview = RwSignal::new(Option::<String>::None);
    let atlas = brand.atlas_list.clone();

    view! {
        <main class="min-h-screen bg-white pt-32 pb-16">
            <div class="container mx-auto px-4 text-center mb-12">
                <h1 class="text-4xl md:text-5xl font-bold text-gray-900 mb-6">{brand.brand_name.clone()}</h1>
                <div class="w-96 max-w-full h-0.5 mx-auto mb-8 bg-gradient-to-r from-transparent via-brand-600 to-transparent"></div>
                <div class="relative w-full max-w-4xl mx-auto mb-12 aspect-[16/9]">
                    <img src=brand.brand_logo.clone() alt=brand.brand_name.clone() class="absolute inset-0 w-full h-full object-cover rounded-lg shadow-lg" />
                </div>
                <div class="flex flex-col sm:flex-row gap-6 justify-center items-center mb-8">
                    {brand.atlas_link.clone().map(|href| view! {
                        <a href=href target="_blank" rel="noopener noreferrer"
                            class="inline-flex items-center justify-center px-8 py-4 bg-brand-600 text-white rounded-full hover:bg-brand-700 text-lg font-medium min-w-[200px]">
                            "查看产品图册"
                        </a>
                    })}
                    {brand.brand_website_link.clone().map(|href| view! {
                        <a href=href target="_blank" rel="noopener noreferrer"
                            class="inline-flex items-center justify-center px-8 py-4 border-2 border-brand-600 text-brand-600 rounded-full hover:bg-brand-600 hover:text-white text-lg font-medium min-w-[200px]">
                            "进入品牌官网"
                        </a>
                    })}
                </div>
                <p class="max-w-4xl mx-auto mb-16 text-lg text-gray-700 leading-relaxed">{brand.brand_blurb.clone()}</p>
            </div>

            <div class="container mx-auto px-4">
                <div class="max-w-4xl mx-auto space-y-12">
                    {atlas
                        .into_iter()
                        .enumerate()
                        .map(|(i, image)| {
                            let src = image.clone();
                            view! {
                                <img
                                    src=src
                                    alt=format!("产品图片 {}", i + 1)
                                    class="w-full h-auto object-cover rounded-lg cursor-pointer"
                                    on:click=move |_| preview.set(Some(image.clone()))
                                />
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            {move || preview.get().map(|src| view! {
                <div class="fixed inset-0 bg-black/80 z-50 flex items-center justify-center p-4" on:click=move |_| preview.set(None)>
                    <div class="relative w-full max-w-5xl" on:click=|ev| ev.stop_propagation()>
                        <img src=src alt="预览图片" class="w-full max-h-[85vh] object-contain" />
                        <button
                            class="absolute top-4 right-4 text-white bg-black/50 rounded-full p-2 hover:bg-black/70"
                            on:click=move |_| preview.set(None)
                        >
                            <Close attr:class="h-6 w-6" />
                        </button>
                    </div>
                </div>
            })}
        </main>
    }
}
