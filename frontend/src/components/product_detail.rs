use leptos::prelude::*;
use leptos::task::spawn_local;
use zspace::view::{Carousel, format_price};
use zspace_shared::ProductDetail;

use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::components::widgets::{Loading, Remote, go_back};
use crate::state::use_app_state;

const LOAD_FAILED: &str = "获取商品详情失败，请稍后重试";

#[component]
pub fn ProductDetailPage(id: String) -> impl IntoView {
    let app = use_app_state();
    let detail = RwSignal::new(Remote::<ProductDetail>::Loading);
    let carousel = RwSignal::new(Carousel::default());

    if id.trim().is_empty() {
        detail.set(Remote::Failed("商品ID不存在".to_string()));
    } else {
        spawn_local(async move {
            match app.api().get_product_detail(&id).await {
                Ok(product) => {
                    carousel.set(Carousel::new(product.product_cover_image_list.len()));
                    detail.set(Remote::Ready(product));
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[Product] {e}").into());
                    detail.set(Remote::Failed(e.user_message(LOAD_FAILED).to_string()));
                }
            }
        });
    }

    move || match detail.get() {
        Remote::Loading => view! { <main class="pt-32"><Loading /></main> }.into_any(),
        Remote::Failed(message) => view! {
            <main class="min-h-screen pt-32 text-center">
                <p class="text-red-600 mb-4">{message}</p>
                <button class="btn bg-brand-600 text-white" on:click=|_| go_back()>"返回列表"</button>
            </main>
        }
        .into_any(),
        Remote::Ready(product) => view! { <ProductView product=product carousel=carousel /> }.into_any(),
    }
}

#[component]
fn ProductView(product: ProductDetail, carousel: RwSignal<Carousel>) -> impl IntoView {
    let images = product.product_cover_image_list.clone();
    let current_image = move || {
        let index = carousel.with(Carousel::index);
        images.get(index).cloned().unwrap_or_default()
    };
    let price = format_price(product.retail_price.as_deref());
    let parameters: Vec<(&'static str, String)> = product
        .display_parameters()
        .into_iter()
        .map(|(key, value)| (key, value.to_string()))
        .collect();
    let stock = [
        ("现货数量", product.in_stock_quantity),
        ("在途数量", product.in_transit_quantity),
        ("特价数量", product.special_price_quantity),
    ];
    let qrcode = product
        .qrcode
        .clone()
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| "/qr-weixin.jpg".to_string());

    view! {
        <main class="min-h-screen bg-white">
            <div class="container mx-auto px-4 pt-32 pb-16">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                    <Show when=move || !carousel.with(Carousel::is_empty)>
                        <div class="relative h-[500px] bg-gray-50 rounded-lg overflow-hidden">
                            <img src=current_image.clone() alt="产品图片" class="absolute inset-0 w-full h-full object-contain" />
                            <button
                                class="absolute left-4 top-1/2 -translate-y-1/2 bg-white/80 hover:bg-white p-2 rounded-full text-brand-600"
                                on:click=move |_| carousel.update(|c| {
                                    c.prev();
                                })
                            >
                                <ChevronLeft attr:class="h-5 w-5" />
                            </button>
                            <button
                                class="absolute right-4 top-1/2 -translate-y-1/2 bg-white/80 hover:bg-white p-2 rounded-full text-brand-600"
                                on:click=move |_| carousel.update(|c| {
                                    c.next();
                                })
                            >
                                <ChevronRight attr:class="h-5 w-5" />
                            </button>
                            <div class="absolute bottom-4 left-1/2 -translate-x-1/2 flex gap-2">
                                {move || {
                                    let (len, current) = carousel.with(|c| (c.len(), c.index()));
                                    (0..len)
                                        .map(|i| {
                                            let class = if i == current {
                                                "h-2 rounded-full bg-brand-600 w-6"
                                            } else {
                                                "w-2 h-2 rounded-full bg-gray-300 hover:bg-gray-400"
                                            };
                                            view! {
                                                <button class=class on:click=move |_| carousel.update(|c| {
                                                    c.go_to(i);
                                                })></button>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </div>
                    </Show>

                    <div class="space-y-8">
                        <div>
                            <h1 class="text-3xl font-bold text-gray-900 mb-2">{product.product_name.clone()}</h1>
                            {(!price.is_empty()).then(|| view! {
                                <p class="text-2xl font-bold text-red-600 mt-2">"￥" {price.clone()}</p>
                            })}
                        </div>
                        <p class="text-gray-600 leading-relaxed">{product.product_blurb.clone()}</p>
                        <div class="bg-gray-50 p-6 rounded-lg flex items-center gap-6">
                            <img src=qrcode alt="小程序码" class="w-32 h-32 object-contain" />
                            <div>
                                <p class="text-lg font-medium text-gray-900 mb-2">"扫码查看更多详情"</p>
                                <p class="text-gray-500">"了解产品规格、价格等信息"</p>
                            </div>
                        </div>
                        {product.has_stock_info().then(|| view! {
                            <div class="space-y-2 mt-4">
                                {stock
                                    .into_iter()
                                    .filter_map(|(label, quantity)| quantity.map(|q| view! {
                                        <div class="flex items-center gap-4 bg-gray-50 p-4 rounded-lg">
                                            <span class="text-gray-500">{label}</span>
                                            <span class="text-gray-900">{format!("{q} 件")}</span>
                                        </div>
                                    }))
                                    .collect_view()}
                            </div>
                        })}
                    </div>
                </div>
            </div>

            <div class="bg-gray-50 py-16">
                <div class="container mx-auto px-4">
                    {(!parameters.is_empty()).then(|| view! {
                        <section class="mb-16">
                            <h2 class="text-2xl font-bold text-gray-900 mb-8">"商品参数"</h2>
                            <div class="grid grid-cols-1 md:grid-cols-3 gap-4 max-w-5xl">
                                {parameters
                                    .into_iter()
                                    .map(|(key, value)| view! {
                                        <div class="flex items-center gap-4 bg-white p-4 rounded-lg">
                                            <span class="text-gray-500">{key}</span>
                                            <span class="text-gray-900">{value}</span>
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                        </section>
                    })}
                    <section class="mb-16">
                        <h2 class="text-2xl font-bold text-gray-900 mb-8">"产品介绍"</h2>
                        <div class="product-show-content text-gray-600" inner_html=product.product_show.clone()></div>
                    </section>
                </div>
            </div>

            <div class="container mx-auto px-4 py-8 text-center">
                <button class="btn bg-brand-600 text-white" on:click=|_| go_back()>"返回列表"</button>
            </div>
        </main>
    }
}
