//! 公司介绍：ZSPACEPLUS 页（内容来自全局状态中的公司信息）与关于页

use leptos::prelude::*;
use zspace_shared::{CustomField, MediaImage};

use crate::components::icons::MapPin;
use crate::state::use_app_state;

const COMPANY_BLURB: &str = "ZSPACEPLUS是一家专注集合品牌的美道运营商，致力于为广大从事进口家居产品销售的伙伴们提供全球进口家具、进口灯具、进口饰品、面料、墙纸、石材、饰面产品等咨询服务；持续发布世界各地的艺术家居新品，运用现代科技协助客户解决选品难及国际供应链周期长的问题；同时ZSPACEPLUS展厅打造集合品牌的沉浸式体验，品味生活，培训教育服务，定制服务，追寻属于自己的LIFESTYLE。";
const SHOWROOM_ADDRESS: &str = "上海市嘉定区曹安东路98号赛创新贸易商务中心5号楼1-2层";

const SOCIAL_QR_CODES: [(&str, &str); 5] = [
    ("公众号", "/qr/wechat-public.png"),
    ("微博号", "/qr/weibo.png"),
    ("抖音号", "/qr/douyin.png"),
    ("小红书", "/qr/xiaohongshu.png"),
    ("企业微信", "/qr/wechat-work.png"),
];

#[component]
fn PageHeading() -> impl IntoView {
    view! {
        <div class="pt-32 pb-16 text-center text-white">
            <h1 class="text-4xl md:text-6xl font-bold mb-4">"关于 ZSPACEPLUS"</h1>
            <h2 class="text-xl md:text-2xl text-brand-100">"ABOUT ZSPACEPLUS"</h2>
        </div>
    }
}

#[component]
fn Paragraph(field: Option<CustomField>) -> impl IntoView {
    let field = field.unwrap_or_default();
    view! {
        <h3 class="text-brand-100 text-lg md:text-xl mb-4 font-medium">{field.title}</h3>
        <p class="text-white/90 leading-relaxed">{field.content}</p>
    }
}

#[component]
pub fn ZSpacePlusPage() -> impl IntoView {
    let snapshot = use_app_state().snapshot();
    // 公司信息可能尚未加载完成，缺失的段落留空
    let field = move |index: usize| {
        snapshot.with(|s| {
            s.company_info
                .as_ref()
                .and_then(|info| info.custom_fields.get(index).cloned())
        })
    };
    let showroom = move || {
        snapshot.with(|s| {
            s.company_info
                .as_ref()
                .map(|info| info.showroom_image_list.clone())
                .unwrap_or_default()
        })
    };
    let media = move || {
        snapshot.with(|s| {
            s.company_info
                .as_ref()
                .map(|info| info.media_qrcode_list.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <main class="min-h-screen bg-gradient-to-b from-brand-600 to-brand-700">
            <PageHeading />

            <div class="container mx-auto px-4 py-16">
                <div class="max-w-5xl mx-auto bg-white/5 backdrop-blur-sm rounded-3xl p-8 md:p-12 text-white space-y-8">
                    <div class="flex flex-col md:flex-row gap-8 items-start">
                        <div class="flex-1">{move || view! { <Paragraph field=field(0) /> }}</div>
                        <div class="flex-1">{move || view! { <Paragraph field=field(1) /> }}</div>
                    </div>
                    <div class="border-t border-white/10 pt-8">
                        {move || view! { <Paragraph field=field(2) /> }}
                    </div>
                </div>
            </div>

            <div class="container mx-auto px-4 py-12">
                <h3 class="text-2xl text-center mb-10 text-white">"展厅实景"</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4 max-w-5xl mx-auto">
                    {move || {
                        let images = showroom();
                        if images.is_empty() {
                            view! { <div class="col-span-full text-center text-white/60 py-8">"暂无展厅实景图片"</div> }
                                .into_any()
                        } else {
                            images
                                .into_iter()
                                .enumerate()
                                .map(|(i, image)| view! {
                                    <div class="relative h-48 overflow-hidden rounded-lg group">
                                        <img
                                            src=image.url
                                            alt=format!("展厅照片 {}", i + 1)
                                            class="absolute inset-0 w-full h-full object-cover group-hover:scale-105 transition-transform duration-300"
                                        />
                                    </div>
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </div>

            <div class="container mx-auto px-4 py-16 text-white text-center">
                {move || {
                    let address = field(3).unwrap_or_default();
                    view! {
                        <div class="inline-flex items-center justify-center gap-4 mb-6 px-8 py-3 rounded-full bg-white/10">
                            <MapPin attr:class="h-5 w-5" />
                            <h3 class="text-xl font-medium">{address.title}</h3>
                        </div>
                        <p class="text-lg text-brand-100">{address.content}</p>
                    }
                }}
            </div>

            <div class="bg-white/5 py-20">
                <div class="container mx-auto px-4 grid grid-cols-2 md:grid-cols-3 lg:grid-cols-5 gap-8 justify-items-center">
                    {move || media().into_iter().map(media_card).collect_view()}
                </div>
            </div>
        </main>
    }
}

fn media_card(item: MediaImage) -> impl IntoView {
    let name = item.name.unwrap_or_default();
    view! {
        <div class="text-center group">
            <div class="w-32 h-32 mb-4 bg-white rounded-2xl p-4 shadow-lg group-hover:shadow-xl">
                <img src=item.url alt=name.clone() class="w-full h-full object-contain" />
            </div>
            <p class="text-white font-medium group-hover:text-brand-100">{name}</p>
        </div>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <main class="min-h-screen bg-brand-600">
            <PageHeading />

            <div class="container mx-auto px-4 py-12 text-white">
                <p class="text-lg md:text-xl leading-relaxed max-w-4xl mx-auto text-center mb-16">{COMPANY_BLURB}</p>
            </div>

            <div class="container mx-auto px-4 py-12 grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                {(1..=6)
                    .map(|i| view! {
                        <div class="relative h-72 overflow-hidden rounded-2xl group">
                            <img
                                src=format!("/about/image{i}.jpg")
                                alt=format!("展厅图片 {i}")
                                class="absolute inset-0 w-full h-full object-cover group-hover:scale-110 transition-transform duration-500"
                            />
                        </div>
                    })
                    .collect_view()}
            </div>

            <div class="container mx-auto px-4 py-16 text-white text-center">
                <div class="flex items-center justify-center gap-2 mb-4">
                    <MapPin attr:class="h-5 w-5" />
                    <h3 class="text-xl font-medium">"展厅地址"</h3>
                </div>
                <p class="text-lg text-brand-100">{SHOWROOM_ADDRESS}</p>
            </div>

            <div class="bg-white py-16">
                <div class="container mx-auto px-4 grid grid-cols-2 md:grid-cols-3 lg:grid-cols-5 gap-8 justify-items-center">
                    {SOCIAL_QR_CODES
                        .into_iter()
                        .map(|(title, image)| view! {
                            <div class="text-center">
                                <img src=image alt=title class="w-32 h-32 object-contain mb-4" />
                                <p class="text-brand-600 font-medium">{title}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </main>
    }
}
