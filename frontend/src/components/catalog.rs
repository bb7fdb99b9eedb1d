//! 设计严选库：大类切换、多维筛选与商品网格
//!
//! 状态全部由 `CatalogController` 持有，这里只负责把它接到信号上：
//! 控制器每次变化都递增 `revision`，视图在读取引擎前订阅它。

use leptos::prelude::*;
use leptos::task::spawn_local;
use zspace::catalog::{
    CatalogController, CatalogEngine, Facet, FilterKey, REFRESH_DEBOUNCE, STATUS_OPTIONS, Ticket,
};
use zspace::view::format_price;
use zspace_shared::ProductCard;

use crate::components::icons::ChevronDown;
use crate::components::widgets::{Empty, Loading, Pager};
use crate::state::{Api, use_app_state};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::sleep;

type Controller = CatalogController<Api>;

// =========================================================
// 控制器句柄 (Controller handle)
// =========================================================

#[derive(Clone, Copy)]
struct CatalogHandle {
    controller: StoredValue<Controller, LocalStorage>,
    revision: RwSignal<u64>,
    in_flight: RwSignal<u32>,
}

impl CatalogHandle {
    fn new(api: Api, category: &str) -> Self {
        let revision = RwSignal::new(0u64);
        let controller = CatalogController::new(api, category)
            .with_listener(move || revision.update(|r| *r = r.wrapping_add(1)));

        Self {
            controller: StoredValue::new_local(controller),
            revision,
            in_flight: RwSignal::new(0),
        }
    }

    fn controller(&self) -> Controller {
        self.controller.get_value()
    }

    /// 订阅变化并读取引擎
    fn read<T>(&self, f: impl FnOnce(&CatalogEngine) -> T) -> T {
        self.revision.track();
        self.controller.with_value(|c| f(&c.engine()))
    }

    fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// 在后台运行一次请求，期间显示加载状态
    fn run<F>(&self, task: impl FnOnce(Controller) -> F + 'static)
    where
        F: Future<Output = ()> + 'static,
    {
        let in_flight = self.in_flight;
        let controller = self.controller();
        in_flight.update(|n| *n += 1);
        spawn_local(async move {
            task(controller).await;
            in_flight.update(|n| *n = n.saturating_sub(1));
        });
    }

    /// 去抖后刷新商品；期间再有变化时本次什么也不做
    fn refresh(&self, ticket: Ticket) {
        self.run(move |controller| async move {
            controller.refresh_after(ticket, sleep(REFRESH_DEBOUNCE)).await;
        });
    }

    fn bootstrap(&self) {
        self.run(|controller| async move { controller.bootstrap().await });
    }

    fn select_main_category(&self, id: String) {
        self.run(move |controller| async move {
            if let Err(e) = controller
                .select_main_category(&id, sleep(REFRESH_DEBOUNCE))
                .await
            {
                web_sys::console::warn_1(&format!("[Catalog] {e}").into());
            }
        });
    }

    fn toggle(&self, key: &FilterKey, value: &str) {
        let ticket = self.controller.with_value(|c| match key {
            FilterKey::Facet(facet) => Some(c.toggle_facet_value(*facet, value)),
            FilterKey::Tag(tag_type) => c.toggle_tag_value(tag_type, value),
        });
        if let Some(ticket) = ticket {
            self.refresh(ticket);
        }
    }

    fn clear(&self, key: &FilterKey) {
        let ticket = self.controller.with_value(|c| c.clear_facet(key));
        self.refresh(ticket);
    }

    fn remove(&self, key: &FilterKey, value: &str) {
        let ticket = self.controller.with_value(|c| c.remove_selection(key, value));
        self.refresh(ticket);
    }

    fn set_page(&self, page: usize) {
        self.controller.with_value(|c| c.set_page(page));
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    fn toggle_section(&self, section: &str) {
        self.controller.with_value(|c| c.toggle_section(section));
    }

    fn toggle_all_sections(&self) {
        self.controller.with_value(|c| c.toggle_all_sections());
    }
}

// =========================================================
// 筛选栏数据 (Filter panel model)
// =========================================================

#[derive(Clone)]
struct OptionItem {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Clone)]
struct Section {
    key: FilterKey,
    id: String,
    title: String,
    expanded: bool,
    has_selection: bool,
    options: Vec<OptionItem>,
}

fn build_section(
    engine: &CatalogEngine,
    key: FilterKey,
    title: &str,
    options: impl IntoIterator<Item = (String, String)>,
) -> Section {
    let filter = engine.filter();
    let options: Vec<OptionItem> = options
        .into_iter()
        .map(|(value, label)| OptionItem {
            selected: filter.is_selected(&key, &value),
            value,
            label,
        })
        .collect();

    Section {
        id: title.to_string(),
        title: title.to_string(),
        expanded: engine.sections().is_expanded(title),
        has_selection: options.iter().any(|o| o.selected),
        key,
        options,
    }
}

/// 区块顺序：状态、品类、各标签类型、品牌
fn panel_sections(engine: &CatalogEngine) -> Vec<Section> {
    let mut sections = Vec::new();

    sections.push(build_section(
        engine,
        FilterKey::Facet(Facet::Status),
        Facet::Status.title(),
        STATUS_OPTIONS
            .iter()
            .map(|o| (o.value.to_string(), o.label.to_string())),
    ));
    sections.push(build_section(
        engine,
        FilterKey::Facet(Facet::SubCategory),
        Facet::SubCategory.title(),
        engine.sub_category_options().into_iter().map(|c| (c.clone(), c)),
    ));
    for group in engine.tag_groups().iter() {
        sections.push(build_section(
            engine,
            FilterKey::Tag(group.tag_type.clone()),
            &group.tag_type,
            group.values.iter().map(|v| (v.clone(), v.clone())),
        ));
    }
    sections.push(build_section(
        engine,
        FilterKey::Facet(Facet::Brand),
        Facet::Brand.title(),
        engine.brand_options().iter().map(|b| (b.clone(), b.clone())),
    ));

    sections.retain(|s| !s.options.is_empty());
    sections
}

// =========================================================
// 页面 (Page)
// =========================================================

#[component]
pub fn CatalogPage(category: String) -> impl IntoView {
    let app = use_app_state();
    let handle = CatalogHandle::new(app.api(), &category);

    let snapshot = app.snapshot();
    Effect::new(move |_| {
        let items = snapshot.with(|s| s.category_list.clone().unwrap_or_default());
        handle.controller.with_value(|c| c.set_category_list(items));
    });
    handle.bootstrap();

    view! {
        <main class="min-h-screen bg-gray-50 pt-28 pb-16">
            <div class="container mx-auto px-4">
                <MainCategoryTabs handle=handle />
                <div class="flex flex-col lg:flex-row gap-8 mt-8">
                    <aside class="lg:w-72 shrink-0">
                        <FilterPanel handle=handle />
                    </aside>
                    <section class="flex-1">
                        <ActiveChips handle=handle />
                        <ProductGrid handle=handle />
                    </section>
                </div>
            </div>
        </main>
    }
}

#[component]
fn MainCategoryTabs(handle: CatalogHandle) -> impl IntoView {
    let router = use_router();
    let tabs = move || {
        handle.read(|engine| {
            let active = engine.filter().main_category().map(str::to_string);
            engine
                .main_categories()
                .into_iter()
                .map(|c| {
                    let is_active = active.as_deref() == Some(c.id.as_str());
                    (c, is_active)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="flex gap-8 border-b border-gray-200">
            {move || {
                tabs()
                    .into_iter()
                    .map(|(category, is_active)| {
                        let class = if is_active {
                            "pb-3 text-lg font-bold text-brand-700 border-b-2 border-brand-700"
                        } else {
                            "pb-3 text-lg text-gray-500 hover:text-brand-600"
                        };
                        let id = category.id.clone();
                        view! {
                            <button
                                class=class
                                on:click=move |_| {
                                    router.replace_address(&AppRoute::catalog(&id));
                                    handle.select_main_category(id.clone());
                                }
                            >
                                {category.label}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn FilterPanel(handle: CatalogHandle) -> impl IntoView {
    let all_expanded = move || handle.read(|engine| engine.sections().all_expanded());

    view! {
        <div class="bg-white rounded-xl shadow-sm p-5">
            <div class="flex items-center justify-between mb-4">
                <h3 class="font-bold text-gray-900">"筛选"</h3>
                <button class="text-sm text-brand-600" on:click=move |_| handle.toggle_all_sections()>
                    {move || if all_expanded() { "全部收起" } else { "全部展开" }}
                </button>
            </div>
            {move || {
                handle
                    .read(panel_sections)
                    .into_iter()
                    .map(|section| view! { <FilterSection handle=handle section=section /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn FilterSection(handle: CatalogHandle, section: Section) -> impl IntoView {
    let Section {
        key,
        id,
        title,
        expanded,
        has_selection,
        options,
    } = section;
    let clear_key = key.clone();
    let chevron = if expanded { "h-4 w-4" } else { "h-4 w-4 -rotate-90" };

    view! {
        <div class="border-t border-gray-100 py-3">
            <div class="flex items-center justify-between">
                <button class="flex items-center gap-1 font-medium text-gray-800" on:click=move |_| handle.toggle_section(&id)>
                    <ChevronDown attr:class=chevron />
                    {title}
                </button>
                {has_selection.then(|| view! {
                    <button class="text-xs text-gray-400 hover:text-brand-600" on:click=move |_| handle.clear(&clear_key)>
                        "清空"
                    </button>
                })}
            </div>
            {expanded.then(|| view! {
                <div class="flex flex-wrap gap-2 mt-3">
                    {options
                        .into_iter()
                        .map(|option| {
                            let key = key.clone();
                            let class = if option.selected {
                                "px-3 py-1 rounded-full text-sm bg-brand-600 text-white"
                            } else {
                                "px-3 py-1 rounded-full text-sm bg-gray-100 text-gray-700 hover:bg-gray-200"
                            };
                            view! {
                                <button class=class on:click=move |_| handle.toggle(&key, &option.value)>
                                    {option.label.clone()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            })}
        </div>
    }
}

#[component]
fn ActiveChips(handle: CatalogHandle) -> impl IntoView {
    let chips = move || handle.read(CatalogEngine::chips);

    view! {
        <div class="flex flex-wrap items-center gap-2 mb-6 min-h-8">
            <span class="text-sm text-gray-500">
                {move || handle.read(|engine| format!("共 {} 件商品", engine.total()))}
            </span>
            {move || {
                chips()
                    .into_iter()
                    .map(|chip| {
                        let key = chip.key.clone();
                        let value = chip.value.clone();
                        view! {
                            <span class="badge badge-lg gap-1 bg-brand-50 text-brand-700 border-brand-200">
                                {chip.text}
                                <button class="ml-1" on:click=move |_| handle.remove(&key, &value)>"×"</button>
                            </span>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ProductGrid(handle: CatalogHandle) -> impl IntoView {
    let items = move || handle.read(|engine| engine.page_items().to_vec());
    let category = move || {
        handle.read(|engine| engine.filter().main_category().unwrap_or_default().to_string())
    };
    let pagination = Signal::derive(move || handle.read(|engine| *engine.pagination()));
    let is_empty = move || handle.read(|engine| engine.products().is_empty());

    view! {
        <Show
            when=move || !(is_empty() && handle.is_loading())
            fallback=|| view! { <Loading /> }
        >
            <Show when=move || !is_empty() fallback=|| view! { <Empty message="暂无符合条件的商品" /> }>
                <div class="grid grid-cols-2 md:grid-cols-3 gap-6">
                    {move || {
                        let category = category();
                        items()
                            .into_iter()
                            .map(|product| view! { <ProductCardView product=product category=category.clone() /> })
                            .collect_view()
                    }}
                </div>
                <Pager pagination=pagination on_select=move |page: usize| handle.set_page(page) />
            </Show>
        </Show>
    }
}

#[component]
fn ProductCardView(product: ProductCard, category: String) -> impl IntoView {
    let href = AppRoute::ProductDetail {
        category,
        id: product.id.clone(),
    }
    .to_path();
    let price = format_price(product.retail_price.as_deref());
    let cover = product.cover_image().unwrap_or_default().to_string();

    view! {
        <Link to=href class="group block bg-white rounded-xl overflow-hidden shadow-sm hover:shadow-lg transition-shadow">
            <div class="aspect-square overflow-hidden bg-gray-100">
                <img src=cover alt=product.product_name.clone() class="w-full h-full object-cover group-hover:scale-105 transition-transform duration-500" />
            </div>
            <div class="p-4 space-y-1">
                <p class="text-xs text-gray-500">{product.brand.clone()}</p>
                <h4 class="font-medium text-gray-900 line-clamp-2">{product.product_name.clone()}</h4>
                {(!price.is_empty()).then(|| view! { <p class="text-brand-700 font-bold">"￥" {price.clone()}</p> })}
            </div>
        </Link>
    }
}
