use std::cell::{Ref, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;
use zspace_shared::{CategoryItem, PageRequest};

use super::engine::{CatalogEngine, FetchOutcome, MainCategoryChange};
use super::filter::{Facet, FilterKey};
use super::sequence::Ticket;
use crate::api::CatalogSource;
use crate::error::ApiResult;

/// 筛选变化到发出请求之间的去抖时长
pub const REFRESH_DEBOUNCE: Duration = Duration::from_millis(500);

/// 品牌选项一次取全
pub const BRAND_OPTIONS_PAGE: PageRequest = PageRequest::new(1, 999);

/// 目录页控制器：把 `CatalogEngine` 接到远程数据源上
///
/// 单线程使用。引擎的借用从不跨越 `.await`，因此并发进行的多个请求可以交错完成。
/// 去抖的等待由调用方提供（浏览器端为定时器，测试中为 tokio sleep）。
pub struct CatalogController<S> {
    source: Rc<S>,
    engine: Rc<RefCell<CatalogEngine>>,
    on_change: Rc<dyn Fn()>,
}

impl<S> Clone for CatalogController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            engine: Rc::clone(&self.engine),
            on_change: Rc::clone(&self.on_change),
        }
    }
}

impl<S: CatalogSource> CatalogController<S> {
    pub fn new(source: S, route_category: &str) -> Self {
        Self {
            source: Rc::new(source),
            engine: Rc::new(RefCell::new(CatalogEngine::new(route_category))),
            on_change: Rc::new(|| {}),
        }
    }

    /// 状态变化时的回调，渲染层借此刷新
    pub fn with_listener(mut self, on_change: impl Fn() + 'static) -> Self {
        self.on_change = Rc::new(on_change);
        self
    }

    pub fn engine(&self) -> Ref<'_, CatalogEngine> {
        self.engine.borrow()
    }

    fn update<T>(&self, f: impl FnOnce(&mut CatalogEngine) -> T) -> T {
        let out = f(&mut self.engine.borrow_mut());
        (self.on_change)();
        out
    }

    // --- 加载 ---

    /// 首次加载：并发获取分类与品牌，随后获取标签与商品
    pub async fn bootstrap(&self) {
        let (classification, brands) = futures::join!(
            self.source.fetch_classification(),
            self.source.get_brand_list(BRAND_OPTIONS_PAGE)
        );

        let ready = self.update(|engine| {
            engine.load_brands(brands);
            engine.load_taxonomy(classification)
        });

        if let Some(ticket) = ready {
            futures::join!(self.refresh_tags(), self.refresh_after(ticket, async {}));
        }
    }

    pub fn set_category_list(&self, items: Vec<CategoryItem>) {
        self.update(|engine| engine.set_category_list(items));
    }

    /// 重新获取当前大类的标签；若因此移除了已选标签则立即刷新商品
    pub async fn refresh_tags(&self) {
        let (ticket, label) = self.engine.borrow_mut().begin_tag_fetch();
        let result = self.source.fetch_tags().await;
        let retagged =
            self.update(|engine| engine.complete_tag_fetch(ticket, label.as_deref(), result));

        if let Some(products) = retagged {
            self.refresh_after(products, async {}).await;
        }
    }

    // --- 筛选 ---

    /// 切换大类；生效时并发获取新标签与商品
    pub async fn select_main_category<D>(&self, id: &str, delay: D) -> ApiResult<()>
    where
        D: Future<Output = ()>,
    {
        let change = self.update(|engine| engine.set_main_category(id))?;
        if let MainCategoryChange::Applied(ticket) = change {
            futures::join!(self.refresh_tags(), self.refresh_after(ticket, delay));
        }
        Ok(())
    }

    pub fn toggle_facet_value(&self, facet: Facet, value: &str) -> Ticket {
        self.update(|engine| engine.toggle_facet_value(facet, value))
    }

    pub fn toggle_tag_value(&self, tag_type: &str, value: &str) -> Option<Ticket> {
        self.update(|engine| engine.toggle_tag_value(tag_type, value))
    }

    pub fn clear_facet(&self, key: &FilterKey) -> Ticket {
        self.update(|engine| engine.clear_facet(key))
    }

    pub fn remove_selection(&self, key: &FilterKey, value: &str) -> Ticket {
        self.update(|engine| engine.remove_selection(key, value))
    }

    pub fn set_page(&self, page: usize) -> usize {
        self.update(|engine| engine.set_page(page))
    }

    pub fn toggle_section(&self, section: &str) {
        self.update(|engine| engine.toggle_section(section));
    }

    pub fn toggle_all_sections(&self) {
        self.update(|engine| engine.toggle_all_sections());
    }

    // --- 商品请求 ---

    /// 等待 `delay` 后，若 `ticket` 仍是最新则发出商品请求
    ///
    /// 去抖期间有新的变化时本次调用什么也不做；响应到达时若已被更新的请求取代则被丢弃。
    pub async fn refresh_after<D>(&self, ticket: Ticket, delay: D) -> Option<FetchOutcome>
    where
        D: Future<Output = ()>,
    {
        delay.await;

        let pending = self.engine.borrow().try_begin_fetch(ticket);
        let Some(pending) = pending else {
            debug!(generation = ticket.generation(), "refresh superseded during debounce");
            return None;
        };

        let result = self.source.get_product_list(&pending.query).await;
        Some(self.update(|engine| engine.complete_fetch(pending.ticket, result)))
    }
}
