use tracing::{debug, warn};
use zspace_shared::{BrandSummary, CategoryItem, PageResult, ProductCard, TagRow};

use super::filter::{Facet, FilterChip, FilterKey, FilterState, SectionExpansion};
use super::pagination::{ITEMS_PER_PAGE, Pagination};
use super::query::ProductQuery;
use super::sequence::{Sequencer, Ticket};
use super::tags::TagGroups;
use super::taxonomy::{CategoryConfig, MainCategory, Taxonomy, sub_category_options};
use crate::error::{ApiError, ApiResult};

/// 大类切换的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCategoryChange {
    /// 已切换并清空依赖维度，需要重新获取标签与商品
    Applied(Ticket),
    /// 分类尚未加载，待加载后生效
    Deferred,
    /// 与当前大类相同
    Unchanged,
}

/// 一次商品请求的结局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// 已有更新的请求，响应被丢弃
    Stale,
    /// 请求失败，保留上一次结果
    Failed,
}

/// 已通过去抖与代号检查、可以发出的商品请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: Ticket,
    pub query: ProductQuery,
}

// =========================================================
// 目录状态机 (Catalog engine)
// =========================================================

/// 商品目录页的全部状态
///
/// 同步、无 IO：网络调用由 `CatalogController` 完成后把结果交回这里。
/// 每次筛选变化都会签发新的代号，旧代号的响应一律丢弃。
#[derive(Debug)]
pub struct CatalogEngine {
    taxonomy: Taxonomy,
    category_list: Vec<CategoryItem>,
    brand_options: Vec<String>,
    tags: TagGroups,
    filter: FilterState,
    pending_main: Option<String>,
    result: PageResult<ProductCard>,
    pagination: Pagination,
    sections: SectionExpansion,
    products: Sequencer,
    tag_requests: Sequencer,
}

impl CatalogEngine {
    /// 以路由中的大类 id 初始化；分类返回后才真正生效
    pub fn new(route_category: &str) -> Self {
        Self {
            taxonomy: Taxonomy::default(),
            category_list: Vec::new(),
            brand_options: Vec::new(),
            tags: TagGroups::default(),
            filter: FilterState::default(),
            pending_main: Some(route_category.to_string()),
            result: PageResult::default(),
            pagination: Pagination::default(),
            sections: SectionExpansion::default(),
            products: Sequencer::default(),
            tag_requests: Sequencer::default(),
        }
    }

    // --- 数据加载 ---

    /// 装入分类；挂起的大类切换在此生效
    ///
    /// 返回 `Some` 表示当前大类已就绪，应获取标签与商品。
    pub fn load_taxonomy(&mut self, result: ApiResult<Vec<CategoryConfig>>) -> Option<Ticket> {
        let configs = match result {
            Ok(configs) => configs,
            Err(e) => {
                warn!(error = %e, "classification unavailable");
                return None;
            }
        };
        self.taxonomy = Taxonomy::new(configs);

        if let Some(pending) = self.pending_main.take() {
            if self.taxonomy.contains(&pending) {
                self.filter.set_main_category(pending);
            } else {
                warn!(category = %pending, "unknown main category");
            }
        }

        match self.filter.main_category() {
            Some(id) if self.taxonomy.contains(id) => Some(self.products.issue()),
            _ => None,
        }
    }

    pub fn load_brands(&mut self, result: ApiResult<PageResult<BrandSummary>>) {
        match result {
            Ok(page) => {
                let mut options: Vec<String> = Vec::with_capacity(page.records.len());
                for brand in page.records {
                    if !brand.brand_name.is_empty() && !options.contains(&brand.brand_name) {
                        options.push(brand.brand_name);
                    }
                }
                self.brand_options = options;
            }
            Err(e) => warn!(error = %e, "brand list unavailable"),
        }
    }

    pub fn set_category_list(&mut self, items: Vec<CategoryItem>) {
        self.category_list = items;
    }

    /// 开始一次标签请求，返回代号与用于过滤的大类中文名
    pub fn begin_tag_fetch(&mut self) -> (Ticket, Option<String>) {
        (self.tag_requests.issue(), self.active_label().map(str::to_string))
    }

    /// 装入标签
    ///
    /// 失败视为没有标签。已选但不再提供的标签会被移除，此时返回新的商品代号。
    pub fn complete_tag_fetch(
        &mut self,
        ticket: Ticket,
        label: Option<&str>,
        result: ApiResult<Vec<TagRow>>,
    ) -> Option<Ticket> {
        if !self.tag_requests.is_latest(ticket) {
            debug!(generation = ticket.generation(), "discarding stale tag response");
            return None;
        }

        self.tags = match result {
            Ok(rows) => TagGroups::from_rows(&rows, label),
            Err(e) => {
                warn!(error = %e, "tags unavailable");
                TagGroups::default()
            }
        };

        let tags = &self.tags;
        if self.filter.retain_tags(|tag_type, value| tags.offers(tag_type, value)) {
            Some(self.products.issue())
        } else {
            None
        }
    }

    // --- 筛选操作 ---

    /// 切换大类
    ///
    /// 未知大类返回校验错误；分类未加载时挂起。
    pub fn set_main_category(&mut self, id: &str) -> ApiResult<MainCategoryChange> {
        if !self.taxonomy.is_loaded() {
            self.pending_main = Some(id.to_string());
            return Ok(MainCategoryChange::Deferred);
        }
        if !self.taxonomy.contains(id) {
            return Err(ApiError::validation(format!("unknown main category: {id}"))
                .in_op("catalog.set_main_category"));
        }
        if self.filter.main_category() == Some(id) {
            return Ok(MainCategoryChange::Unchanged);
        }

        self.filter.set_main_category(id);
        self.tags = TagGroups::default();
        Ok(MainCategoryChange::Applied(self.products.issue()))
    }

    pub fn toggle_facet_value(&mut self, facet: Facet, value: &str) -> Ticket {
        self.filter.toggle(facet, value);
        self.products.issue()
    }

    /// 翻转标签值；当前大类未提供的标签类型不可选，返回 `None`
    pub fn toggle_tag_value(&mut self, tag_type: &str, value: &str) -> Option<Ticket> {
        if self.tags.get(tag_type).is_none() {
            debug!(tag_type, "ignoring toggle for unoffered tag type");
            return None;
        }
        self.filter.toggle_tag(tag_type, value);
        Some(self.products.issue())
    }

    pub fn clear_facet(&mut self, key: &FilterKey) -> Ticket {
        self.filter.clear(key);
        self.products.issue()
    }

    pub fn remove_selection(&mut self, key: &FilterKey, value: &str) -> Ticket {
        self.filter.remove(key, value);
        self.products.issue()
    }

    /// 无条件签发新代号，用于首次加载或手动刷新
    pub fn request_refresh(&mut self) -> Ticket {
        self.products.issue()
    }

    // --- 商品请求 ---

    /// 去抖结束后调用：代号仍是最新且大类已就绪时给出查询
    pub fn try_begin_fetch(&self, ticket: Ticket) -> Option<PendingFetch> {
        if !self.products.is_latest(ticket) {
            return None;
        }
        self.query().map(|query| PendingFetch { ticket, query })
    }

    /// 交回商品响应；只有最新代号的成功响应会替换结果并回到第 1 页
    pub fn complete_fetch(
        &mut self,
        ticket: Ticket,
        result: ApiResult<PageResult<ProductCard>>,
    ) -> FetchOutcome {
        if !self.products.is_latest(ticket) {
            debug!(generation = ticket.generation(), "discarding stale product response");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.pagination = Pagination::new(page.records.len(), ITEMS_PER_PAGE);
                self.result = page;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "product list unavailable, keeping previous result");
                FetchOutcome::Failed
            }
        }
    }

    // --- 视图数据 ---

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn main_categories(&self) -> Vec<MainCategory> {
        self.taxonomy.main_categories()
    }

    pub fn active_category(&self) -> Option<&CategoryConfig> {
        self.filter
            .main_category()
            .and_then(|id| self.taxonomy.get(id))
    }

    pub fn active_label(&self) -> Option<&str> {
        self.active_category().map(|c| c.category_label.as_str())
    }

    pub fn is_ready(&self) -> bool {
        self.active_category().is_some()
    }

    pub fn sub_category_options(&self) -> Vec<String> {
        self.active_category()
            .map(|config| sub_category_options(config, &self.category_list))
            .unwrap_or_default()
    }

    pub fn brand_options(&self) -> &[String] {
        &self.brand_options
    }

    pub fn tag_groups(&self) -> &TagGroups {
        &self.tags
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        self.filter.chips()
    }

    pub fn query(&self) -> Option<ProductQuery> {
        self.active_label()
            .map(|label| ProductQuery::from_state(&self.filter, label))
    }

    pub fn products(&self) -> &[ProductCard] {
        &self.result.records
    }

    pub fn total(&self) -> u64 {
        self.result.total
    }

    pub fn page_items(&self) -> &[ProductCard] {
        self.pagination.slice(&self.result.records)
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn set_page(&mut self, page: usize) -> usize {
        self.pagination.set_page(page)
    }

    pub fn sections(&self) -> &SectionExpansion {
        &self.sections
    }

    pub fn toggle_section(&mut self, section: &str) {
        self.sections.toggle_section(section);
    }

    pub fn toggle_all_sections(&mut self) {
        self.sections.toggle_all();
    }
}
