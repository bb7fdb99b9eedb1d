//! 商品目录筛选
//!
//! `CatalogEngine` 是纯状态机；`CatalogController` 负责调度远程请求、
//! 去抖以及"最后一次请求生效"的顺序保证。

pub mod controller;
pub mod engine;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod sequence;
pub mod tags;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use controller::{BRAND_OPTIONS_PAGE, CatalogController, REFRESH_DEBOUNCE};
pub use engine::{CatalogEngine, FetchOutcome, MainCategoryChange, PendingFetch};
pub use filter::{Facet, FilterChip, FilterKey, FilterState, STATUS_OPTIONS, SectionExpansion};
pub use pagination::{ITEMS_PER_PAGE, PageEntry, Pagination};
pub use query::ProductQuery;
pub use sequence::Ticket;
pub use tags::{TagGroup, TagGroups};
pub use taxonomy::{CategoryConfig, MainCategory, Taxonomy};
