use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zspace_shared::protocol::{ApiRequest, HttpMethod};
use zspace_shared::{PageRequest, PageResult, ProductCard};

use super::filter::{Facet, FilterState};

/// 商品列表一次取全量，分页在客户端完成
pub const UNBOUNDED_PAGE: PageRequest = PageRequest::new(1, 99_999);

/// 发往 `productCardList` 的筛选查询
///
/// 维度之间为 AND，维度内部（包括同一标签类型内部）为 OR。
/// 没有任何标签选择时 `tagsByType` 整个省略，空的标签类型也不会出现。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub large_category: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub brand: Vec<String>,
    #[serde(default)]
    pub product_status: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags_by_type: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub page: PageRequest,
}

impl ProductQuery {
    /// 由筛选状态与当前大类的中文名合成查询
    pub fn from_state(state: &FilterState, large_category_label: &str) -> Self {
        let collect = |facet: Facet| state.selection(facet).iter().cloned().collect::<Vec<_>>();

        let tags_by_type = state
            .tags_by_type()
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(tag_type, values)| (tag_type.clone(), values.iter().cloned().collect()))
            .collect();

        Self {
            large_category: large_category_label.to_string(),
            categories: collect(Facet::SubCategory),
            brand: collect(Facet::Brand),
            product_status: collect(Facet::Status),
            tags_by_type,
            page: UNBOUNDED_PAGE,
        }
    }

    /// 商品是否满足查询
    ///
    /// 每个有选择的维度都必须命中其中任意一个值。
    pub fn matches(&self, card: &ProductCard) -> bool {
        if let Some(large_category) = card.large_category.as_deref() {
            if !self.large_category.is_empty() && large_category != self.large_category {
                return false;
            }
        }

        let any_of = |selected: &[String], value: Option<&str>| {
            selected.is_empty() || value.is_some_and(|v| selected.iter().any(|s| s == v))
        };

        let categories_ok = self.categories.is_empty()
            || card
                .categories
                .iter()
                .any(|c| self.categories.contains(c));

        categories_ok
            && any_of(&self.brand, Some(card.brand.as_str()))
            && any_of(&self.product_status, card.product_status.as_deref())
            && self.tags_by_type.iter().all(|(tag_type, values)| {
                values.is_empty()
                    || card
                        .tags
                        .iter()
                        .any(|tag| &tag.tag_type == tag_type && values.contains(&tag.name))
            })
    }
}

impl ApiRequest for ProductQuery {
    type Response = PageResult<ProductCard>;
    const PATH: &'static str = "/fr/product/productCardList";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "product.list";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zspace_shared::ProductTag;

    fn card(categories: &[&str], brand: &str, status: &str, tags: &[(&str, &str)]) -> ProductCard {
        ProductCard {
            id: "1".into(),
            brand: brand.into(),
            large_category: Some("灯具".into()),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            product_status: Some(status.into()),
            tags: tags
                .iter()
                .map(|(t, n)| ProductTag {
                    tag_type: t.to_string(),
                    name: n.to_string(),
                })
                .collect(),
            ..ProductCard::default()
        }
    }

    #[test]
    fn serializes_without_tags_when_none_selected() {
        let mut state = FilterState::new(Some("lighting".into()));
        state.toggle(Facet::Brand, "Flos");

        let value = serde_json::to_value(ProductQuery::from_state(&state, "灯具")).unwrap();
        assert_eq!(
            value,
            json!({
                "largeCategory": "灯具",
                "categories": [],
                "brand": ["Flos"],
                "productStatus": [],
                "pageNum": 1,
                "pageSize": 99999
            })
        );
    }

    #[test]
    fn serializes_only_non_empty_tag_types() {
        let mut state = FilterState::new(Some("lighting".into()));
        state.toggle_tag("场景", "客厅");
        state.toggle_tag("功能", "调光");
        state.toggle_tag("功能", "调光");

        let value = serde_json::to_value(ProductQuery::from_state(&state, "灯具")).unwrap();
        assert_eq!(value["tagsByType"], json!({ "场景": ["客厅"] }));
    }

    #[test]
    fn or_within_and_across() {
        let mut state = FilterState::new(Some("lighting".into()));
        state.toggle(Facet::SubCategory, "A");
        state.toggle(Facet::SubCategory, "B");
        state.toggle(Facet::Brand, "X");
        let query = ProductQuery::from_state(&state, "灯具");

        assert!(query.matches(&card(&["A"], "X", "1", &[])));
        assert!(query.matches(&card(&["B", "C"], "X", "1", &[])));
        assert!(!query.matches(&card(&["A"], "Y", "1", &[])));
        assert!(!query.matches(&card(&["C"], "X", "1", &[])));
    }

    #[test]
    fn tag_types_are_and_values_are_or() {
        let mut state = FilterState::new(Some("lighting".into()));
        state.toggle_tag("场景", "客厅");
        state.toggle_tag("场景", "卧室");
        state.toggle_tag("功能", "调光");
        let query = ProductQuery::from_state(&state, "灯具");

        assert!(query.matches(&card(&[], "X", "1", &[("场景", "卧室"), ("功能", "调光")])));
        assert!(!query.matches(&card(&[], "X", "1", &[("场景", "卧室")])));
        assert!(!query.matches(&card(&[], "X", "1", &[("功能", "客厅"), ("场景", "调光")])));
    }

    #[test]
    fn empty_selection_matches_main_category_only() {
        let query = ProductQuery::from_state(&FilterState::new(Some("lighting".into())), "灯具");
        assert!(query.matches(&card(&[], "X", "1", &[])));

        let mut other = card(&[], "X", "1", &[]);
        other.large_category = Some("家具".into());
        assert!(!query.matches(&other));
    }
}
