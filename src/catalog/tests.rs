use super::*;
use crate::api::CatalogSource;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use zspace_shared::{BrandSummary, PageRequest, PageResult, ProductCard, ProductTag, TagRow};

// =========================================================
// Shared Mock Components
// =========================================================

/// 可编排的数据源：按查询内容决定延迟与返回
struct ScriptedSource {
    classification: RefCell<ApiResult<Vec<CategoryConfig>>>,
    tags: RefCell<Vec<TagRow>>,
    fail_products: RefCell<bool>,
    /// 品牌 -> 响应延迟
    latency_by_brand: RefCell<HashMap<String, Duration>>,
    catalog: Vec<ProductCard>,
    product_calls: RefCell<Vec<ProductQuery>>,
    tag_calls: RefCell<usize>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            classification: RefCell::new(Ok(classification())),
            tags: RefCell::new(vec![
                tag_row("场景", "客厅", &[]),
                tag_row("功能", "调光", &["灯具"]),
                tag_row("材质", "实木", &["家具"]),
            ]),
            fail_products: RefCell::new(false),
            latency_by_brand: RefCell::new(HashMap::new()),
            catalog: vec![
                product("1", "灯具", &["吊灯"], "Flos", "1", &[("场景", "客厅")]),
                product("2", "灯具", &["台灯"], "Artemide", "2", &[("功能", "调光")]),
                product("3", "灯具", &["吊灯"], "Artemide", "1", &[]),
                product("4", "家具", &["沙发"], "Vitra", "1", &[("材质", "实木")]),
            ],
            product_calls: RefCell::new(Vec::new()),
            tag_calls: RefCell::new(0),
        }
    }

    fn product_call_count(&self) -> usize {
        self.product_calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl CatalogSource for ScriptedSource {
    async fn fetch_classification(&self) -> ApiResult<Vec<CategoryConfig>> {
        self.classification.borrow().clone()
    }

    async fn fetch_tags(&self) -> ApiResult<Vec<TagRow>> {
        *self.tag_calls.borrow_mut() += 1;
        Ok(self.tags.borrow().clone())
    }

    async fn get_brand_list(&self, _page: PageRequest) -> ApiResult<PageResult<BrandSummary>> {
        let records = ["Flos", "Artemide", "Vitra", "Flos"]
            .iter()
            .enumerate()
            .map(|(i, name)| BrandSummary {
                id: i.to_string(),
                brand_name: name.to_string(),
                ..BrandSummary::default()
            })
            .collect::<Vec<_>>();
        Ok(PageResult {
            total: records.len() as u64,
            records,
        })
    }

    async fn get_product_list(&self, query: &ProductQuery) -> ApiResult<PageResult<ProductCard>> {
        self.product_calls.borrow_mut().push(query.clone());

        let delay = query
            .brand
            .first()
            .and_then(|b| self.latency_by_brand.borrow().get(b).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail_products.borrow() {
            return Err(ApiError::transport("connection reset"));
        }
        let records: Vec<ProductCard> = self
            .catalog
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        Ok(PageResult {
            total: records.len() as u64,
            records,
        })
    }
}

fn classification() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            category: "lighting".into(),
            category_label: "灯具".into(),
            categories: vec!["吊灯".into(), "台灯".into()],
            brands: vec![],
        },
        CategoryConfig {
            category: "furniture".into(),
            category_label: "家具".into(),
            categories: vec!["沙发".into()],
            brands: vec![],
        },
    ]
}

fn tag_row(tag_type: &str, name: &str, category: &[&str]) -> TagRow {
    TagRow {
        tag_type: Some(tag_type.into()),
        name: name.into(),
        category: category.iter().map(|c| c.to_string()).collect(),
    }
}

fn product(
    id: &str,
    large: &str,
    categories: &[&str],
    brand: &str,
    status: &str,
    tags: &[(&str, &str)],
) -> ProductCard {
    ProductCard {
        id: id.into(),
        product_name: format!("P{id}"),
        brand: brand.into(),
        large_category: Some(large.into()),
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

fn ids(engine: &CatalogEngine) -> Vec<String> {
    engine.products().iter().map(|p| p.id.clone()).collect()
}

fn sleep_ms(ms: u64) -> tokio::time::Sleep {
    tokio::time::sleep(Duration::from_millis(ms))
}

async fn booted(source: Rc<ScriptedSource>) -> CatalogController<Rc<ScriptedSource>> {
    let controller = CatalogController::new(source, "lighting");
    controller.bootstrap().await;
    controller
}

// =========================================================
// Engine state machine
// =========================================================

mod engine_state {
    use super::*;

    fn loaded_engine() -> CatalogEngine {
        let mut engine = CatalogEngine::new("lighting");
        engine.load_taxonomy(Ok(classification()));
        let (ticket, label) = engine.begin_tag_fetch();
        engine.complete_tag_fetch(
            ticket,
            label.as_deref(),
            Ok(vec![tag_row("场景", "客厅", &[]), tag_row("功能", "调光", &["灯具"])]),
        );
        engine
    }

    #[test]
    fn route_category_applies_when_taxonomy_loads() {
        let mut engine = CatalogEngine::new("lighting");
        assert!(!engine.is_ready());
        assert!(engine.query().is_none());

        let ticket = engine.load_taxonomy(Ok(classification()));
        assert!(ticket.is_some());
        assert_eq!(engine.active_label(), Some("灯具"));
        assert_eq!(engine.sub_category_options(), ["吊灯", "台灯"]);
    }

    #[test]
    fn main_category_change_before_load_is_deferred() {
        let mut engine = CatalogEngine::new("lighting");
        assert_eq!(
            engine.set_main_category("furniture").unwrap(),
            MainCategoryChange::Deferred
        );

        engine.load_taxonomy(Ok(classification()));
        assert_eq!(engine.filter().main_category(), Some("furniture"));
    }

    #[test]
    fn unknown_route_category_leaves_engine_idle() {
        let mut engine = CatalogEngine::new("garden");
        assert!(engine.load_taxonomy(Ok(classification())).is_none());
        assert!(!engine.is_ready());
        assert!(engine.set_main_category("garden").is_err());
    }

    #[test]
    fn failed_taxonomy_keeps_change_pending() {
        let mut engine = CatalogEngine::new("lighting");
        assert!(engine
            .load_taxonomy(Err(ApiError::transport("offline")))
            .is_none());
        assert_eq!(
            engine.set_main_category("furniture").unwrap(),
            MainCategoryChange::Deferred
        );
    }

    #[test]
    fn main_category_change_resets_every_dependent_facet() {
        let mut engine = loaded_engine();
        engine.toggle_facet_value(Facet::SubCategory, "吊灯");
        engine.toggle_facet_value(Facet::Brand, "Flos");
        engine.toggle_facet_value(Facet::Status, "1");
        engine.toggle_tag_value("场景", "客厅").unwrap();
        assert!(engine.filter().has_selection());

        let change = engine.set_main_category("furniture").unwrap();
        assert!(matches!(change, MainCategoryChange::Applied(_)));
        assert!(!engine.filter().has_selection());
        assert!(engine.tag_groups().is_empty());
        assert!(engine.chips().is_empty());
    }

    #[test]
    fn same_main_category_is_unchanged() {
        let mut engine = loaded_engine();
        engine.toggle_facet_value(Facet::Brand, "Flos");
        assert_eq!(
            engine.set_main_category("lighting").unwrap(),
            MainCategoryChange::Unchanged
        );
        assert!(engine.filter().selection(Facet::Brand).contains("Flos"));
    }

    #[test]
    fn unoffered_tag_type_is_not_selectable() {
        let mut engine = loaded_engine();
        assert!(engine.toggle_tag_value("材质", "实木").is_none());
        assert!(engine.filter().tag_selection("材质").is_none());
    }

    #[test]
    fn tag_reload_prunes_unoffered_selections() {
        let mut engine = loaded_engine();
        engine.toggle_tag_value("功能", "调光").unwrap();

        let (ticket, label) = engine.begin_tag_fetch();
        let refetch =
            engine.complete_tag_fetch(ticket, label.as_deref(), Ok(vec![tag_row("场景", "客厅", &[])]));
        assert!(refetch.is_some());
        assert!(engine.filter().tag_selection("功能").is_none());
    }

    #[test]
    fn stale_tag_response_is_ignored() {
        let mut engine = loaded_engine();
        let (old, _) = engine.begin_tag_fetch();
        let (new, label) = engine.begin_tag_fetch();

        engine.complete_tag_fetch(new, label.as_deref(), Ok(vec![tag_row("功能", "调光", &[])]));
        engine.complete_tag_fetch(old, None, Ok(vec![tag_row("材质", "实木", &[])]));

        assert!(engine.tag_groups().get("功能").is_some());
        assert!(engine.tag_groups().get("材质").is_none());
    }

    #[test]
    fn query_omits_empty_tag_types() {
        let mut engine = loaded_engine();
        engine.toggle_tag_value("场景", "客厅").unwrap();
        engine.toggle_tag_value("场景", "客厅").unwrap();

        let body = serde_json::to_value(engine.query().unwrap()).unwrap();
        assert!(body.get("tagsByType").is_none());
    }

    #[test]
    fn only_latest_ticket_begins_fetch() {
        let mut engine = loaded_engine();
        let first = engine.toggle_facet_value(Facet::Brand, "Flos");
        let second = engine.toggle_facet_value(Facet::Status, "1");

        assert!(engine.try_begin_fetch(first).is_none());
        let pending = engine.try_begin_fetch(second).unwrap();
        assert_eq!(pending.query.brand, ["Flos"]);
        assert_eq!(pending.query.product_status, ["1"]);
    }

    #[test]
    fn failed_fetch_keeps_previous_result() {
        let mut engine = loaded_engine();
        let ticket = engine.request_refresh();
        let page = PageResult {
            records: vec![product("1", "灯具", &[], "Flos", "1", &[])],
            total: 1,
        };
        assert_eq!(engine.complete_fetch(ticket, Ok(page)), FetchOutcome::Applied);

        let ticket = engine.toggle_facet_value(Facet::Brand, "Vitra");
        assert_eq!(
            engine.complete_fetch(ticket, Err(ApiError::timeout(15_000))),
            FetchOutcome::Failed
        );
        assert_eq!(ids(&engine), ["1"]);
        assert_eq!(engine.total(), 1);
    }

    #[test]
    fn applied_result_resets_to_first_page() {
        let mut engine = loaded_engine();
        let page = |n: usize| PageResult {
            records: (0..n)
                .map(|i| product(&i.to_string(), "灯具", &[], "Flos", "1", &[]))
                .collect(),
            total: n as u64,
        };

        let ticket = engine.request_refresh();
        engine.complete_fetch(ticket, Ok(page(37)));
        assert_eq!(engine.pagination().page_count(), 4);
        assert_eq!(engine.set_page(4), 4);
        assert_eq!(engine.page_items().len(), 1);
        assert_eq!(engine.set_page(0), 1);
        assert_eq!(engine.set_page(5), 4);

        let ticket = engine.request_refresh();
        engine.complete_fetch(ticket, Ok(page(13)));
        assert_eq!(engine.pagination().current(), 1);
        assert_eq!(engine.page_items().len(), 12);
    }

    #[test]
    fn brand_options_are_distinct_names() {
        let mut engine = loaded_engine();
        engine.load_brands(Ok(PageResult {
            records: ["Flos", "", "Flos", "Vitra"]
                .iter()
                .map(|name| BrandSummary {
                    brand_name: name.to_string(),
                    ..BrandSummary::default()
                })
                .collect(),
            total: 4,
        }));
        assert_eq!(engine.brand_options(), ["Flos", "Vitra"]);

        engine.load_brands(Err(ApiError::transport("offline")));
        assert_eq!(engine.brand_options().len(), 2);
    }
}

// =========================================================
// Toggle parity (property)
// =========================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn facet_strategy() -> impl Strategy<Value = Facet> {
        prop_oneof![
            Just(Facet::SubCategory),
            Just(Facet::Brand),
            Just(Facet::Status),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 200,
            ..ProptestConfig::default()
        })]

        #[test]
        fn toggled_odd_times_means_selected(
            ops in prop::collection::vec((facet_strategy(), "[a-d]"), 0..64)
        ) {
            let mut state = FilterState::new(Some("lighting".into()));
            let mut counts: HashMap<(Facet, String), usize> = HashMap::new();

            for (facet, value) in &ops {
                state.toggle(*facet, value);
                *counts.entry((*facet, value.clone())).or_default() += 1;
            }

            for facet in [Facet::SubCategory, Facet::Brand, Facet::Status] {
                let expected: BTreeSet<String> = counts
                    .iter()
                    .filter(|((f, _), n)| *f == facet && *n % 2 == 1)
                    .map(|((_, v), _)| v.clone())
                    .collect();
                prop_assert_eq!(state.selection(facet), &expected);
            }
        }

        #[test]
        fn tag_toggles_keep_parity_and_drop_empty_types(
            ops in prop::collection::vec(("[xy]", "[a-c]"), 0..48)
        ) {
            let mut state = FilterState::default();
            let mut counts: HashMap<(String, String), usize> = HashMap::new();

            for (tag_type, value) in &ops {
                state.toggle_tag(tag_type, value);
                *counts.entry((tag_type.clone(), value.clone())).or_default() += 1;
            }

            for ((tag_type, value), n) in &counts {
                let selected = state
                    .tag_selection(tag_type)
                    .is_some_and(|set| set.contains(value));
                prop_assert_eq!(selected, n % 2 == 1);
            }
            prop_assert!(state.tags_by_type().values().all(|set| !set.is_empty()));
        }

        #[test]
        fn main_category_change_always_clears(
            ops in prop::collection::vec((facet_strategy(), "[a-d]"), 0..32),
            tags in prop::collection::vec(("[xy]", "[a-c]"), 0..16)
        ) {
            let mut state = FilterState::new(Some("lighting".into()));
            for (facet, value) in &ops {
                state.toggle(*facet, value);
            }
            for (tag_type, value) in &tags {
                state.toggle_tag(tag_type, value);
            }

            state.set_main_category("furniture");
            prop_assert!(!state.has_selection());
            prop_assert_eq!(state.main_category(), Some("furniture"));
        }
    }
}

// =========================================================
// Controller: debounce and ordering
// =========================================================

mod controller_flow {
    use super::*;

    #[tokio::test]
    async fn bootstrap_loads_everything() {
        let source = Rc::new(ScriptedSource::new());
        let notified = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&notified);

        let controller = CatalogController::new(Rc::clone(&source), "lighting")
            .with_listener(move || *counter.borrow_mut() += 1);
        controller.bootstrap().await;

        let engine = controller.engine();
        assert_eq!(engine.brand_options(), ["Flos", "Artemide", "Vitra"]);
        assert_eq!(engine.main_categories().len(), 2);
        assert!(engine.tag_groups().get("功能").is_some());
        assert!(engine.tag_groups().get("材质").is_none());
        assert_eq!(ids(&engine), ["1", "2", "3"]);
        assert_eq!(source.product_call_count(), 1);
        assert!(*notified.borrow() >= 2);
    }

    #[tokio::test]
    async fn failed_classification_fetches_nothing_else() {
        let source = Rc::new(ScriptedSource::new());
        *source.classification.borrow_mut() = Err(ApiError::transport("offline"));

        let controller = booted(Rc::clone(&source)).await;
        assert!(!controller.engine().is_ready());
        assert_eq!(source.product_call_count(), 0);
        assert_eq!(*source.tag_calls.borrow(), 0);
    }

    #[tokio::test]
    async fn rapid_toggles_collapse_into_one_request() {
        let source = Rc::new(ScriptedSource::new());
        let controller = booted(Rc::clone(&source)).await;
        let before = source.product_call_count();

        let a = controller.toggle_facet_value(Facet::SubCategory, "吊灯");
        let b = controller.toggle_facet_value(Facet::Brand, "Artemide");
        let c = controller.toggle_facet_value(Facet::Brand, "Flos");

        let (ra, rb, rc) = futures::join!(
            controller.refresh_after(a, sleep_ms(20)),
            controller.refresh_after(b, sleep_ms(20)),
            controller.refresh_after(c, sleep_ms(20)),
        );
        assert_eq!(ra, None);
        assert_eq!(rb, None);
        assert_eq!(rc, Some(FetchOutcome::Applied));
        assert_eq!(source.product_call_count(), before + 1);

        let last = source.product_calls.borrow().last().cloned().unwrap();
        assert_eq!(last.categories, ["吊灯"]);
        assert_eq!(last.brand, ["Artemide", "Flos"]);
        assert_eq!(ids(&controller.engine()), ["1", "3"]);
    }

    #[tokio::test]
    async fn slow_stale_response_never_overwrites_newer() {
        let source = Rc::new(ScriptedSource::new());
        source
            .latency_by_brand
            .borrow_mut()
            .insert("Flos".into(), Duration::from_millis(80));
        source
            .latency_by_brand
            .borrow_mut()
            .insert("Artemide".into(), Duration::from_millis(5));
        let controller = booted(Rc::clone(&source)).await;

        let first = controller.toggle_facet_value(Facet::Brand, "Flos");
        let (slow, fast) = futures::join!(controller.refresh_after(first, async {}), async {
            sleep_ms(10).await;
            controller.toggle_facet_value(Facet::Brand, "Flos");
            let second = controller.toggle_facet_value(Facet::Brand, "Artemide");
            controller.refresh_after(second, async {}).await
        });

        assert_eq!(fast, Some(FetchOutcome::Applied));
        assert_eq!(slow, Some(FetchOutcome::Stale));
        assert_eq!(ids(&controller.engine()), ["2", "3"]);
        assert_eq!(
            controller.engine().query().unwrap().brand,
            ["Artemide"]
        );
    }

    #[tokio::test]
    async fn failure_keeps_last_good_result() {
        let source = Rc::new(ScriptedSource::new());
        let controller = booted(Rc::clone(&source)).await;
        *source.fail_products.borrow_mut() = true;

        let ticket = controller.toggle_facet_value(Facet::Status, "2");
        let outcome = controller.refresh_after(ticket, async {}).await;
        assert_eq!(outcome, Some(FetchOutcome::Failed));
        assert_eq!(ids(&controller.engine()), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn switching_main_category_refetches_tags_and_products() {
        let source = Rc::new(ScriptedSource::new());
        let controller = booted(Rc::clone(&source)).await;
        controller.toggle_facet_value(Facet::Brand, "Flos");

        controller
            .select_main_category("furniture", sleep_ms(1))
            .await
            .unwrap();

        let engine = controller.engine();
        assert_eq!(engine.active_label(), Some("家具"));
        assert!(engine.filter().selection(Facet::Brand).is_empty());
        assert!(engine.tag_groups().get("材质").is_some());
        assert!(engine.tag_groups().get("功能").is_none());
        assert_eq!(ids(&engine), ["4"]);
        assert_eq!(*source.tag_calls.borrow(), 2);
    }

    #[tokio::test]
    async fn unknown_main_category_is_rejected() {
        let source = Rc::new(ScriptedSource::new());
        let controller = booted(Rc::clone(&source)).await;
        let calls = source.product_call_count();

        assert!(controller
            .select_main_category("garden", async {})
            .await
            .is_err());
        assert_eq!(source.product_call_count(), calls);
    }

    #[tokio::test]
    async fn tag_filter_is_and_across_types() {
        let source = Rc::new(ScriptedSource::new());
        let controller = booted(Rc::clone(&source)).await;

        let ticket = controller.toggle_tag_value("场景", "客厅").unwrap();
        controller.refresh_after(ticket, async {}).await;
        assert_eq!(ids(&controller.engine()), ["1"]);

        let ticket = controller.toggle_tag_value("功能", "调光").unwrap();
        controller.refresh_after(ticket, async {}).await;
        assert!(controller.engine().products().is_empty());

        let chips = controller.engine().chips();
        assert_eq!(chips.len(), 2);
        let ticket = controller.remove_selection(&chips[0].key, &chips[0].value);
        controller.refresh_after(ticket, async {}).await;
        assert_eq!(controller.engine().products().len(), 1);
    }
}
