use std::collections::{BTreeMap, BTreeSet};

// =========================================================
// 筛选维度 (Facets)
// =========================================================

/// 固定的多选维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    SubCategory,
    Brand,
    Status,
}

impl Facet {
    /// 筛选栏中的区块标题
    pub fn title(&self) -> &'static str {
        match self {
            Facet::SubCategory => "品类",
            Facet::Brand => "品牌",
            Facet::Status => "状态",
        }
    }
}

/// 可被清空或移除单个值的目标：固定维度或某个标签类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Facet(Facet),
    Tag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATUS_OPTIONS: [StatusOption; 4] = [
    StatusOption { value: "1", label: "现货" },
    StatusOption { value: "2", label: "在途" },
    StatusOption { value: "3", label: "期货" },
    StatusOption { value: "4", label: "特价" },
];

/// 状态值的中文名；未知值原样返回
pub fn status_label(value: &str) -> &str {
    STATUS_OPTIONS
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or(value)
}

// =========================================================
// 筛选状态 (FilterState)
// =========================================================

/// 商品查询的唯一数据来源
///
/// 所有集合按值比较，插入顺序无意义。标签选择中不保留空集合。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    main_category: Option<String>,
    sub_categories: BTreeSet<String>,
    brands: BTreeSet<String>,
    statuses: BTreeSet<String>,
    tags_by_type: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    pub fn new(main_category: Option<String>) -> Self {
        Self {
            main_category,
            ..Self::default()
        }
    }

    pub fn main_category(&self) -> Option<&str> {
        self.main_category.as_deref()
    }

    /// 替换大类并清空全部依赖维度
    pub fn set_main_category(&mut self, id: impl Into<String>) {
        self.main_category = Some(id.into());
        self.reset_dependents();
    }

    pub fn reset_dependents(&mut self) {
        self.sub_categories.clear();
        self.brands.clear();
        self.statuses.clear();
        self.tags_by_type.clear();
    }

    pub fn selection(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::SubCategory => &self.sub_categories,
            Facet::Brand => &self.brands,
            Facet::Status => &self.statuses,
        }
    }

    fn selection_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::SubCategory => &mut self.sub_categories,
            Facet::Brand => &mut self.brands,
            Facet::Status => &mut self.statuses,
        }
    }

    pub fn tag_selection(&self, tag_type: &str) -> Option<&BTreeSet<String>> {
        self.tags_by_type.get(tag_type)
    }

    pub fn tags_by_type(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.tags_by_type
    }

    pub fn is_selected(&self, key: &FilterKey, value: &str) -> bool {
        match key {
            FilterKey::Facet(facet) => self.selection(*facet).contains(value),
            FilterKey::Tag(tag_type) => self
                .tags_by_type
                .get(tag_type)
                .is_some_and(|set| set.contains(value)),
        }
    }

    /// 翻转某值的选中状态，返回翻转后是否选中
    pub fn toggle(&mut self, facet: Facet, value: &str) -> bool {
        let set = self.selection_mut(facet);
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    pub fn toggle_tag(&mut self, tag_type: &str, value: &str) -> bool {
        let set = self.tags_by_type.entry(tag_type.to_string()).or_default();
        let selected = if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        };
        if set.is_empty() {
            self.tags_by_type.remove(tag_type);
        }
        selected
    }

    pub fn clear(&mut self, key: &FilterKey) {
        match key {
            FilterKey::Facet(facet) => self.selection_mut(*facet).clear(),
            FilterKey::Tag(tag_type) => {
                self.tags_by_type.remove(tag_type);
            }
        }
    }

    /// 取消单个值；值不存在时返回 `false`
    pub fn remove(&mut self, key: &FilterKey, value: &str) -> bool {
        match key {
            FilterKey::Facet(facet) => self.selection_mut(*facet).remove(value),
            FilterKey::Tag(tag_type) => {
                let Some(set) = self.tags_by_type.get_mut(tag_type) else {
                    return false;
                };
                let removed = set.remove(value);
                if set.is_empty() {
                    self.tags_by_type.remove(tag_type);
                }
                removed
            }
        }
    }

    /// 只保留 `keep` 认可的标签选择，返回是否有选择被移除
    pub fn retain_tags<F>(&mut self, keep: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        let mut changed = false;
        for (tag_type, set) in self.tags_by_type.iter_mut() {
            let before = set.len();
            set.retain(|value| keep(tag_type, value));
            changed |= set.len() != before;
        }
        self.tags_by_type.retain(|_, set| !set.is_empty());
        changed
    }

    pub fn has_selection(&self) -> bool {
        !self.sub_categories.is_empty()
            || !self.brands.is_empty()
            || !self.statuses.is_empty()
            || !self.tags_by_type.is_empty()
    }

    /// 已选条件标签：状态、品类、功能标签、品牌
    pub fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        for value in &self.statuses {
            chips.push(FilterChip::new(
                FilterKey::Facet(Facet::Status),
                value,
                format!("状态: {}", status_label(value)),
            ));
        }
        for value in &self.sub_categories {
            chips.push(FilterChip::new(
                FilterKey::Facet(Facet::SubCategory),
                value,
                format!("品类: {value}"),
            ));
        }
        for (tag_type, values) in &self.tags_by_type {
            for value in values {
                chips.push(FilterChip::new(
                    FilterKey::Tag(tag_type.clone()),
                    value,
                    format!("标签: {value}"),
                ));
            }
        }
        for value in &self.brands {
            chips.push(FilterChip::new(
                FilterKey::Facet(Facet::Brand),
                value,
                format!("品牌: {value}"),
            ));
        }
        chips
    }
}

/// 一个可单独移除的已选条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: FilterKey,
    pub value: String,
    pub text: String,
}

impl FilterChip {
    fn new(key: FilterKey, value: &str, text: String) -> Self {
        Self {
            key,
            value: value.to_string(),
            text,
        }
    }
}

// =========================================================
// 区块折叠 (Section expansion)
// =========================================================

/// 筛选栏折叠状态：全局开关 + 各区块覆盖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionExpansion {
    all_expanded: bool,
    overrides: BTreeMap<String, bool>,
}

impl Default for SectionExpansion {
    fn default() -> Self {
        Self {
            all_expanded: true,
            overrides: BTreeMap::new(),
        }
    }
}

impl SectionExpansion {
    pub fn all_expanded(&self) -> bool {
        self.all_expanded
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.overrides
            .get(section)
            .copied()
            .unwrap_or(self.all_expanded)
    }

    pub fn toggle_section(&mut self, section: &str) {
        let next = !self.is_expanded(section);
        self.overrides.insert(section.to_string(), next);
    }

    /// 切换全局开关并丢弃所有覆盖
    pub fn toggle_all(&mut self) {
        self.all_expanded = !self.all_expanded;
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut state = FilterState::new(Some("lighting".into()));
        assert!(state.toggle(Facet::Brand, "Flos"));
        assert!(state.toggle(Facet::Brand, "Vitra"));
        assert!(!state.toggle(Facet::Brand, "Flos"));
        assert_eq!(
            state.selection(Facet::Brand).iter().collect::<Vec<_>>(),
            ["Vitra"]
        );
    }

    #[test]
    fn tag_sets_are_created_and_dropped() {
        let mut state = FilterState::default();
        assert!(state.toggle_tag("场景", "客厅"));
        assert!(state.tag_selection("场景").is_some());
        assert!(!state.toggle_tag("场景", "客厅"));
        assert!(state.tag_selection("场景").is_none());
        assert!(!state.has_selection());
    }

    #[test]
    fn clear_leaves_other_facets() {
        let mut state = FilterState::default();
        state.toggle(Facet::Status, "1");
        state.toggle(Facet::Brand, "Flos");
        state.toggle_tag("场景", "客厅");
        state.toggle_tag("功能", "调光");

        state.clear(&FilterKey::Facet(Facet::Status));
        state.clear(&FilterKey::Tag("场景".into()));

        assert!(state.selection(Facet::Status).is_empty());
        assert!(state.selection(Facet::Brand).contains("Flos"));
        assert!(state.tag_selection("场景").is_none());
        assert!(state.is_selected(&FilterKey::Tag("功能".into()), "调光"));
    }

    #[test]
    fn remove_single_value() {
        let mut state = FilterState::default();
        state.toggle(Facet::SubCategory, "吊灯");
        state.toggle(Facet::SubCategory, "台灯");
        assert!(state.remove(&FilterKey::Facet(Facet::SubCategory), "吊灯"));
        assert!(!state.remove(&FilterKey::Facet(Facet::SubCategory), "吊灯"));
        assert!(!state.remove(&FilterKey::Tag("场景".into()), "客厅"));
        assert_eq!(state.selection(Facet::SubCategory).len(), 1);
    }

    #[test]
    fn chips_follow_display_order() {
        let mut state = FilterState::default();
        state.toggle(Facet::Brand, "Flos");
        state.toggle_tag("场景", "客厅");
        state.toggle(Facet::SubCategory, "吊灯");
        state.toggle(Facet::Status, "2");

        let texts: Vec<_> = state.chips().into_iter().map(|c| c.text).collect();
        assert_eq!(texts, ["状态: 在途", "品类: 吊灯", "标签: 客厅", "品牌: Flos"]);
    }

    #[test]
    fn retain_tags_prunes_and_reports() {
        let mut state = FilterState::default();
        state.toggle_tag("场景", "客厅");
        state.toggle_tag("材质", "实木");
        assert!(state.retain_tags(|tag_type, _| tag_type == "场景"));
        assert!(state.tag_selection("材质").is_none());
        assert!(!state.retain_tags(|_, _| true));
    }

    #[test]
    fn section_overrides_reset_on_global_toggle() {
        let mut sections = SectionExpansion::default();
        assert!(sections.is_expanded("品牌"));

        sections.toggle_section("品牌");
        assert!(!sections.is_expanded("品牌"));
        assert!(sections.is_expanded("品类"));

        sections.toggle_all();
        assert!(!sections.all_expanded());
        assert!(!sections.is_expanded("品牌"));

        sections.toggle_section("品牌");
        assert!(sections.is_expanded("品牌"));
        sections.toggle_all();
        assert!(sections.is_expanded("品类"));
        assert!(sections.is_expanded("品牌"));
    }

    #[test]
    fn unknown_status_label_passes_through() {
        assert_eq!(status_label("3"), "期货");
        assert_eq!(status_label("现货"), "现货");
    }
}
