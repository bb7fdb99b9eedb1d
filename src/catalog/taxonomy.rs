use serde::{Deserialize, Serialize};
use zspace_shared::{CategoryItem, ClassificationPayload};

/// 大类 id 与后台中文名的固定对照
pub const LARGE_CATEGORY_TABLE: [(&str, &str); 3] =
    [("lighting", "灯具"), ("decor", "配饰"), ("furniture", "家具")];

/// 由中文名查 id；表外的名称原样作为 id
pub fn category_id_for_label(label: &str) -> String {
    LARGE_CATEGORY_TABLE
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(id, _)| (*id).to_string())
        .unwrap_or_else(|| label.to_string())
}

pub fn category_label_for_id(id: &str) -> Option<&'static str> {
    LARGE_CATEGORY_TABLE
        .iter()
        .find(|(i, _)| *i == id)
        .map(|(_, label)| *label)
}

/// 大类（单选）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainCategory {
    pub id: String,
    pub label: String,
}

/// 一个大类的可选品类与品牌
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub category: String,
    pub category_label: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
}

impl CategoryConfig {
    pub fn main_category(&self) -> MainCategory {
        MainCategory {
            id: self.category.clone(),
            label: self.category_label.clone(),
        }
    }
}

/// 把以中文名为键的分类载荷转为按 `largeCategory` 顺序排列的配置
pub fn transform_classification(payload: ClassificationPayload) -> Vec<CategoryConfig> {
    let ClassificationPayload {
        mut category,
        mut brand,
        large_category,
    } = payload;

    large_category
        .into_iter()
        .map(|label| CategoryConfig {
            category: category_id_for_label(&label),
            categories: category.remove(&label).unwrap_or_default(),
            brands: brand.remove(&label).unwrap_or_default(),
            category_label: label,
        })
        .collect()
}

// =========================================================
// 分类索引 (Taxonomy)
// =========================================================

/// 已加载的分类
///
/// `loaded` 区分"尚未返回"与"返回为空"，前者会让大类切换进入挂起状态。
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    configs: Vec<CategoryConfig>,
    loaded: bool,
}

impl Taxonomy {
    pub fn new(configs: Vec<CategoryConfig>) -> Self {
        Self {
            configs,
            loaded: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, id: &str) -> Option<&CategoryConfig> {
        self.configs.iter().find(|c| c.category == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|c| c.category_label.as_str())
    }

    pub fn configs(&self) -> &[CategoryConfig] {
        &self.configs
    }

    pub fn main_categories(&self) -> Vec<MainCategory> {
        self.configs.iter().map(CategoryConfig::main_category).collect()
    }
}

/// 当前大类下可选的品类
///
/// 优先使用全局品类列表中归属该大类的条目，列表缺失时退回分类配置自带的品类。
pub fn sub_category_options(config: &CategoryConfig, category_list: &[CategoryItem]) -> Vec<String> {
    if category_list.is_empty() {
        return config.categories.clone();
    }

    let mut options: Vec<String> = Vec::new();
    for item in category_list
        .iter()
        .filter(|item| item.large_category_label == config.category_label)
    {
        if !item.name.is_empty() && !options.contains(&item.name) {
            options.push(item.name.clone());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn payload() -> ClassificationPayload {
        ClassificationPayload {
            category: BTreeMap::from([
                ("灯具".to_string(), vec!["吊灯".to_string(), "台灯".to_string()]),
                ("家具".to_string(), vec!["沙发".to_string()]),
            ]),
            brand: BTreeMap::from([("灯具".to_string(), vec!["Flos".to_string()])]),
            large_category: vec!["家具".into(), "灯具".into(), "户外".into()],
        }
    }

    #[test]
    fn transform_follows_large_category_order() {
        let configs = transform_classification(payload());
        let ids: Vec<_> = configs.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(ids, ["furniture", "lighting", "户外"]);

        assert_eq!(configs[1].category_label, "灯具");
        assert_eq!(configs[1].categories, ["吊灯", "台灯"]);
        assert_eq!(configs[1].brands, ["Flos"]);
        assert!(configs[0].brands.is_empty());
        assert!(configs[2].categories.is_empty());
    }

    #[test]
    fn taxonomy_lookup() {
        let taxonomy = Taxonomy::new(transform_classification(payload()));
        assert!(taxonomy.is_loaded());
        assert_eq!(taxonomy.label_of("lighting"), Some("灯具"));
        assert!(!taxonomy.contains("decor"));
        assert!(!Taxonomy::default().is_loaded());
    }

    #[test]
    fn sub_categories_prefer_global_list() {
        let config = &transform_classification(payload())[1];
        assert_eq!(sub_category_options(config, &[]), ["吊灯", "台灯"]);

        let list = vec![
            CategoryItem {
                name: "落地灯".into(),
                large_category_label: "灯具".into(),
            },
            CategoryItem {
                name: "沙发".into(),
                large_category_label: "家具".into(),
            },
            CategoryItem {
                name: "落地灯".into(),
                large_category_label: "灯具".into(),
            },
        ];
        assert_eq!(sub_category_options(config, &list), ["落地灯"]);
    }

    #[test]
    fn label_table_round_trip() {
        for (id, label) in LARGE_CATEGORY_TABLE {
            assert_eq!(category_id_for_label(label), id);
            assert_eq!(category_label_for_id(id), Some(label));
        }
    }
}
