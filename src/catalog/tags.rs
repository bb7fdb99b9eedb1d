use zspace_shared::TagRow;

/// 一个标签类型及其可选值（按首次出现的顺序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup {
    pub tag_type: String,
    pub values: Vec<String>,
}

/// 由后台标签行动态生成的分组
///
/// 分组键来自数据而不是固定枚举，渲染层按顺序迭代即可。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagGroups {
    groups: Vec<TagGroup>,
}

impl TagGroups {
    /// 按 `type` 分组
    ///
    /// 没有 `type` 的行被忽略；带适用大类的行只在 `active_label` 命中时保留。
    pub fn from_rows(rows: &[TagRow], active_label: Option<&str>) -> Self {
        let mut groups: Vec<TagGroup> = Vec::new();

        for row in rows {
            let Some(tag_type) = row.tag_type.as_deref() else {
                continue;
            };
            if let Some(label) = active_label.filter(|l| !l.is_empty()) {
                if !row.category.is_empty() && !row.category.iter().any(|c| c == label) {
                    continue;
                }
            }

            let idx = match groups.iter().position(|g| g.tag_type == tag_type) {
                Some(idx) => idx,
                None => {
                    groups.push(TagGroup {
                        tag_type: tag_type.to_string(),
                        values: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let values = &mut groups[idx].values;
            if !values.contains(&row.name) {
                values.push(row.name.clone());
            }
        }

        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagGroup> {
        self.groups.iter()
    }

    pub fn get(&self, tag_type: &str) -> Option<&TagGroup> {
        self.groups.iter().find(|g| g.tag_type == tag_type)
    }

    /// 该类型是否提供该值
    pub fn offers(&self, tag_type: &str, value: &str) -> bool {
        self.get(tag_type)
            .is_some_and(|g| g.values.iter().any(|v| v == value))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tag_type: Option<&str>, name: &str, category: &[&str]) -> TagRow {
        TagRow {
            tag_type: tag_type.map(str::to_string),
            name: name.to_string(),
            category: category.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn rows() -> Vec<TagRow> {
        vec![
            row(Some("场景"), "客厅", &[]),
            row(Some("功能"), "调光", &["灯具"]),
            row(Some("场景"), "卧室", &["家具", "灯具"]),
            row(Some("场景"), "客厅", &[]),
            row(None, "孤立", &[]),
            row(Some("材质"), "实木", &["家具"]),
        ]
    }

    #[test]
    fn groups_in_first_seen_order_without_duplicates() {
        let groups = TagGroups::from_rows(&rows(), None);
        let types: Vec<_> = groups.iter().map(|g| g.tag_type.as_str()).collect();
        assert_eq!(types, ["场景", "功能", "材质"]);
        assert_eq!(groups.get("场景").unwrap().values, ["客厅", "卧室"]);
    }

    #[test]
    fn filters_by_active_category() {
        let groups = TagGroups::from_rows(&rows(), Some("灯具"));
        let types: Vec<_> = groups.iter().map(|g| g.tag_type.as_str()).collect();
        assert_eq!(types, ["场景", "功能"]);
        assert!(groups.offers("功能", "调光"));
        assert!(!groups.offers("材质", "实木"));

        let groups = TagGroups::from_rows(&rows(), Some("配饰"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.get("场景").unwrap().values, ["客厅"]);
    }
}
