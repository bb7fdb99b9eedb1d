//! 与渲染框架无关的展示辅助

use zspace_shared::{BrandSummary, Toggleable};

use crate::catalog::pagination::Pagination;

/// 品牌墙每页数量
pub const BRANDS_PER_PAGE: usize = 6;

/// 价格展示：整数不带小数，小数去掉末尾的 0；空值或非数字返回空串
pub fn format_price(price: Option<&str>) -> String {
    let Some(raw) = price.map(str::trim).filter(|p| !p.is_empty()) else {
        return String::new();
    };
    let Ok(value) = raw.parse::<f64>() else {
        return String::new();
    };
    if !value.is_finite() {
        return String::new();
    }

    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let rendered = value.to_string();
    rendered.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// 只保留未被显式关闭的配置项
pub fn visible<T: Toggleable + Clone>(items: &[T]) -> Vec<T> {
    items.iter().filter(|item| item.is_visible()).cloned().collect()
}

/// 品牌墙只展示有效品牌
pub fn effective_brands(brands: &[BrandSummary]) -> Vec<BrandSummary> {
    brands.iter().filter(|b| b.is_effective()).cloned().collect()
}

pub fn brand_pagination(brands: &[BrandSummary]) -> Pagination {
    Pagination::new(brands.len(), BRANDS_PER_PAGE)
}

// =========================================================
// 轮播 (Carousel)
// =========================================================

/// 轮播下标，前后翻页循环；空列表上的操作都是空操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 数据变化后重设长度，下标越界时回到开头
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        if self.len > 0 {
            self.index = index.min(self.len - 1);
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zspace_shared::Banner;

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(Some("12800")), "12800");
        assert_eq!(format_price(Some("12800.00")), "12800");
        assert_eq!(format_price(Some("99.50")), "99.5");
        assert_eq!(format_price(Some("0")), "0");
        assert_eq!(format_price(Some("0.125")), "0.125");
        assert_eq!(format_price(Some("")), "");
        assert_eq!(format_price(Some("面议")), "");
        assert_eq!(format_price(None), "");
    }

    #[test]
    fn carousel_wraps() {
        let mut carousel = Carousel::new(3);
        assert_eq!(carousel.prev(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.go_to(7), 2);

        carousel.set_len(2);
        assert_eq!(carousel.index(), 0);

        let mut empty = Carousel::default();
        assert_eq!(empty.next(), 0);
        assert_eq!(empty.prev(), 0);
        assert_eq!(empty.go_to(3), 0);
    }

    #[test]
    fn hidden_only_when_explicitly_disabled() {
        let banner = |status| Banner {
            title1: "t".into(),
            status,
            ..Banner::default()
        };
        let shown = visible(&[banner(Some(true)), banner(None), banner(Some(false))]);
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn brand_wall_keeps_effective_brands() {
        let brands: Vec<BrandSummary> = (0..9)
            .map(|i| BrandSummary {
                id: i.to_string(),
                effective_flag: if i == 4 { Some(false) } else { Some(true) },
                ..BrandSummary::default()
            })
            .collect();
        let effective = effective_brands(&brands);
        assert_eq!(effective.len(), 8);

        let mut pages = brand_pagination(&effective);
        assert_eq!(pages.page_count(), 2);
        pages.set_page(2);
        assert_eq!(pages.slice(&effective).len(), 2);
    }
}
