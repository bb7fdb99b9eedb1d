use std::ops::Range;

pub const ITEMS_PER_PAGE: usize = 12;
const MAX_VISIBLE_PAGES: usize = 5;

/// 页码条中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

/// 内存结果集上的客户端分页（页码从 1 开始）
///
/// 越界页码被夹到合法范围；结果为空时当前页固定为 1。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_items: usize,
    per_page: usize,
    current: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, ITEMS_PER_PAGE)
    }
}

impl Pagination {
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            total_items,
            per_page: per_page.max(1),
            current: 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.page_count().max(1))
    }

    /// 跳到指定页，返回夹取后的实际页码
    pub fn set_page(&mut self, page: usize) -> usize {
        self.current = self.clamp(page);
        self.current
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.page_count()
    }

    pub fn prev(&mut self) -> usize {
        self.set_page(self.current.saturating_sub(1))
    }

    pub fn next(&mut self) -> usize {
        self.set_page(self.current + 1)
    }

    /// 当前页在结果集中的下标范围
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// 最多 5 个页码，其余用省略号代替
    pub fn page_numbers(&self) -> Vec<PageEntry> {
        let total = self.page_count();
        let current = self.current;

        if total <= MAX_VISIBLE_PAGES {
            return (1..=total).map(PageEntry::Page).collect();
        }

        let mut entries = Vec::with_capacity(MAX_VISIBLE_PAGES + 2);
        if current <= 3 {
            entries.extend((1..=4).map(PageEntry::Page));
            entries.push(PageEntry::Ellipsis);
            entries.push(PageEntry::Page(total));
        } else if current >= total - 2 {
            entries.push(PageEntry::Page(1));
            entries.push(PageEntry::Ellipsis);
            entries.extend((total - 3..=total).map(PageEntry::Page));
        } else {
            entries.push(PageEntry::Page(1));
            entries.push(PageEntry::Ellipsis);
            entries.extend((current - 1..=current + 1).map(PageEntry::Page));
            entries.push(PageEntry::Ellipsis);
            entries.push(PageEntry::Page(total));
        }
        entries
    }
}
