use serde::{Deserialize, Serialize};

/// Page size used by every list screen.
pub const PAGE_SIZE: u32 = 20;

/// Paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, page: u32, total: i64) -> Self {
        let total_pages = if total <= 0 {
            1
        } else {
            ((total as u64).div_ceil(PAGE_SIZE as u64)) as u32
        };

        Self {
            data,
            page,
            per_page: PAGE_SIZE,
            total,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// 1-indexed page number; zero is treated as the first page.
pub fn normalize_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

pub fn offset_for(page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(PAGE_SIZE)
}

/// `%term%` pattern for LIKE searches; `None` for blank input.
pub fn like_pattern(q: Option<&str>) -> Option<String> {
    let term = q.map(str::trim).filter(|s| !s.is_empty())?;
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}
