//! 分页器 - 业务能力层

use crate::config::Config;
use crate::error::ValidationError;

/// 截取第 `page_number` 页（从 1 开始）
///
/// 切片区间为 `[(p-1)*size, p*size)`，并截断到列表长度。
/// 页码缺失或不是正数时返回校验错误；超出末尾的页码返回空列表。
pub fn page<T: Clone>(
    items: &[T],
    page_number: Option<i64>,
    page_size: usize,
) -> Result<Vec<T>, ValidationError> {
    let page_number = page_number.ok_or_else(|| ValidationError::missing("page"))?;
    if page_number <= 0 {
        return Err(ValidationError::malformed(
            "page",
            format!("页码必须为正整数，实际为 {}", page_number),
        ));
    }

    let start = usize::try_from(page_number - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));

    let Some(start) = start.filter(|s| *s < items.len()) else {
        return Ok(Vec::new());
    };
    let end = start.saturating_add(page_size).min(items.len());

    Ok(items[start..end].to_vec())
}

/// 固定页大小的分页器
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.questions_per_page)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page<T: Clone>(
        &self,
        items: &[T],
        page_number: Option<i64>,
    ) -> Result<Vec<T>, ValidationError> {
        page(items, page_number, self.page_size)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
