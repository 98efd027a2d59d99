//! 分类目录 - 业务能力层
//!
//! 只负责"分类 id ↔ 分类名"的只读查询

use crate::error::AppResult;
use crate::infrastructure::TriviaStore;
use crate::models::Category;
use std::sync::Arc;

/// 分类目录
pub struct CategoryDirectory {
    store: Arc<TriviaStore>,
}

impl CategoryDirectory {
    pub fn new(store: Arc<TriviaStore>) -> Self {
        Self { store }
    }

    /// 按 id 查分类名，不存在时返回 `None`
    pub fn resolve_label(&self, category_id: i64) -> AppResult<Option<String>> {
        self.store.read("resolve_label", |bank| {
            bank.categories
                .iter()
                .find(|c| c.id == category_id)
                .map(|c| c.label.clone())
        })
    }

    /// 全部分类名（按存储顺序）
    pub fn list_all_labels(&self) -> AppResult<Vec<String>> {
        self.store.read("list_all_labels", |bank| {
            bank.categories.iter().map(|c| c.label.clone()).collect()
        })
    }

    /// 按分类名反查 id
    ///
    /// 精确匹配（区分大小写）。若存在同名分类，按存储顺序取第一个
    pub fn resolve_id_by_label(&self, label: &str) -> AppResult<Option<i64>> {
        self.store.read("resolve_id_by_label", |bank| {
            bank.categories
                .iter()
                .find(|c| c.label == label)
                .map(|c| c.id)
        })
    }

    pub fn list_all(&self) -> AppResult<Vec<Category>> {
        self.store.read("list_categories", |bank| bank.categories.clone())
    }

    pub fn exists(&self, category_id: i64) -> AppResult<bool> {
        self.store.read("category_exists", |bank| {
            bank.categories.iter().any(|c| c.id == category_id)
        })
    }
}
