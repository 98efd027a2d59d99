//! 题库存储 - 基础设施层
//!
//! 持有唯一的题库数据，只暴露"读"和"写"两种能力

use crate::error::{AppError, AppResult, StorageError};
use crate::models::loaders::write_trivia_bank;
use crate::models::TriviaBank;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, error};

/// 存储内部状态
#[derive(Debug, Clone)]
pub struct StoreState {
    pub bank: TriviaBank,
    /// 下一个可分配的题目 id，id 空间耗尽时为 `None`
    next_question_id: Option<i64>,
}

impl StoreState {
    fn new(bank: TriviaBank) -> Self {
        let max_id = bank.questions.iter().map(|q| q.id).max().unwrap_or(0);
        Self {
            next_question_id: max_id.checked_add(1),
            bank,
        }
    }

    /// 分配新的题目 id
    ///
    /// 单调递增，删除后的 id 不会被复用；超过 `i64::MAX` 时返回存储错误
    pub fn allocate_question_id(&mut self) -> AppResult<i64> {
        let id = self
            .next_question_id
            .ok_or(StorageError::IdSpaceExhausted)?;
        self.next_question_id = id.checked_add(1);
        Ok(id)
    }
}

/// 题库存储
///
/// 职责：
/// - 持有唯一的题库数据（分类 + 题目，按插入顺序）
/// - 单次读写在锁内完成，读方不会看到写了一半的记录
/// - 写操作可选回写 TOML 文件，回写失败时回滚内存状态
/// - 不认识分页 / 搜索 / 抽题
pub struct TriviaStore {
    state: RwLock<StoreState>,
    persist_path: Option<PathBuf>,
}

impl TriviaStore {
    /// 创建纯内存存储
    pub fn new(bank: TriviaBank) -> Self {
        Self {
            state: RwLock::new(StoreState::new(bank)),
            persist_path: None,
        }
    }

    /// 创建带文件回写的存储
    pub fn with_persistence(bank: TriviaBank, path: impl Into<PathBuf>) -> Self {
        Self {
            state: RwLock::new(StoreState::new(bank)),
            persist_path: Some(path.into()),
        }
    }

    pub fn persist_path(&self) -> Option<&Path> {
        self.persist_path.as_deref()
    }

    /// 在读锁内访问题库
    ///
    /// # 参数
    /// - `operation`: 操作名（用于错误信息）
    /// - `f`: 读取逻辑
    pub fn read<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&TriviaBank) -> T,
    ) -> AppResult<T> {
        let state = self
            .state
            .read()
            .map_err(|_| StorageError::LockPoisoned { operation })?;
        Ok(f(&state.bank))
    }

    /// 在写锁内修改题库
    ///
    /// 修改逻辑返回错误或回写失败时，状态恢复到修改前
    ///
    /// # 参数
    /// - `operation`: 操作名（用于日志和错误信息）
    /// - `f`: 修改逻辑
    pub fn write<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut StoreState) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::LockPoisoned { operation })?;

        let before = state.clone();

        let value = match f(&mut *state) {
            Ok(value) => value,
            Err(e) => {
                *state = before;
                return Err(e);
            }
        };

        if let Some(path) = &self.persist_path {
            if let Err(e) = write_trivia_bank(path, &state.bank) {
                error!("❌ {} 回写题库失败，已回滚: {:#}", operation, e);
                *state = before;
                return Err(AppError::Storage(StorageError::PersistFailed {
                    path: path.display().to_string(),
                    source: e.into(),
                }));
            }
            debug!("{} 已回写题库: {}", operation, path.display());
        }

        Ok(value)
    }

    /// 导出当前题库的副本
    pub fn snapshot(&self) -> AppResult<TriviaBank> {
        self.read("snapshot", |bank| bank.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Question};

    fn sample_bank() -> TriviaBank {
        TriviaBank {
            categories: vec![Category::new(1, "Science").unwrap()],
            questions: vec![Question {
                id: 5,
                text: "What is the answer to everything".to_string(),
                answer: "42".to_string(),
                category_id: 1,
                difficulty: 3,
            }],
        }
    }

    #[test]
    fn test_allocate_id_continues_after_max() {
        let store = TriviaStore::new(sample_bank());
        let first = store.write("test", |s| s.allocate_question_id()).unwrap();
        let second = store.write("test", |s| s.allocate_question_id()).unwrap();
        assert_eq!(first, 6);
        assert_eq!(second, 7);
    }

    #[test]
    fn test_max_id_bank_loads_and_refuses_new_ids() {
        let mut bank = sample_bank();
        bank.questions[0].id = i64::MAX;
        let store = TriviaStore::new(bank);

        let result = store.write("test", |s| s.allocate_question_id());
        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::IdSpaceExhausted))
        ));
        assert_eq!(store.snapshot().unwrap().questions[0].id, i64::MAX);
    }

    #[test]
    fn test_last_id_is_allocated_once() {
        let mut bank = sample_bank();
        bank.questions[0].id = i64::MAX - 1;
        let store = TriviaStore::new(bank);

        assert_eq!(store.write("test", |s| s.allocate_question_id()).unwrap(), i64::MAX);
        assert!(store.write("test", |s| s.allocate_question_id()).is_err());
    }

    #[test]
    fn test_failed_mutation_is_rolled_back() {
        let store = TriviaStore::new(sample_bank());
        let result: AppResult<()> = store.write("test", |s| {
            s.bank.questions.clear();
            Err(AppError::question_not_found(5))
        });

        assert!(result.is_err());
        assert_eq!(store.snapshot().unwrap(), sample_bank());
    }

    #[test]
    fn test_failed_persist_is_rolled_back() {
        let path = std::env::temp_dir()
            .join("trivia_store_missing_dir")
            .join("nested")
            .join("trivia.toml");
        let store = TriviaStore::with_persistence(sample_bank(), path);

        let result = store.write("delete", |s| {
            s.bank.questions.retain(|q| q.id != 5);
            Ok(())
        });

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(store.snapshot().unwrap().questions.len(), 1);
    }
}
