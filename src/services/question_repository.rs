//! 题目仓库 - 业务能力层
//!
//! 只负责题目的增删查，不关心分页和抽题

use crate::error::{AppError, AppResult, ValidationError};
use crate::infrastructure::TriviaStore;
use crate::models::{NewQuestion, Question};
use std::sync::Arc;
use tracing::{debug, info};

/// 题目仓库
///
/// 职责：
/// - 创建 / 删除单个题目
/// - 列出全部题目、按分类过滤、按题干关键词搜索
/// - 查询结果按插入顺序返回，空结果不是错误
pub struct QuestionRepository {
    store: Arc<TriviaStore>,
}

impl QuestionRepository {
    pub fn new(store: Arc<TriviaStore>) -> Self {
        Self { store }
    }

    /// 创建题目
    ///
    /// # 参数
    /// - `new`: 已校验的题目数据，分类必须存在
    ///
    /// # 返回
    /// 返回分配了 id 的题目
    pub fn insert(&self, new: NewQuestion) -> AppResult<Question> {
        let question = self.store.write("insert_question", |state| {
            let category_id = new.category_id();
            if !state.bank.categories.iter().any(|c| c.id == category_id) {
                return Err(ValidationError::invalid(
                    "category",
                    format!("分类 {} 不存在", category_id),
                )
                .into());
            }

            let id = state.allocate_question_id()?;
            let question = Question::from_new(id, new);
            state.bank.questions.push(question.clone());
            Ok(question)
        })?;

        info!("✓ 新建题目 {}", question);
        Ok(question)
    }

    /// 按 id 删除题目
    ///
    /// 不存在时返回 `NotFound`；重复删除同一 id 第二次即为 `NotFound`
    pub fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        self.store.write("delete_question", |state| {
            let index = state
                .bank
                .questions
                .iter()
                .position(|q| q.id == id)
                .ok_or_else(|| AppError::question_not_found(id))?;
            state.bank.questions.remove(index);
            Ok(())
        })?;

        info!("✓ 已删除题目 #{}", id);
        Ok(true)
    }

    /// 全部题目（插入顺序）
    pub fn list_all(&self) -> AppResult<Vec<Question>> {
        self.store
            .read("list_questions", |bank| bank.questions.clone())
    }

    /// 按分类过滤，没有匹配时返回空列表
    pub fn filter_by_category(&self, category_id: i64) -> AppResult<Vec<Question>> {
        self.store.read("filter_by_category", |bank| {
            bank.questions
                .iter()
                .filter(|q| q.category_id == category_id)
                .cloned()
                .collect()
        })
    }

    /// 按题干搜索（忽略大小写的子串匹配）
    ///
    /// 关键词为空或全为空白时返回校验错误
    pub fn search_by_text(&self, term: &str) -> AppResult<Vec<Question>> {
        if term.trim().is_empty() {
            return Err(ValidationError::invalid("searchTerm", "搜索关键词不能为空白").into());
        }

        let needle = term.to_lowercase();
        let matches: Vec<Question> = self.store.read("search_questions", |bank| {
            bank.questions
                .iter()
                .filter(|q| q.text_contains(&needle))
                .cloned()
                .collect()
        })?;

        debug!("搜索 '{}' 命中 {} 道题目", term, matches.len());
        Ok(matches)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<Question>> {
        self.store.read("get_question", |bank| {
            bank.questions.iter().find(|q| q.id == id).cloned()
        })
    }

    pub fn exists(&self, id: i64) -> AppResult<bool> {
        self.store
            .read("question_exists", |bank| bank.questions.iter().any(|q| q.id == id))
    }

    pub fn count(&self) -> AppResult<usize> {
        self.store.read("count_questions", |bank| bank.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TriviaBank};
    use std::collections::HashSet;

    fn repository() -> QuestionRepository {
        let bank = TriviaBank {
            categories: vec![
                Category::new(1, "Science").unwrap(),
                Category::new(2, "Sport").unwrap(),
            ],
            questions: vec![
                Question {
                    id: 1,
                    text: "What is the answer to everything".to_string(),
                    answer: "42".to_string(),
                    category_id: 1,
                    difficulty: 3,
                },
                Question {
                    id: 2,
                    text: "When did the big bang happen".to_string(),
                    answer: "When the universe was created".to_string(),
                    category_id: 1,
                    difficulty: 3,
                },
            ],
        };
        QuestionRepository::new(Arc::new(TriviaStore::new(bank)))
    }

    fn ids(questions: &[Question]) -> HashSet<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let repo = repository();
        let lower = repo.search_by_text("bang").unwrap();
        let upper = repo.search_by_text("BANG").unwrap();
        assert_eq!(ids(&lower), HashSet::from([2]));
        assert_eq!(ids(&lower), ids(&upper));
    }

    #[test]
    fn test_search_blank_term_is_rejected() {
        let repo = repository();
        for term in ["", "   ", "\t"] {
            match repo.search_by_text(term) {
                Err(AppError::Validation(e)) => assert_eq!(e.field, "searchTerm"),
                other => panic!("应当校验失败: {:?}", other),
            }
        }
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let repo = repository();
        assert!(repo.search_by_text("volcano").unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let repo = repository();
        let science = repo.filter_by_category(1).unwrap();
        assert_eq!(science.len(), 2);
        assert!(science.iter().all(|q| q.category_id == 1));
        assert!(repo.filter_by_category(2).unwrap().is_empty());
        assert!(repo.filter_by_category(99).unwrap().is_empty());
    }

    #[test]
    fn test_delete_twice_reports_not_found() {
        let repo = repository();
        assert!(repo.delete_by_id(1).unwrap());
        match repo.delete_by_id(1) {
            Err(AppError::NotFound { entity, id }) => {
                assert_eq!(entity, "question");
                assert_eq!(id, 1);
            }
            other => panic!("第二次删除应当返回 NotFound: {:?}", other),
        }
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_insert_assigns_fresh_id_after_delete() {
        let repo = repository();
        repo.delete_by_id(2).unwrap();

        let new = NewQuestion::new("Who scored the most goals", "Pelé", 2, 2).unwrap();
        let created = repo.insert(new).unwrap();

        assert_eq!(created.id, 3);
        assert!(repo.exists(3).unwrap());
        let all = repo.list_all().unwrap();
        assert_eq!(all.last().map(|q| q.id), Some(3));
    }

    #[test]
    fn test_insert_rejects_unknown_category() {
        let repo = repository();
        let new = NewQuestion::new("Q", "A", 9, 1).unwrap();
        match repo.insert(new) {
            Err(AppError::Validation(e)) => assert_eq!(e.field, "category"),
            other => panic!("未知分类应当校验失败: {:?}", other),
        }
        assert_eq!(repo.count().unwrap(), 2);
    }
}
