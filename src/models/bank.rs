use crate::error::ValidationError;
use crate::models::category::Category;
use crate::models::question::Question;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 题库文件的整体结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaBank {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl TriviaBank {
    /// 校验 id 唯一性
    ///
    /// 题目引用不存在的分类不视为错误，展示时分类名解析为空
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id) {
                return Err(ValidationError::invalid(
                    "categories",
                    format!("分类 id {} 重复", category.id),
                ));
            }
            if category.label.trim().is_empty() {
                return Err(ValidationError::invalid(
                    "categories",
                    format!("分类 #{} 名称为空", category.id),
                ));
            }
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(ValidationError::invalid(
                    "questions",
                    format!("题目 id {} 重复", question.id),
                ));
            }
        }

        Ok(())
    }

    /// 引用了不存在分类的题目 id
    pub fn dangling_question_ids(&self) -> Vec<i64> {
        let known: HashSet<i64> = self.categories.iter().map(|c| c.id).collect();
        self.questions
            .iter()
            .filter(|q| !known.contains(&q.category_id))
            .map(|q| q.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, category_id: i64) -> Question {
        Question {
            id,
            text: format!("Question {}", id),
            answer: "A".to_string(),
            category_id,
            difficulty: 1,
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_question_ids() {
        let bank = TriviaBank {
            categories: vec![Category::new(1, "Science").unwrap()],
            questions: vec![question(1, 1), question(1, 1)],
        };
        assert_eq!(bank.validate().unwrap_err().field, "questions");
    }

    #[test]
    fn test_dangling_questions_are_reported_not_rejected() {
        let bank = TriviaBank {
            categories: vec![Category::new(1, "Science").unwrap()],
            questions: vec![question(1, 1), question(2, 9)],
        };
        assert!(bank.validate().is_ok());
        assert_eq!(bank.dangling_question_ids(), vec![2]);
    }
}
