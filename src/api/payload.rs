//! 响应体构造

use crate::models::{Category, Question};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;

/// 状态码对应的错误描述
static REASON_PHRASES: phf::Map<u16, &'static str> = phf::phf_map! {
    400u16 => "bad request",
    404u16 => "resource not found",
    405u16 => "method not allowed",
    415u16 => "unsupported media type",
    422u16 => "unprocessable",
    500u16 => "internal server error",
};

pub fn reason_phrase(status: u16) -> &'static str {
    REASON_PHRASES.get(&status).copied().unwrap_or("error")
}

/// 错误响应体：`{ success: false, error, code }`
///
/// `error` 为状态描述加具体原因，如 `resource not found: 记录不存在: question #3`
pub fn error_body(status: u16, message: &str) -> JsonValue {
    json!({
        "success": false,
        "error": format!("{}: {}", reason_phrase(status), message),
        "code": status,
    })
}

/// 对外展示的题目：分类总是解析为分类名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// 分类不存在时为 `null`
    pub category: Option<String>,
    pub difficulty: i64,
}

impl QuestionView {
    pub fn new(question: &Question, category_label: Option<String>) -> Self {
        Self {
            id: question.id,
            question: question.text.clone(),
            answer: question.answer.clone(),
            category: category_label,
            difficulty: question.difficulty,
        }
    }
}

/// 分类 id → 分类名，同一 id 以第一次出现为准
pub struct LabelIndex(HashMap<i64, String>);

impl LabelIndex {
    pub fn new(categories: &[Category]) -> Self {
        let mut map = HashMap::with_capacity(categories.len());
        for category in categories {
            map.entry(category.id)
                .or_insert_with(|| category.label.clone());
        }
        Self(map)
    }

    pub fn label(&self, category_id: i64) -> Option<String> {
        self.0.get(&category_id).cloned()
    }

    pub fn view(&self, question: &Question) -> QuestionView {
        QuestionView::new(question, self.label(question.category_id))
    }

    pub fn views(&self, questions: &[Question]) -> Vec<QuestionView> {
        questions.iter().map(|q| self.view(q)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_resolves_label_or_null() {
        let index = LabelIndex::new(&[Category::new(1, "Science").unwrap()]);
        let mut question = Question {
            id: 1,
            text: "What is the answer to everything".to_string(),
            answer: "42".to_string(),
            category_id: 1,
            difficulty: 3,
        };

        let view = serde_json::to_value(index.view(&question)).unwrap();
        assert_eq!(
            view,
            json!({
                "id": 1,
                "question": "What is the answer to everything",
                "answer": "42",
                "category": "Science",
                "difficulty": 3,
            })
        );

        question.category_id = 8;
        assert_eq!(index.view(&question).category, None);
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_body(404, "记录不存在: question #3");
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "resource not found: 记录不存在: question #3",
                "code": 404,
            })
        );
        assert_eq!(reason_phrase(418), "error");
    }
}
