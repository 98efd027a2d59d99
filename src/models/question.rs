use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 已入库的题目
///
/// 题库文件中的字段名与原数据表一致：`question` / `category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "question")]
    pub text: String,
    pub answer: String,
    #[serde(rename = "category")]
    pub category_id: i64,
    pub difficulty: i64,
}

impl Question {
    /// 用新分配的 id 落地一条待创建的题目
    pub fn from_new(id: i64, new: NewQuestion) -> Self {
        Self {
            id,
            text: new.text,
            answer: new.answer,
            category_id: new.category_id,
            difficulty: new.difficulty,
        }
    }

    /// 题干是否包含关键词（忽略大小写）
    ///
    /// `needle_lower` 须已转为小写
    pub fn text_contains(&self, needle_lower: &str) -> bool {
        self.text.to_lowercase().contains(needle_lower)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview = if self.text.chars().count() > 60 {
            self.text.chars().take(60).collect::<String>() + "..."
        } else {
            self.text.clone()
        };
        write!(f, "#{} {} [分类 {}]", self.id, preview, self.category_id)
    }
}

/// 待创建的题目（尚未分配 id）
///
/// 只能通过 [`NewQuestion::new`] 构造，保证字段合法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    text: String,
    answer: String,
    category_id: i64,
    difficulty: i64,
}

impl NewQuestion {
    /// 校验并创建
    ///
    /// # 参数
    /// - `text`: 题干，不能为空
    /// - `answer`: 答案，不能为空
    /// - `category_id`: 分类 id，必须为正数
    /// - `difficulty`: 难度，必须为正数
    pub fn new(
        text: impl Into<String>,
        answer: impl Into<String>,
        category_id: i64,
        difficulty: i64,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        let answer = answer.into();

        if text.trim().is_empty() {
            return Err(ValidationError::invalid("question", "题干不能为空"));
        }
        if answer.trim().is_empty() {
            return Err(ValidationError::invalid("answer", "答案不能为空"));
        }
        if category_id <= 0 {
            return Err(ValidationError::invalid("category", "分类 id 必须为正整数"));
        }
        if difficulty <= 0 {
            return Err(ValidationError::invalid("difficulty", "难度必须为正整数"));
        }

        Ok(Self {
            text,
            answer,
            category_id,
            difficulty,
        })
    }

    pub fn category_id(&self) -> i64 {
        self.category_id
    }
}
