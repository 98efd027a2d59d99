use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 题目分类
///
/// 由外部预置，核心逻辑只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// 分类名称（题库文件中沿用 `type` 字段名）
    #[serde(rename = "type")]
    pub label: String,
}

impl Category {
    /// 创建分类，名称不能为空
    pub fn new(id: i64, label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::invalid("type", "分类名称不能为空"));
        }
        Ok(Self { id, label })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.label, self.id)
    }
}
