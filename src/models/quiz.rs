use crate::models::question::Question;
use std::collections::HashSet;

/// 一次抽题请求携带的会话状态
///
/// 由调用方每次完整提供，服务端不保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    /// 已出过的题目 id
    pub previous_question_ids: HashSet<i64>,
    /// 限定分类（为空表示全部分类）
    pub category_filter: Option<i64>,
}

impl QuizRequest {
    pub fn new(previous: impl IntoIterator<Item = i64>, category_filter: Option<i64>) -> Self {
        Self {
            previous_question_ids: previous.into_iter().collect(),
            category_filter,
        }
    }
}

/// 抽题结果
///
/// `Exhausted` 表示本轮测验已无未出过的题目，是正常结束而不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Question(Question),
    Exhausted,
}

impl QuizOutcome {
    pub fn question(&self) -> Option<&Question> {
        match self {
            QuizOutcome::Question(q) => Some(q),
            QuizOutcome::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuizOutcome::Exhausted)
    }
}
