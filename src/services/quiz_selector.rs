//! 抽题器 - 业务能力层
//!
//! 只负责"从候选池中抽一道没出过的题"，不保存会话状态

use crate::error::AppResult;
use crate::models::{Question, QuizOutcome, QuizRequest};
use crate::services::question_repository::QuestionRepository;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

/// 从候选池中均匀随机抽取一道未出过的题目
///
/// 先算出未出过的子集再抽取，子集为空即为 `Exhausted`。
/// 不在候选池中的历史 id 会被忽略。
pub fn select_unseen<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[Question],
    previous_question_ids: &HashSet<i64>,
) -> QuizOutcome {
    let unseen: Vec<&Question> = pool
        .iter()
        .filter(|q| !previous_question_ids.contains(&q.id))
        .collect();

    match unseen.choose(rng) {
        Some(question) => QuizOutcome::Question((*question).clone()),
        None => QuizOutcome::Exhausted,
    }
}

/// 抽题器
///
/// 职责：
/// - 根据分类过滤出候选池
/// - 排除已出过的题目后随机抽取
/// - 每次调用互相独立，历史由调用方提供
pub struct QuizSelector {
    rng: Mutex<StdRng>,
}

impl QuizSelector {
    /// 使用系统熵创建
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 使用固定种子创建（结果可复现）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_default()
    }

    /// 在给定候选池上抽题
    pub fn select(&self, pool: &[Question], previous_question_ids: &HashSet<i64>) -> QuizOutcome {
        // rng 状态不会因 panic 而失效，锁污染时直接沿用
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        select_unseen(&mut *rng, pool, previous_question_ids)
    }

    /// 处理一次抽题请求
    ///
    /// # 参数
    /// - `repository`: 题目仓库，用于确定候选池
    /// - `request`: 已出过的题目 id 与可选的分类过滤
    pub fn next_question(
        &self,
        repository: &QuestionRepository,
        request: &QuizRequest,
    ) -> AppResult<QuizOutcome> {
        let pool = match request.category_filter {
            Some(category_id) => repository.filter_by_category(category_id)?,
            None => repository.list_all()?,
        };

        let outcome = self.select(&pool, &request.previous_question_ids);
        match &outcome {
            QuizOutcome::Question(q) => debug!(
                "抽题: 候选 {} 道，已出 {} 道，选中 #{}",
                pool.len(),
                request.previous_question_ids.len(),
                q.id
            ),
            QuizOutcome::Exhausted => debug!("抽题: 候选 {} 道已全部出过", pool.len()),
        }

        Ok(outcome)
    }
}

impl Default for QuizSelector {
    fn default() -> Self {
        Self::new()
    }
}
