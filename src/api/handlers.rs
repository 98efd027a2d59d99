//! API 处理层
//!
//! 把请求映射到分类目录 / 题目仓库 / 分页器 / 抽题器，并渲染响应体

use crate::api::payload::{error_body, LabelIndex, QuestionView};
use crate::api::request::{ApiRequest, ApiResponse};
use crate::api::routes::{Route, Router};
use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::infrastructure::TriviaStore;
use crate::models::{NewQuestion, QuizOutcome, QuizRequest};
use crate::services::{CategoryDirectory, Paginator, QuestionRepository, QuizSelector};
use serde_json::{json, Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 题库 API
///
/// 职责：
/// - 解析路由和请求体
/// - 调用业务能力完成查询 / 写入 / 抽题
/// - 把错误映射为状态码和错误响应体
pub struct TriviaApi {
    router: Router,
    directory: CategoryDirectory,
    repository: QuestionRepository,
    paginator: Paginator,
    selector: QuizSelector,
}

impl TriviaApi {
    /// 创建 API
    ///
    /// # 参数
    /// - `store`: 共享的题库存储
    /// - `config`: 页大小和抽题种子取自配置
    pub fn new(store: Arc<TriviaStore>, config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            router: Router::new()?,
            directory: CategoryDirectory::new(store.clone()),
            repository: QuestionRepository::new(store),
            paginator: Paginator::from_config(config),
            selector: QuizSelector::from_seed_option(config.quiz_seed),
        })
    }

    pub fn directory(&self) -> &CategoryDirectory {
        &self.directory
    }

    pub fn repository(&self) -> &QuestionRepository {
        &self.repository
    }

    /// 处理一次请求
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let (path, query) = request.split_target();

        let route = match self.router.resolve(&request.method, path) {
            Ok(route) => route,
            Err(e) => {
                debug!("{} {} → {}", request.method, request.path, e);
                let status = e.status_code();
                return ApiResponse::new(status, error_body(status, &e.to_string()));
            }
        };

        let result = match &route {
            Route::ListCategories => self.list_categories(),
            Route::ListQuestions => self.list_questions(query.get("page").map(String::as_str)),
            Route::CreateQuestion => self.create_question(request),
            Route::DeleteQuestion(id) => self.delete_question(*id),
            Route::SearchQuestions => self.search_questions(request),
            Route::QuestionsByCategory(id) => self.questions_by_category(*id),
            Route::NextQuizQuestion => self.next_quiz_question(request),
        };

        match result {
            Ok(response) => {
                info!("{} {} → {}", request.method, request.path, response.status);
                response
            }
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    error!("❌ {} {} → {}: {}", request.method, request.path, status, e);
                } else {
                    warn!("{} {} → {}: {}", request.method, request.path, status, e);
                }
                ApiResponse::new(status, error_body(status, &e.to_string()))
            }
        }
    }

    /// GET /categories
    fn list_categories(&self) -> AppResult<ApiResponse> {
        let categories = self.directory.list_all_labels()?;
        Ok(ApiResponse::ok(json!({
            "success": true,
            "categories": categories,
        })))
    }

    /// GET /questions?page=N
    fn list_questions(&self, page: Option<&str>) -> AppResult<ApiResponse> {
        let page_number = match page {
            None => None,
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
                ValidationError::malformed("page", format!("页码不是整数: '{}'", raw))
            })?),
        };

        let questions = self.repository.list_all()?;
        let page_questions = self.paginator.page(&questions, page_number)?;
        let labels = LabelIndex::new(&self.directory.list_all()?);

        Ok(ApiResponse::ok(json!({
            "success": true,
            "questions": labels.views(&page_questions),
            "total_questions": questions.len(),
            "categories": self.directory.list_all_labels()?,
            "current_category": JsonValue::Null,
        })))
    }

    /// DELETE /questions/{id}
    fn delete_question(&self, id: i64) -> AppResult<ApiResponse> {
        if !self.repository.exists(id)? {
            return Err(AppError::question_not_found(id));
        }
        // 与并发删除竞争时，这里同样返回 NotFound
        self.repository.delete_by_id(id)?;

        Ok(ApiResponse::ok(json!({
            "success": true,
            "deleted_question_id": id,
        })))
    }

    /// POST /questions
    fn create_question(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let body = json_object(request)?;

        let text = required_string(body, "question")?;
        let answer = required_string(body, "answer")?;
        let category_id = required_integer(body, "category")?;
        let difficulty = required_integer(body, "difficulty")?;

        let new = NewQuestion::new(text, answer, category_id, difficulty)?;
        let created = self.repository.insert(new)?;

        Ok(ApiResponse::new(
            201,
            json!({
                "success": true,
                "created_question_id": created.id,
            }),
        ))
    }

    /// POST /search/questions
    fn search_questions(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let body = json_object(request)?;
        let term = required_string(body, "searchTerm")?;

        let questions = self.repository.search_by_text(&term)?;
        let labels = LabelIndex::new(&self.directory.list_all()?);

        Ok(ApiResponse::ok(json!({
            "success": true,
            "questions": labels.views(&questions),
            "total_questions": questions.len(),
            "current_category": JsonValue::Null,
        })))
    }

    /// GET /categories/{id}/questions
    fn questions_by_category(&self, category_id: i64) -> AppResult<ApiResponse> {
        let Some(label) = self.directory.resolve_label(category_id)? else {
            return Err(ValidationError::malformed(
                "category",
                format!("分类 {} 不存在", category_id),
            )
            .into());
        };

        let questions = self.repository.filter_by_category(category_id)?;
        let labels = LabelIndex::new(&self.directory.list_all()?);

        Ok(ApiResponse::ok(json!({
            "success": true,
            "questions": labels.views(&questions),
            "total_questions": questions.len(),
            "current_category": label,
        })))
    }

    /// POST /quizzes
    fn next_quiz_question(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let body = json_object(request)?;
        let quiz_request = QuizRequest::new(
            previous_question_ids(body)?,
            self.resolve_quiz_category(body.get("quiz_category"))?,
        );

        match self.selector.next_question(&self.repository, &quiz_request)? {
            QuizOutcome::Question(question) => {
                let label = self.directory.resolve_label(question.category_id)?;
                let view = QuestionView::new(&question, label);
                Ok(ApiResponse::ok(json!({
                    "success": true,
                    "question": view,
                })))
            }
            QuizOutcome::Exhausted => {
                let asked = quiz_request.previous_question_ids.len();
                info!("测验已完成: 共出过 {} 道题", asked);
                Ok(ApiResponse::ok(json!({ "success": true })))
            }
        }
    }

    /// 解析 `quiz_category`
    ///
    /// 支持 `null`、分类名、分类 id，以及前端的 `{ id, type }` 对象
    /// （id 为 0 表示全部分类）
    fn resolve_quiz_category(&self, value: Option<&JsonValue>) -> AppResult<Option<i64>> {
        match value {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::String(label)) => self.category_id_by_label(label).map(Some),
            Some(JsonValue::Number(n)) => {
                let id = n.as_i64().ok_or_else(|| {
                    let detail = format!("分类 id 不合法: {}", n);
                    ValidationError::malformed("quiz_category", detail)
                })?;
                self.category_id_checked(id)
            }
            Some(JsonValue::Object(obj)) => match obj.get("id").and_then(JsonValue::as_i64) {
                Some(id) => self.category_id_checked(id),
                None => match obj.get("type").and_then(JsonValue::as_str) {
                    Some(label) => self.category_id_by_label(label).map(Some),
                    None => Ok(None),
                },
            },
            Some(other) => Err(AppError::unsupported_media(format!(
                "quiz_category 格式不正确: {}",
                other
            ))),
        }
    }

    fn category_id_by_label(&self, label: &str) -> AppResult<i64> {
        self.directory.resolve_id_by_label(label)?.ok_or_else(|| {
            let detail = format!("分类 '{}' 不存在", label);
            ValidationError::malformed("quiz_category", detail).into()
        })
    }

    fn category_id_checked(&self, id: i64) -> AppResult<Option<i64>> {
        if id == 0 {
            return Ok(None);
        }
        if !self.directory.exists(id)? {
            let detail = format!("分类 {} 不存在", id);
            return Err(ValidationError::malformed("quiz_category", detail).into());
        }
        Ok(Some(id))
    }
}

// ========== 请求体解析 ==========

/// 请求体必须是 JSON 对象
fn json_object(request: &ApiRequest) -> AppResult<&Map<String, JsonValue>> {
    if !request.is_json() {
        return Err(AppError::unsupported_media(format!(
            "请求体必须为 application/json，实际为 {}",
            request.content_type.as_deref().unwrap_or("")
        )));
    }
    match &request.body {
        Some(JsonValue::Object(obj)) => Ok(obj),
        Some(_) => Err(AppError::unsupported_media("请求体必须为 JSON 对象")),
        None => Err(AppError::unsupported_media("缺少 JSON 请求体")),
    }
}

fn required_string(body: &Map<String, JsonValue>, field: &str) -> AppResult<String> {
    match body.get(field) {
        None | Some(JsonValue::Null) => Err(ValidationError::missing(field).into()),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(other) => {
            let detail = format!("应为字符串: {}", other);
            Err(ValidationError::invalid(field, detail).into())
        }
    }
}

/// 整数字段，也接受数字字符串（前端下拉框提交的是字符串）
fn required_integer(body: &Map<String, JsonValue>, field: &str) -> AppResult<i64> {
    let invalid = |v: &JsonValue| -> AppError {
        ValidationError::invalid(field, format!("应为整数: {}", v)).into()
    };
    match body.get(field) {
        None | Some(JsonValue::Null) => Err(ValidationError::missing(field).into()),
        Some(v) => match v {
            JsonValue::Number(n) => n.as_i64().ok_or_else(|| invalid(v)),
            JsonValue::String(s) => s.trim().parse().map_err(|_| invalid(v)),
            _ => Err(invalid(v)),
        },
    }
}

/// `previous_questions` 缺省视为空列表，元素必须为整数
fn previous_question_ids(body: &Map<String, JsonValue>) -> AppResult<Vec<i64>> {
    match body.get("previous_questions") {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_i64().ok_or_else(|| {
                    let detail = format!("previous_questions 含非整数元素: {}", item);
                    AppError::unsupported_media(detail)
                })
            })
            .collect(),
        Some(other) => Err(AppError::unsupported_media(format!(
            "previous_questions 应为数组: {}",
            other
        ))),
    }
}
