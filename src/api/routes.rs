//! 路由匹配
//!
//! 把 (method, path) 解析成具体操作，可选 `/api` 前缀

use regex::Regex;
use std::fmt;

/// 已识别的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ListCategories,
    ListQuestions,
    CreateQuestion,
    DeleteQuestion(i64),
    SearchQuestions,
    QuestionsByCategory(i64),
    NextQuizQuestion,
}

/// 路由失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// 路径不存在
    NotFound { path: String },
    /// 路径存在但方法不支持
    MethodNotAllowed { method: String, path: String },
}

impl RouteError {
    pub fn status_code(&self) -> u16 {
        match self {
            RouteError::NotFound { .. } => 404,
            RouteError::MethodNotAllowed { .. } => 405,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotFound { path } => write!(f, "路径不存在: {}", path),
            RouteError::MethodNotAllowed { method, path } => {
                write!(f, "{} 不支持方法 {}", path, method)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// 路由器
pub struct Router {
    question_item: Regex,
    category_questions: Regex,
}

impl Router {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            question_item: Regex::new(r"^/questions/(-?\d+)$")?,
            category_questions: Regex::new(r"^/categories/(-?\d+)/questions$")?,
        })
    }

    /// 解析路由
    ///
    /// # 参数
    /// - `method`: HTTP 方法（不区分大小写）
    /// - `path`: 不含查询串的路径
    pub fn resolve(&self, method: &str, path: &str) -> Result<Route, RouteError> {
        let path = normalize(path);
        let method = method.to_ascii_uppercase();

        let not_allowed = || RouteError::MethodNotAllowed {
            method: method.clone(),
            path: path.to_string(),
        };

        match path {
            "/categories" => {
                return match method.as_str() {
                    "GET" => Ok(Route::ListCategories),
                    _ => Err(not_allowed()),
                }
            }
            "/questions" => {
                return match method.as_str() {
                    "GET" => Ok(Route::ListQuestions),
                    "POST" => Ok(Route::CreateQuestion),
                    _ => Err(not_allowed()),
                }
            }
            "/search/questions" => {
                return match method.as_str() {
                    "POST" => Ok(Route::SearchQuestions),
                    _ => Err(not_allowed()),
                }
            }
            "/quizzes" => {
                return match method.as_str() {
                    "POST" => Ok(Route::NextQuizQuestion),
                    _ => Err(not_allowed()),
                }
            }
            _ => {}
        }

        if let Some(id) = capture_id(&self.question_item, path) {
            return match method.as_str() {
                "DELETE" => Ok(Route::DeleteQuestion(id)),
                _ => Err(not_allowed()),
            };
        }

        if let Some(id) = capture_id(&self.category_questions, path) {
            return match method.as_str() {
                "GET" => Ok(Route::QuestionsByCategory(id)),
                _ => Err(not_allowed()),
            };
        }

        Err(RouteError::NotFound {
            path: path.to_string(),
        })
    }
}

/// 去掉 `/api` 前缀和末尾的 `/`
fn normalize(path: &str) -> &str {
    let path = match path.strip_prefix("/api") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn capture_id(re: &Regex, path: &str) -> Option<i64> {
    re.captures(path)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new().unwrap()
    }

    #[test]
    fn test_resolve_static_routes() {
        let r = router();
        assert_eq!(r.resolve("GET", "/categories"), Ok(Route::ListCategories));
        assert_eq!(r.resolve("get", "/questions"), Ok(Route::ListQuestions));
        assert_eq!(r.resolve("POST", "/questions"), Ok(Route::CreateQuestion));
        assert_eq!(r.resolve("POST", "/search/questions"), Ok(Route::SearchQuestions));
        assert_eq!(r.resolve("POST", "/quizzes/"), Ok(Route::NextQuizQuestion));
    }

    #[test]
    fn test_resolve_parameterised_routes() {
        let r = router();
        assert_eq!(r.resolve("DELETE", "/questions/12"), Ok(Route::DeleteQuestion(12)));
        assert_eq!(
            r.resolve("GET", "/api/categories/3/questions"),
            Ok(Route::QuestionsByCategory(3))
        );
    }

    #[test]
    fn test_resolve_errors() {
        let r = router();
        assert_eq!(r.resolve("GET", "/nowhere").unwrap_err().status_code(), 404);
        assert_eq!(r.resolve("GET", "/questions/abc").unwrap_err().status_code(), 404);
        assert_eq!(r.resolve("apifoo", "/apifoo").unwrap_err().status_code(), 404);
        assert_eq!(r.resolve("PUT", "/questions/1").unwrap_err().status_code(), 405);
        assert_eq!(r.resolve("DELETE", "/categories").unwrap_err().status_code(), 405);
    }
}
