//! 请求 / 响应结构
//!
//! 与传输层无关：调用方负责把 HTTP（或其它载体）转换成这里的结构

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// 一次 API 请求
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRequest {
    /// HTTP 方法，如 `GET` / `POST`
    pub method: String,
    /// 路径，可带查询串，如 `/questions?page=2`
    pub path: String,
    /// 请求体编码，为空时按 JSON 处理
    #[serde(default)]
    pub content_type: Option<String>,
    /// 请求体
    #[serde(default)]
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new("DELETE", path)
    }

    /// 带 JSON 请求体的 POST
    pub fn post_json(path: impl Into<String>, body: JsonValue) -> Self {
        Self {
            content_type: Some("application/json".to_string()),
            body: Some(body),
            ..Self::new("POST", path)
        }
    }

    /// 设置请求体编码
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// 拆分路径与查询串
    pub fn split_target(&self) -> (&str, HashMap<String, String>) {
        match self.path.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (self.path.as_str(), HashMap::new()),
        }
    }

    /// 请求体是否声明为 JSON
    pub fn is_json(&self) -> bool {
        match &self.content_type {
            None => true,
            Some(ct) => ct
                .split(';')
                .next()
                .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
                .unwrap_or(false),
        }
    }
}

/// 解析查询串，重复的键以第一次出现为准
fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }
    params
}

/// 一次 API 响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: JsonValue,
}

impl ApiResponse {
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self { status, body }
    }

    pub fn ok(body: JsonValue) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_target_with_query() {
        let req = ApiRequest::get("/questions?page=2&page=3&flag");
        let (path, query) = req.split_target();
        assert_eq!(path, "/questions");
        assert_eq!(query.get("page").map(String::as_str), Some("2"));
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_is_json() {
        assert!(ApiRequest::get("/").is_json());
        assert!(ApiRequest::get("/")
            .with_content_type("application/json; charset=utf-8")
            .is_json());
        assert!(!ApiRequest::get("/").with_content_type("text/plain").is_json());
    }

    #[test]
    fn test_deserialize_request_line() {
        let line = r#"{"method":"POST","path":"/quizzes","body":{"previous_questions":[1]}}"#;
        let req: ApiRequest = serde_json::from_str(line).unwrap();
        assert_eq!(req.method, "POST");
        assert!(req.content_type.is_none());
        assert!(req.body.is_some());
    }
}
