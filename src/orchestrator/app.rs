//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息、加载题库、创建存储与 API
//! 2. **请求循环**：逐行读取 JSON 请求，逐行写出 JSON 响应
//! 3. **全局统计**：汇总处理的请求数和失败数
//!
//! 每行请求形如 `{"method":"GET","path":"/questions?page=1"}`，
//! 可带 `content_type` 和 `body`。

use crate::api::payload::error_body;
use crate::api::{ApiRequest, ApiResponse, TriviaApi};
use crate::config::Config;
use crate::infrastructure::TriviaStore;
use crate::models::load_or_init_trivia_bank;
use crate::utils::logging::{log_bank_loaded, log_startup, print_final_stats, truncate_text};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// 请求处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeStats {
    pub handled: usize,
    pub failed: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<TriviaStore>,
    api: Arc<TriviaApi>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let data_path = Path::new(&config.data_file);
        let bank = load_or_init_trivia_bank(data_path).await?;
        log_bank_loaded(&bank);

        let store = if config.persist_writes {
            TriviaStore::with_persistence(bank, data_path)
        } else {
            TriviaStore::new(bank)
        };
        let store = Arc::new(store);

        let api = Arc::new(TriviaApi::new(store.clone(), &config).context("无法创建 API")?);

        Ok(Self { config, store, api })
    }

    pub fn api(&self) -> &TriviaApi {
        &self.api
    }

    pub fn store(&self) -> &Arc<TriviaStore> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 从 stdin 读取请求，向 stdout 写出响应，直到输入结束
    pub async fn run(&self) -> Result<()> {
        info!("📨 开始从标准输入读取请求（每行一个 JSON）");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        let stats = self.serve(stdin, stdout).await?;

        print_final_stats(stats.handled, stats.failed);
        Ok(())
    }

    /// 处理请求流
    ///
    /// 请求在阻塞线程池中处理（回写题库是同步文件 IO）。
    /// 无法解码的行（非 UTF-8 或非 JSON）返回 400，循环继续。
    ///
    /// # 参数
    /// - `reader`: 每行一个 JSON 请求
    /// - `writer`: 每行写出一个 JSON 响应
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<ServeStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = ServeStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("读取请求失败")?;
            if read == 0 {
                break;
            }

            let response = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let api = Arc::clone(&self.api);
                    tokio::task::spawn_blocking(move || handle_request_line(&api, line.trim()))
                        .await
                        .context("请求处理任务失败")?
                }
                Err(e) => {
                    warn!("⚠️ 请求行不是合法的 UTF-8: {}", e);
                    let message = format!("请求行不是合法的 UTF-8: {}", e);
                    ApiResponse::new(400, error_body(400, &message))
                }
            };

            stats.handled += 1;
            if !response.is_success() {
                stats.failed += 1;
            }

            let mut out = serde_json::to_vec(&response).context("无法序列化响应")?;
            out.push(b'\n');
            writer.write_all(&out).await.context("写出响应失败")?;
            writer.flush().await.context("写出响应失败")?;
        }

        Ok(stats)
    }

    /// 处理单行请求
    pub fn handle_line(&self, raw: &str) -> ApiResponse {
        handle_request_line(&self.api, raw)
    }
}

/// 解析并处理单行请求，无法解析时返回 400
fn handle_request_line(api: &TriviaApi, raw: &str) -> ApiResponse {
    match serde_json::from_str::<ApiRequest>(raw) {
        Ok(request) => {
            debug!("收到请求: {}", truncate_text(raw, 120));
            api.handle(&request)
        }
        Err(e) => {
            warn!("⚠️ 无法解析请求行: {} ({})", truncate_text(raw, 80), e);
            ApiResponse::new(400, error_body(400, &format!("无法解析请求: {}", e)))
        }
    }
}
