//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的上传与评估调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：构建 HTTP 客户端与会话控制器
//! 2. **批量加载**：扫描目录下允许类型的文档
//! 3. **并发控制**：使用 Semaphore 限制同时评估的文档数量
//! 4. **向下委托**：单个文档的评估委托给会话控制器
//! 5. **全局统计**：汇总所有文档的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单次评估的细节
//! - **单文件失败隔离**：一个文档失败不影响其余文档
//! - **并发安全**：通过 Semaphore 和 tokio::spawn 实现并发

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::clients::{UploadClient, UploadGateway, WorkflowClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::file;
use crate::models::{ComplianceStatus, ExecutionRecord, ExecutionStatus};
use crate::orchestrator::controller::OrchestrationController;
use crate::services::aggregate_compliance;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    controller: Arc<OrchestrationController<WorkflowClient>>,
    uploader: UploadClient,
}

/// 批量处理统计
#[derive(Debug, Default)]
struct BatchStats {
    success: usize,
    failed: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        let uploader = UploadClient::new(&config)?;
        let workflow = WorkflowClient::new(&config)?;
        let controller = Arc::new(OrchestrationController::new(&config, workflow));

        Ok(Self {
            config,
            controller,
            uploader,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        logging::log_startup(self.config.max_concurrent_files);

        // 加载所有待评估的文档
        let documents = self.load_documents().await?;

        if documents.is_empty() {
            warn!("⚠️ 没有找到待评估的文档，程序结束");
            return Ok(());
        }

        let total = documents.len();
        logging::log_documents_found(total, self.config.max_concurrent_files);

        // 处理所有文档
        let stats = self.process_all(documents).await?;

        // 输出最终统计
        logging::print_final_stats(stats.success, stats.failed, total);

        Ok(())
    }

    /// 扫描目录，读取允许类型的文档
    async fn load_documents(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let folder = &self.config.docs_folder;
        info!("\n📁 正在扫描待评估的文档: {}", folder);

        let mut documents = Vec::new();
        let mut entries = tokio::fs::read_dir(folder)
            .await
            .with_context(|| format!("无法读取文档目录: {}", folder))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(String::from)
            else {
                continue;
            };
            match file::extension_of(&file_name) {
                Some(ext) if file::is_allowed_extension(&ext) => {
                    match tokio::fs::read(&path).await {
                        Ok(bytes) => {
                            info!("正在加载: {} ({} 字节)", file_name, bytes.len());
                            documents.push((file_name, bytes));
                        }
                        Err(e) => warn!("读取文件失败 {}: {}", path.display(), e),
                    }
                }
                _ => debug!("跳过不支持的文件: {}", file_name),
            }
        }

        Ok(documents)
    }

    /// 并发处理全部文档
    async fn process_all(&self, documents: Vec<(String, Vec<u8>)>) -> Result<BatchStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files));
        let mut handles = Vec::new();

        for (idx, (file_name, bytes)) in documents.into_iter().enumerate() {
            let file_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let uploader = self.uploader.clone();
            let controller = self.controller.clone();
            let user_id = self.config.user_id.clone();
            let verbose = self.config.verbose_logging;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                process_document(
                    &uploader,
                    &controller,
                    file_index,
                    &file_name,
                    bytes,
                    &user_id,
                    verbose,
                )
                .await
            });
            handles.push((file_index, handle));
        }

        // 等待所有任务完成
        let mut stats = BatchStats::default();
        for (file_index, handle) in handles {
            match handle.await {
                Ok(Ok(true)) => stats.success += 1,
                Ok(Ok(false)) => stats.failed += 1,
                Ok(Err(e)) => {
                    error!("[文档 {}] ❌ 处理过程中发生错误: {}", file_index, e);
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", file_index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 处理单个文档：上传 → 登记 → 触发评估 → 输出汇总
///
/// # 返回
/// 返回评估是否成功（上传失败、评估失败都算 false，不向上传播）
async fn process_document(
    uploader: &UploadClient,
    controller: &OrchestrationController<WorkflowClient>,
    file_index: usize,
    file_name: &str,
    bytes: Vec<u8>,
    user_id: &str,
    verbose: bool,
) -> Result<bool> {
    info!("\n[文档 {}] {}", file_index, "─".repeat(30));
    info!("[文档 {}] 开始处理: {}", file_index, file_name);

    // 上传
    let uploaded = match uploader.upload(file_name, bytes, user_id).await {
        Ok(uploaded) => uploaded,
        Err(e) => {
            controller.on_upload_failed(e.to_string());
            error!("[文档 {}] ❌ 上传失败: {}", file_index, e);
            return Ok(false);
        }
    };
    info!("[文档 {}] ✓ 上传成功，文件标识: {}", file_index, uploaded.id);

    // 登记
    let file_id = uploaded.id.clone();
    controller.on_upload_completed(uploaded)?;

    // 触发评估（失败结果也会作为终态记录返回）
    let record = match controller.trigger_execution(&file_id).await {
        Ok(record) => record,
        Err(e) => {
            error!("[文档 {}] ❌ 评估触发失败: {}", file_index, e);
            return Ok(false);
        }
    };

    match record.status {
        ExecutionStatus::Completed => {
            log_summary(file_index, &record, verbose);
            Ok(true)
        }
        _ => {
            warn!(
                "[文档 {}] ⚠️ 评估未成功: {}（可重新触发）",
                file_index,
                record.error_message.as_deref().unwrap_or("未知原因")
            );
            Ok(false)
        }
    }
}

/// 输出单个文档的合规汇总
fn log_summary(file_index: usize, record: &ExecutionRecord, verbose: bool) {
    let Some(payload) = record.payload.as_ref() else {
        return;
    };
    let judgement = payload.judgement();
    let summary = aggregate_compliance(judgement);

    info!(
        "[文档 {}] ✅ 评估完成: {} 条判定, 耗时 {:.2}s, {} tokens, {} 步",
        file_index,
        summary.total(),
        payload.elapsed_time,
        payload.total_tokens,
        payload.total_steps
    );
    for (symbol, count) in summary.counts() {
        info!(
            "[文档 {}]   {} {}: {} 条 ({}%)",
            file_index,
            symbol,
            ComplianceStatus::from_symbol(symbol).label(),
            count,
            summary.percentage(symbol)
        );
    }

    // 详细日志（如果启用）：逐条输出判定理由
    if verbose {
        for (i, item) in judgement.iter().enumerate() {
            info!(
                "[文档 {}]   {}. [{}] {}",
                file_index,
                i + 1,
                item.assessment.compliance_status,
                logging::truncate_text(&item.original_item, 40)
            );
            info!(
                "[文档 {}]      理由: {}",
                file_index,
                logging::truncate_text(&item.assessment.reasoning, 80)
            );
        }
    }
}
