//! 会话编排控制器 - 编排层
//!
//! ## 职责
//!
//! 本模块是核心状态的唯一所有者，负责把各业务能力组合成对外操作。
//!
//! ## 核心功能
//!
//! 1. **上传登记**：上传完成后写入文件注册表
//! 2. **触发评估**：校验 → 互斥守卫 → 网关调用 → 记录结果
//! 3. **读模型**：向展示层暴露只读投影
//! 4. **错误槽位**：保存最近一次错误信息，成功动作后清空
//!
//! ## 并发设计
//!
//! 注册表与执行状态表放在同一把锁内，锁从不跨越 await 持有：
//! 校验与 pending 置位在同一次加锁内完成，随后才释放锁并等待网关，
//! 因此同一文件的两次并发触发不可能同时通过守卫。
//! 不同文件互不影响，可同时评估；控制器本身不设全局并发上限，
//! 批量场景的并发上限由 batch_processor 的信号量承担

use std::sync::{Mutex, MutexGuard};

use tracing::{error, info};

use crate::clients::WorkflowGateway;
use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{ExecutionRecord, UploadedFile};
use crate::services::{ExecutionTracker, FileRegistry};
use crate::workflow::{EvaluationFlow, FileCtx, RunOutcome};

/// 面向展示层的执行状态投影
#[derive(Debug, Clone, Default)]
pub struct ExecutionReadModel {
    /// 是否有评估在进行中
    pub pending: bool,
    /// 最近一条执行记录
    pub latest: Option<ExecutionRecord>,
}

/// 会话状态（由控制器独占持有）
#[derive(Debug, Default)]
struct SessionState {
    registry: FileRegistry,
    tracker: ExecutionTracker,
    last_error: Option<String>,
}

/// 会话编排控制器
pub struct OrchestrationController<W: WorkflowGateway> {
    session: Mutex<SessionState>,
    flow: EvaluationFlow<W>,
    credential: String,
}

impl<W: WorkflowGateway> OrchestrationController<W> {
    /// 创建新的控制器
    pub fn new(config: &Config, gateway: W) -> Self {
        Self {
            session: Mutex::new(SessionState::default()),
            flow: EvaluationFlow::new(gateway, config.user_id.clone()),
            credential: config.api_key.clone(),
        }
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().expect("会话状态锁不应中毒")
    }

    /// 上传完成回调：登记文件并清空错误槽位
    ///
    /// 不触碰执行状态表
    pub fn on_upload_completed(&self, file: UploadedFile) -> AppResult<()> {
        let mut session = self.session();
        match session.registry.register(file) {
            Ok(()) => {
                session.last_error = None;
                Ok(())
            }
            Err(e) => {
                session.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// 上传失败回调：把网关错误信息写入错误槽位
    pub fn on_upload_failed(&self, message: impl Into<String>) {
        self.session().last_error = Some(message.into());
    }

    /// 触发一次评估执行
    ///
    /// 文件标识与凭证的校验、互斥守卫的置位都发生在网关调用之前的
    /// 同一次加锁内；锁释放后才等待网关，结果回写为终态记录。
    /// 同一文件在 pending 期间的再次触发返回 `AlreadyPending`
    /// （静默拒绝，不写错误槽位）；终态之后允许再次触发，生成
    /// 新的独立记录，历史保留
    pub async fn trigger_execution(&self, file_id: &str) -> AppResult<ExecutionRecord> {
        // ========== 阶段 1: 校验 + 守卫（持锁，无 await） ==========
        let ctx = {
            let mut session = self.session();
            match Self::validate_and_begin(&mut session, &self.credential, file_id) {
                Ok(ctx) => ctx,
                Err(e) => {
                    // AlreadyPending 静默拒绝；校验错误进入错误槽位
                    if !matches!(e, AppError::Execution(_)) {
                        session.last_error = Some(e.to_string());
                    }
                    return Err(e);
                }
            }
        };

        // ========== 阶段 2: 网关调用（不持锁） ==========
        let outcome = self.flow.run(&ctx).await;

        // ========== 阶段 3: 结果回写（重新加锁） ==========
        let mut session = self.session();
        let record = match outcome {
            RunOutcome::Completed(data) => {
                session.last_error = None;
                let record = session.tracker.record_success(file_id, data)?.clone();
                info!("{} ✅ 评估成功，运行标识: {}", ctx, record.id);
                record
            }
            RunOutcome::Failed { message, payload } => {
                session.last_error = Some(message.clone());
                let record = session
                    .tracker
                    .record_failure(file_id, message.clone(), payload)?
                    .clone();
                error!("{} ❌ 评估失败: {}", ctx, message);
                record
            }
        };
        Ok(record)
    }

    /// 校验并设置互斥守卫
    fn validate_and_begin(
        session: &mut SessionState,
        credential: &str,
        file_id: &str,
    ) -> AppResult<FileCtx> {
        let file_name = match session.registry.lookup(file_id) {
            Some(file) => file.name.clone(),
            None => {
                return Err(ValidationError::UnknownFile {
                    file_id: file_id.to_string(),
                }
                .into())
            }
        };
        if credential.trim().is_empty() {
            return Err(ValidationError::MissingCredential.into());
        }
        session.tracker.begin_execution(file_id)?;
        Ok(FileCtx::new(file_id.to_string(), file_name))
    }

    /// 展示层读模型：是否进行中 + 最近一条记录
    ///
    /// 纯读取，无副作用
    pub fn read_model(&self, file_id: &str) -> ExecutionReadModel {
        let session = self.session();
        ExecutionReadModel {
            pending: session.tracker.is_pending(file_id),
            latest: session.tracker.latest_record_for(file_id).cloned(),
        }
    }

    /// 指定文件的全部执行历史（按时间先后）
    pub fn execution_history(&self, file_id: &str) -> Vec<ExecutionRecord> {
        self.session()
            .tracker
            .records_for(file_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// 已上传文件列表（最新在前）
    pub fn uploaded_files(&self) -> Vec<UploadedFile> {
        self.session().registry.files().to_vec()
    }

    /// 最近一次错误信息
    pub fn last_error(&self) -> Option<String> {
        self.session().last_error.clone()
    }
}
