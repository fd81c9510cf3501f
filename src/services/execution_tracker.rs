//! 执行状态追踪 - 业务能力层
//!
//! 只负责"每个文件的执行状态机"能力，不关心流程
//!
//! ## 状态机
//!
//! ```text
//! idle ──begin_execution──▶ pending ──record_success──▶ succeeded ─┐
//!                              │                                   │
//!                              └────record_failure──▶ failed ──────┤
//!                                                                  │
//!            （终态后允许再次 begin_execution，追加新记录）◀────────┘
//! ```
//!
//! pending 期间对同一文件再次 begin 会被拒绝（互斥守卫）；
//! 终态记录保留在历史中，重新执行追加新记录，永不覆盖

use std::collections::HashMap;

use crate::error::ExecutionError;
use crate::models::execution::{ExecutionRecord, ExecutionStatus};
use crate::models::response::WorkflowRunData;

/// 单个文件的执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileExecState {
    /// 有评估在进行中
    Pending,
    /// 最近一次评估成功
    Succeeded,
    /// 最近一次评估失败
    Failed,
}

/// 执行状态追踪器
///
/// 职责：
/// - 维护文件标识 → 执行状态的键控状态表（互斥不变量的载体）
/// - 维护只追加的执行记录历史
/// - 不发起任何网关调用
/// - 不关心流程顺序
#[derive(Debug, Default)]
pub struct ExecutionTracker {
    states: HashMap<String, FileExecState>,
    history: Vec<ExecutionRecord>,
    local_seq: u64,
}

impl ExecutionTracker {
    /// 创建空的追踪器
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次执行（idle → pending）
    ///
    /// 同一文件已处于 pending 时拒绝，这是唯一的并发控制点：
    /// 检查与置位在同一次调用内同步完成，调用方必须在任何挂起点之前调用
    pub fn begin_execution(&mut self, file_id: &str) -> Result<(), ExecutionError> {
        if matches!(self.states.get(file_id), Some(FileExecState::Pending)) {
            return Err(ExecutionError::AlreadyPending {
                file_id: file_id.to_string(),
            });
        }
        self.local_seq += 1;
        let record = ExecutionRecord::running(
            format!("local-{}", self.local_seq),
            file_id.to_string(),
        );
        self.states.insert(file_id.to_string(), FileExecState::Pending);
        self.history.push(record);
        Ok(())
    }

    /// 记录执行成功（pending → succeeded）
    ///
    /// 进行中的记录取远程运行标识并附上载荷，转为终态后不再变更
    pub fn record_success(
        &mut self,
        file_id: &str,
        payload: WorkflowRunData,
    ) -> Result<&ExecutionRecord, ExecutionError> {
        if !matches!(self.states.get(file_id), Some(FileExecState::Pending)) {
            return Err(ExecutionError::NotPending {
                file_id: file_id.to_string(),
            });
        }
        let record = Self::running_record(&mut self.history, file_id)?;
        if !payload.id.is_empty() {
            record.id = payload.id.clone();
        }
        record.status = ExecutionStatus::Completed;
        record.payload = Some(payload);
        self.states.insert(file_id.to_string(), FileExecState::Succeeded);
        Ok(record)
    }

    /// 记录执行失败（pending → failed）
    ///
    /// 记录保留本地合成标识；服务有返回载荷时一并附上（供详情展示）
    pub fn record_failure(
        &mut self,
        file_id: &str,
        error_message: String,
        payload: Option<WorkflowRunData>,
    ) -> Result<&ExecutionRecord, ExecutionError> {
        if !matches!(self.states.get(file_id), Some(FileExecState::Pending)) {
            return Err(ExecutionError::NotPending {
                file_id: file_id.to_string(),
            });
        }
        let record = Self::running_record(&mut self.history, file_id)?;
        record.status = ExecutionStatus::Failed;
        record.error_message = Some(error_message);
        record.payload = payload;
        self.states.insert(file_id.to_string(), FileExecState::Failed);
        Ok(record)
    }

    /// 指定文件是否有评估在进行中
    pub fn is_pending(&self, file_id: &str) -> bool {
        matches!(self.states.get(file_id), Some(FileExecState::Pending))
    }

    /// 指定文件的当前状态（从未执行过返回 `None`）
    pub fn state_of(&self, file_id: &str) -> Option<FileExecState> {
        self.states.get(file_id).copied()
    }

    /// 最近一条执行记录
    pub fn latest_record_for(&self, file_id: &str) -> Option<&ExecutionRecord> {
        self.history.iter().rev().find(|r| r.file_id == file_id)
    }

    /// 指定文件的全部执行历史（按时间先后）
    pub fn records_for(&self, file_id: &str) -> Vec<&ExecutionRecord> {
        self.history.iter().filter(|r| r.file_id == file_id).collect()
    }

    /// 历史记录总数
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 找到指定文件当前进行中的记录
    fn running_record<'a>(
        history: &'a mut [ExecutionRecord],
        file_id: &str,
    ) -> Result<&'a mut ExecutionRecord, ExecutionError> {
        history
            .iter_mut()
            .rev()
            .find(|r| r.file_id == file_id && r.status == ExecutionStatus::Running)
            .ok_or_else(|| ExecutionError::NotPending {
                file_id: file_id.to_string(),
            })
    }
}
