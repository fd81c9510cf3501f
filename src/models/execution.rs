//! 执行记录模型

use serde::Serialize;

use crate::models::response::WorkflowRunData;

/// 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// 评估在进行中
    Running,
    /// 评估成功完成
    Completed,
    /// 评估失败
    Failed,
}

impl ExecutionStatus {
    /// 是否已到达终态
    pub fn is_terminal(self) -> bool {
        !matches!(self, ExecutionStatus::Running)
    }
}

/// 一次评估执行的记录
///
/// 触发执行时以 `Running` 创建，恰好转移一次到终态，之后不再变更；
/// 重新执行会追加新记录，历史记录永不覆盖
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    /// 记录标识：成功时为远程服务分配的运行标识，失败时为本地合成标识
    pub id: String,
    /// 关联的文件标识
    pub file_id: String,
    /// 当前状态
    pub status: ExecutionStatus,
    /// 评估结果载荷（完成时存在；非成功状态返回的载荷同样保留以供展示）
    pub payload: Option<WorkflowRunData>,
    /// 失败原因（失败时存在）
    pub error_message: Option<String>,
    /// 开始时间（epoch 秒）
    pub started_at: i64,
}

impl ExecutionRecord {
    /// 创建一条进行中的记录
    pub fn running(id: String, file_id: String) -> Self {
        Self {
            id,
            file_id,
            status: ExecutionStatus::Running,
            payload: None,
            error_message: None,
            started_at: chrono::Utc::now().timestamp(),
        }
    }
}
