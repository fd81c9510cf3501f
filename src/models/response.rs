//! 远程评估服务的响应数据结构
//!
//! 只建模核心需要读取的字段，其余字段忽略

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::assessment::ComplianceAssessment;

/// 文件上传接口的成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// 文件标识（缺失视为不合格响应）
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// 文件大小（字节），为 0 视为不合格响应
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: i64,
}

/// 工作流运行状态符号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Succeeded,
    Failed,
    Running,
    Stopped,
}

impl WorkflowStatus {
    /// 是否为明确成功
    pub fn is_succeeded(self) -> bool {
        matches!(self, WorkflowStatus::Succeeded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStatus::Succeeded => "succeeded",
            WorkflowStatus::Failed => "failed",
            WorkflowStatus::Running => "running",
            WorkflowStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 工作流运行接口的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRunResponse {
    #[serde(default)]
    pub workflow_run_id: String,
    #[serde(default)]
    pub task_id: String,
    pub data: WorkflowRunData,
}

/// 工作流运行结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRunData {
    /// 运行标识
    #[serde(default)]
    pub id: String,
    /// 运行状态
    pub status: WorkflowStatus,
    /// 输出（judgement 判定列表在其中）
    #[serde(default)]
    pub outputs: Option<WorkflowOutputs>,
    /// 服务侧错误信息
    #[serde(default)]
    pub error: Option<String>,
    /// 耗时（秒）
    #[serde(default)]
    pub elapsed_time: f64,
    /// 消耗 token 总数
    #[serde(default)]
    pub total_tokens: u64,
    /// 执行步数
    #[serde(default)]
    pub total_steps: u64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub finished_at: Option<i64>,
}

impl WorkflowRunData {
    /// 判定列表（无输出时为空切片）
    pub fn judgement(&self) -> &[ComplianceAssessment] {
        self.outputs
            .as_ref()
            .map(|o| o.judgement.as_slice())
            .unwrap_or(&[])
    }
}

/// 工作流输出
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowOutputs {
    /// 逐条要求的合规判定
    #[serde(default)]
    pub judgement: Vec<ComplianceAssessment>,
}
