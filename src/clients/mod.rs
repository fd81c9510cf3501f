//! 客户端层（Gateway Clients）
//!
//! 封装与远程评估服务的全部 HTTP 交互，核心只消费网关的成功/失败结果。
//! 网关以 trait 形式定义，便于在测试中替换为模拟实现。

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::response::WorkflowRunResponse;
use crate::models::UploadedFile;

pub mod upload_client;
pub mod workflow_client;

pub use upload_client::UploadClient;
pub use workflow_client::WorkflowClient;

/// 上传网关
///
/// 接收文件内容与用户标识，成功时返回带标识的已上传文件
#[async_trait]
pub trait UploadGateway: Send + Sync {
    /// 上传一个文件
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        user_id: &str,
    ) -> AppResult<UploadedFile>;
}

/// 评估工作流网关
///
/// 接收文件标识与用户标识；单次调用，不自动重试
#[async_trait]
pub trait WorkflowGateway: Send + Sync {
    /// 对指定文件发起一次评估
    async fn execute(&self, file_id: &str, user_id: &str) -> AppResult<WorkflowRunResponse>;
}
