//! 评估工作流客户端
//!
//! 封装所有与工作流运行接口相关的调用逻辑

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::clients::WorkflowGateway;
use crate::config::Config;
use crate::error::{AppError, AppResult, GatewayError};
use crate::models::response::WorkflowRunResponse;

const RUN_ENDPOINT: &str = "workflows/run";

/// 评估工作流客户端
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl WorkflowClient {
    /// 创建新的工作流客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("构建 HTTP 客户端失败: {}", e)))?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    /// 对已上传文件发起一次阻塞式评估
    ///
    /// 单次调用：不重试、不轮询，超时由 HTTP 客户端控制
    pub async fn run_workflow(
        &self,
        file_id: &str,
        user_id: &str,
    ) -> AppResult<WorkflowRunResponse> {
        let body = json!({
            "inputs": {
                "file": {
                    "transfer_method": "local_file",
                    "upload_file_id": file_id,
                    "type": "document",
                }
            },
            "response_mode": "blocking",
            "user": user_id,
        });

        debug!("发起评估: file_id={}", file_id);

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, RUN_ENDPOINT))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::request_failed(RUN_ENDPOINT, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().filter(|s| !s.is_empty());
            return Err(
                GatewayError::bad_response(RUN_ENDPOINT, Some(status.as_u16()), message).into(),
            );
        }

        let run: WorkflowRunResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::json_parse_failed(RUN_ENDPOINT, e))?;

        debug!("评估返回: run_id={}, status={}", run.data.id, run.data.status);

        Ok(run)
    }
}

#[async_trait]
impl WorkflowGateway for WorkflowClient {
    async fn execute(&self, file_id: &str, user_id: &str) -> AppResult<WorkflowRunResponse> {
        self.run_workflow(file_id, user_id).await
    }
}
