//! 评估执行流程 - 流程层
//!
//! 核心职责：定义"一个文件"的一次评估调用
//!
//! 流程顺序：
//! 1. 调用评估工作流网关（单次调用，不重试）
//! 2. 按运行状态分类结果：明确成功 → 完成；其余 → 失败（载荷保留）

use tracing::{info, warn};

use crate::clients::WorkflowGateway;
use crate::models::response::WorkflowRunData;
use crate::workflow::file_ctx::FileCtx;

/// 一次评估调用的结果
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// 工作流明确成功，载荷可用于汇总展示
    Completed(WorkflowRunData),
    /// 调用失败或工作流以非成功状态结束
    ///
    /// 服务有返回载荷时一并保留，供详情展示；传输层失败时无载荷
    Failed {
        message: String,
        payload: Option<WorkflowRunData>,
    },
}

/// 评估执行流程
///
/// 职责：
/// - 发起一次工作流调用并对结果分类
/// - 只处理单个文件的一次执行
/// - 不持有注册表与执行状态
/// - 不关心并发互斥
pub struct EvaluationFlow<W: WorkflowGateway> {
    gateway: W,
    user_id: String,
}

impl<W: WorkflowGateway> EvaluationFlow<W> {
    /// 创建新的评估流程
    pub fn new(gateway: W, user_id: impl Into<String>) -> Self {
        Self {
            gateway,
            user_id: user_id.into(),
        }
    }

    /// 对指定文件执行一次评估调用
    pub async fn run(&self, ctx: &FileCtx) -> RunOutcome {
        info!("{} 📤 正在调用评估工作流...", ctx);

        match self.gateway.execute(&ctx.file_id, &self.user_id).await {
            Ok(response) => Self::classify(ctx, response.data),
            Err(e) => {
                warn!("{} ⚠️ 评估调用失败: {}", ctx, e);
                RunOutcome::Failed {
                    message: e.to_string(),
                    payload: None,
                }
            }
        }
    }

    /// 按运行状态对返回载荷分类
    ///
    /// 阻塞式调用返回的任何非成功状态（failed / running / stopped）
    /// 都按失败处理以保留重试入口，载荷照常附上
    fn classify(ctx: &FileCtx, data: WorkflowRunData) -> RunOutcome {
        if data.status.is_succeeded() {
            info!(
                "{} ✓ 评估完成: {} 条判定, 耗时 {:.2}s",
                ctx,
                data.judgement().len(),
                data.elapsed_time
            );
            RunOutcome::Completed(data)
        } else {
            let message = data
                .error
                .clone()
                .unwrap_or_else(|| format!("工作流以 {} 状态结束", data.status));
            warn!("{} ⚠️ 工作流未成功: {}", ctx, message);
            RunOutcome::Failed {
                message,
                payload: Some(data),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::{AppResult, GatewayError};
    use crate::models::response::{WorkflowRunResponse, WorkflowStatus};

    /// 返回固定结果的模拟网关
    struct FixedGateway {
        status: WorkflowStatus,
        error: Option<String>,
        transport_failure: bool,
    }

    #[async_trait]
    impl WorkflowGateway for FixedGateway {
        async fn execute(&self, file_id: &str, _user_id: &str) -> AppResult<WorkflowRunResponse> {
            if self.transport_failure {
                return Err(GatewayError::bad_response(
                    "workflows/run",
                    Some(502),
                    Some("网关超时".to_string()),
                )
                .into());
            }
            Ok(WorkflowRunResponse {
                workflow_run_id: "run-1".to_string(),
                task_id: "task-1".to_string(),
                data: WorkflowRunData {
                    id: format!("run-{}", file_id),
                    status: self.status,
                    outputs: None,
                    error: self.error.clone(),
                    elapsed_time: 0.1,
                    total_tokens: 10,
                    total_steps: 1,
                    created_at: 1_700_000_000,
                    finished_at: Some(1_700_000_001),
                },
            })
        }
    }

    fn ctx() -> FileCtx {
        FileCtx::new("f1".to_string(), "doc.pdf".to_string())
    }

    #[test]
    fn test_succeeded_is_completed() {
        let flow = EvaluationFlow::new(
            FixedGateway {
                status: WorkflowStatus::Succeeded,
                error: None,
                transport_failure: false,
            },
            "u1",
        );
        let outcome = tokio_test::block_on(flow.run(&ctx()));
        assert!(matches!(outcome, RunOutcome::Completed(_)));
    }

    #[test]
    fn test_non_succeeded_is_failure_with_payload() {
        let flow = EvaluationFlow::new(
            FixedGateway {
                status: WorkflowStatus::Stopped,
                error: None,
                transport_failure: false,
            },
            "u1",
        );
        match tokio_test::block_on(flow.run(&ctx())) {
            RunOutcome::Failed { message, payload } => {
                assert!(message.contains("stopped"));
                assert!(payload.is_some());
            }
            other => panic!("期望失败结果，得到: {:?}", other),
        }
    }

    #[test]
    fn test_service_error_message_wins() {
        let flow = EvaluationFlow::new(
            FixedGateway {
                status: WorkflowStatus::Failed,
                error: Some("节点执行超限".to_string()),
                transport_failure: false,
            },
            "u1",
        );
        match tokio_test::block_on(flow.run(&ctx())) {
            RunOutcome::Failed { message, .. } => assert_eq!(message, "节点执行超限"),
            other => panic!("期望失败结果，得到: {:?}", other),
        }
    }

    #[test]
    fn test_transport_failure_has_no_payload() {
        let flow = EvaluationFlow::new(
            FixedGateway {
                status: WorkflowStatus::Succeeded,
                error: None,
                transport_failure: true,
            },
            "u1",
        );
        match tokio_test::block_on(flow.run(&ctx())) {
            RunOutcome::Failed { message, payload } => {
                assert!(!message.is_empty());
                assert!(payload.is_none());
            }
            other => panic!("期望失败结果，得到: {:?}", other),
        }
    }
}
