//! # Doc Compliance Check
//!
//! 文档合规评估的上传与工作流编排引擎
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装远程评估服务的 HTTP 调用，只暴露网关能力
//! - `UploadClient` - 文件上传
//! - `WorkflowClient` - 评估工作流运行
//! - `UploadGateway` / `WorkflowGateway` - 外部协作者的 trait 接口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个模块只处理一种能力
//! - `FileRegistry` - 已上传文件的登记与查找
//! - `ExecutionTracker` - 每个文件的执行状态机（互斥守卫）
//! - `result_aggregator` - 合规判定的计数汇总
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的一次评估流程
//! - `FileCtx` - 上下文封装（文件标识 + 文件名）
//! - `EvaluationFlow` - 流程编排（网关调用 → 结果分类）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/controller` - 会话控制器，独占持有核心状态
//! - `orchestrator/batch_processor` - 批量文档处理器，管理并发和统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{UploadClient, UploadGateway, WorkflowClient, WorkflowGateway};
pub use config::Config;
pub use error::{AppError, AppResult, ExecutionError, GatewayError, ValidationError};
pub use models::{
    ComplianceAssessment, ComplianceStatus, ExecutionRecord, ExecutionStatus, UploadedFile,
    WorkflowRunData, WorkflowRunResponse, WorkflowStatus,
};
pub use orchestrator::{App, ExecutionReadModel, OrchestrationController};
pub use services::{aggregate_compliance, ComplianceSummary, ExecutionTracker, FileRegistry};
pub use workflow::{EvaluationFlow, FileCtx, RunOutcome};
