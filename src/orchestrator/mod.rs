//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责会话状态管理和批量调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `controller` - 会话编排控制器
//! - 独占持有文件注册表与执行状态表
//! - 上传登记、触发评估、结果回写
//! - 向展示层暴露只读投影（读模型、历史、错误槽位）
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 扫描并加载待评估文档
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<文档>)
//!     ↓
//! controller (会话状态 + 单文件触发)
//!     ↓
//! workflow::EvaluationFlow (单次评估调用)
//!     ↓
//! services (能力层：registry / tracker / aggregator)
//!     ↓
//! clients (网关层：upload / workflow)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，controller 管会话
//! 2. **状态隔离**：核心状态只由 controller 持有和变更
//! 3. **向下依赖**：编排层 → workflow → services / clients
//! 4. **失败隔离**：单个文件的失败不阻塞、不污染其他文件

pub mod batch_processor;
pub mod controller;

// 重新导出主要类型
pub use batch_processor::App;
pub use controller::{ExecutionReadModel, OrchestrationController};
