//! 业务能力层（Services）
//!
//! 每个模块只描述一种能力，不关心流程顺序：
//! - `file_registry` - 已上传文件的登记与查找
//! - `execution_tracker` - 每个文件的执行状态机与历史
//! - `result_aggregator` - 合规判定的计数汇总

pub mod execution_tracker;
pub mod file_registry;
pub mod result_aggregator;

pub use execution_tracker::{ExecutionTracker, FileExecState};
pub use file_registry::FileRegistry;
pub use result_aggregator::{aggregate_compliance, ComplianceSummary};
