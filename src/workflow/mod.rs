pub mod evaluation_flow;
pub mod file_ctx;

pub use evaluation_flow::{EvaluationFlow, RunOutcome};
pub use file_ctx::FileCtx;
