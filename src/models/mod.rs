pub mod assessment;
pub mod execution;
pub mod file;
pub mod response;

pub use assessment::{AssessmentVerdict, ComplianceAssessment, ComplianceStatus};
pub use execution::{ExecutionRecord, ExecutionStatus};
pub use file::UploadedFile;
pub use response::{
    UploadResponse, WorkflowOutputs, WorkflowRunData, WorkflowRunResponse, WorkflowStatus,
};
