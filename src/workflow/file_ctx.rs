//! 文件评估上下文
//!
//! 封装"我正在评估哪个文件"这一信息

use std::fmt::Display;

/// 文件评估上下文
#[derive(Debug, Clone)]
pub struct FileCtx {
    /// 文件标识
    pub file_id: String,

    /// 文件名（仅用于日志显示）
    pub file_name: String,
}

impl FileCtx {
    /// 创建新的文件上下文
    pub fn new(file_id: String, file_name: String) -> Self {
        Self { file_id, file_name }
    }
}

impl Display for FileCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文件 {} (ID#{})]", self.file_name, self.file_id)
    }
}
