//! 文件注册表 - 业务能力层
//!
//! 只负责"记录已上传文件"能力，不关心流程
//!
//! 会话期间只追加不删除，最新上传的文件排在最前

use crate::error::ValidationError;
use crate::models::UploadedFile;

/// 文件注册表
///
/// 职责：
/// - 按上传顺序记录文件（最新在前）
/// - 按文件标识查找
/// - 不出现执行状态
/// - 不关心流程顺序
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: Vec<UploadedFile>,
}

impl FileRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// 登记一个新上传的文件
    ///
    /// 上传标识应当全局唯一，重复标识视为契约违反被拒绝
    pub fn register(&mut self, file: UploadedFile) -> Result<(), ValidationError> {
        if self.files.iter().any(|f| f.id == file.id) {
            return Err(ValidationError::DuplicateFileId { file_id: file.id });
        }
        self.files.insert(0, file);
        Ok(())
    }

    /// 按标识查找文件
    pub fn lookup(&self, file_id: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == file_id)
    }

    /// 全部文件（最新在前）
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file(id: &str, name: &str) -> UploadedFile {
        UploadedFile {
            id: id.to_string(),
            name: name.to_string(),
            byte_size: 1024,
            extension: "pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            uploaded_at: 1_700_000_000,
            source_bytes: vec![0u8; 4],
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FileRegistry::new();
        registry.register(sample_file("f1", "doc.pdf")).expect("登记失败");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("f1").map(|f| f.name.as_str()), Some("doc.pdf"));
        assert!(registry.lookup("f2").is_none());
    }

    #[test]
    fn test_most_recent_first() {
        let mut registry = FileRegistry::new();
        registry.register(sample_file("f1", "first.pdf")).expect("登记失败");
        registry.register(sample_file("f2", "second.png")).expect("登记失败");

        let names: Vec<&str> = registry.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["second.png", "first.pdf"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = FileRegistry::new();
        registry.register(sample_file("f1", "doc.pdf")).expect("登记失败");

        let err = registry.register(sample_file("f1", "other.pdf")).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateFileId { .. }));
        // 原有记录不受影响
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("f1").map(|f| f.name.as_str()), Some("doc.pdf"));
    }
}
