//! 上传文件模型与文件类型允许列表

use serde::{Deserialize, Serialize};

use crate::models::response::UploadResponse;

/// 允许上传的扩展名 → MIME 类型映射
///
/// 图片格式加 PDF 文档，按小写扩展名匹配
pub static ALLOWED_DOCUMENT_TYPES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "webp" => "image/webp",
    "gif" => "image/gif",
    "pdf" => "application/pdf",
};

/// 允许的扩展名列表（用于错误提示，固定展示顺序）
pub const ALLOWED_EXTENSIONS_HINT: &str = "png, jpg, jpeg, webp, gif, pdf";

/// 判断扩展名是否在允许列表中（不区分大小写）
pub fn is_allowed_extension(extension: &str) -> bool {
    ALLOWED_DOCUMENT_TYPES.contains_key(extension.to_ascii_lowercase().as_str())
}

/// 根据扩展名查询 MIME 类型
pub fn mime_type_of(extension: &str) -> Option<&'static str> {
    ALLOWED_DOCUMENT_TYPES
        .get(extension.to_ascii_lowercase().as_str())
        .copied()
}

/// 从文件名中提取扩展名（小写）
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// 已上传文件
///
/// 上传成功时创建一次，之后不再变更；会话期间只追加不删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// 上传网关分配的文件标识，后续所有操作的主键
    pub id: String,
    /// 原始文件名
    pub name: String,
    /// 文件大小（字节）
    pub byte_size: u64,
    /// 扩展名（小写）
    pub extension: String,
    /// MIME 类型
    pub mime_type: String,
    /// 上传时间（epoch 秒）
    pub uploaded_at: i64,
    /// 原始文件内容
    ///
    /// 评估调用以文件标识为键，但重新发起请求仍需持有原始内容
    #[serde(skip)]
    pub source_bytes: Vec<u8>,
}

impl UploadedFile {
    /// 由上传响应与原始内容构建
    pub fn from_response(response: UploadResponse, source_bytes: Vec<u8>) -> Self {
        let uploaded_at = if response.created_at > 0 {
            response.created_at
        } else {
            chrono::Utc::now().timestamp()
        };
        Self {
            id: response.id,
            name: response.name,
            byte_size: response.size,
            extension: response.extension.to_ascii_lowercase(),
            mime_type: response.mime_type,
            uploaded_at,
            source_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_extension("pdf"));
        assert!(is_allowed_extension("PDF"));
        assert!(is_allowed_extension("png"));
        assert!(is_allowed_extension("jpeg"));
        assert!(!is_allowed_extension("exe"));
        assert!(!is_allowed_extension("docx"));
        assert!(!is_allowed_extension(""));
    }

    #[test]
    fn test_mime_type_of() {
        assert_eq!(mime_type_of("pdf"), Some("application/pdf"));
        assert_eq!(mime_type_of("jpg"), Some("image/jpeg"));
        assert_eq!(mime_type_of("docx"), None);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("doc.pdf"), Some("pdf".to_string()));
        assert_eq!(extension_of("照片.JPG"), Some("jpg".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("noext"), None);
    }

    /// 错误提示中的扩展名列表必须与允许列表一致
    #[test]
    fn test_hint_matches_allow_list() {
        let hinted: Vec<&str> = ALLOWED_EXTENSIONS_HINT.split(", ").collect();
        assert_eq!(hinted.len(), ALLOWED_DOCUMENT_TYPES.len());
        for ext in hinted {
            assert!(
                ALLOWED_DOCUMENT_TYPES.contains_key(ext),
                "提示中的扩展名 {} 不在允许列表中",
                ext
            );
        }
    }

    #[test]
    fn test_from_response_keeps_source_bytes() {
        let response = UploadResponse {
            id: "f1".to_string(),
            name: "doc.pdf".to_string(),
            size: 1024,
            extension: "PDF".to_string(),
            mime_type: "application/pdf".to_string(),
            created_by: "u1".to_string(),
            created_at: 1_700_000_000,
        };
        let file = UploadedFile::from_response(response, vec![1, 2, 3]);
        assert_eq!(file.id, "f1");
        assert_eq!(file.extension, "pdf");
        assert_eq!(file.uploaded_at, 1_700_000_000);
        assert_eq!(file.source_bytes, vec![1, 2, 3]);
    }
}
