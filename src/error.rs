//! 错误类型定义
//!
//! 按错误来源分为三类：校验错误、网关错误、执行状态错误，
//! 顶层用 `AppError` 统一包装，供各层通过 `?` 传播。

use thiserror::Error;

use crate::models::file::ALLOWED_EXTENSIONS_HINT;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 远程服务调用错误
    #[error("网关错误: {0}")]
    Gateway(#[from] GatewayError),
    /// 执行状态机错误
    #[error("执行状态错误: {0}")]
    Execution(#[from] ExecutionError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 校验错误
///
/// 在任何网关调用发起之前被拦截，除错误信息外不产生任何状态变更
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 文件扩展名不在允许列表中
    #[error("不支持的文件扩展名: {extension}（支持的类型: {}）", ALLOWED_EXTENSIONS_HINT)]
    UnsupportedExtension { extension: String },
    /// 未配置评估服务的访问凭证
    #[error("未配置评估服务的访问凭证")]
    MissingCredential,
    /// 文件标识未登记
    #[error("未知的文件标识: {file_id}")]
    UnknownFile { file_id: String },
    /// 文件标识重复登记（上传标识应当全局唯一）
    #[error("文件标识重复: {file_id}")]
    DuplicateFileId { file_id: String },
}

/// 网关错误
///
/// 网络失败、非 2xx 响应、响应体解析失败统一归入此类
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回错误响应
    #[error("服务返回错误响应 ({endpoint}): status={status:?}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: Option<u16>,
        message: Option<String>,
    },
    /// 响应体解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 上传结果不完整（缺少标识、大小为 0、扩展名不可识别）
    #[error("上传结果不合法: {reason}")]
    InvalidUploadResult { reason: String },
}

/// 执行状态机错误
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// 同一文件已有评估在进行中（互斥守卫）
    #[error("文件 {file_id} 已有评估在进行中")]
    AlreadyPending { file_id: String },
    /// 没有进行中的评估可供记录结果
    #[error("文件 {file_id} 当前没有进行中的评估")]
    NotPending { file_id: String },
}

// ========== 便捷构造函数 ==========

impl GatewayError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        GatewayError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建错误响应错误
    pub fn bad_response(
        endpoint: impl Into<String>,
        status: Option<u16>,
        message: Option<String>,
    ) -> Self {
        GatewayError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message,
        }
    }

    /// 创建响应解析失败错误
    pub fn json_parse_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        GatewayError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建上传结果不合法错误
    pub fn invalid_upload(reason: impl Into<String>) -> Self {
        GatewayError::InvalidUploadResult {
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
