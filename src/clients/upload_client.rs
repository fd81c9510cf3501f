//! 文件上传客户端
//!
//! 封装所有与文件上传接口相关的调用逻辑

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::clients::UploadGateway;
use crate::config::Config;
use crate::error::{AppError, AppResult, GatewayError, ValidationError};
use crate::models::file::{self, UploadedFile};
use crate::models::response::UploadResponse;

const UPLOAD_ENDPOINT: &str = "files/upload";

/// 文件上传客户端
#[derive(Debug, Clone)]
pub struct UploadClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl UploadClient {
    /// 创建新的上传客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("构建 HTTP 客户端失败: {}", e)))?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    /// 上传文件
    ///
    /// # 参数
    /// - `file_name`: 原始文件名（用于扩展名校验与表单字段）
    /// - `bytes`: 文件内容
    /// - `user_id`: 用户标识
    ///
    /// # 返回
    /// 返回已上传文件（含原始内容），供注册表登记
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        user_id: &str,
    ) -> AppResult<UploadedFile> {
        // 扩展名校验不通过则不发起任何网络调用
        let extension = file::extension_of(file_name).ok_or_else(|| {
            ValidationError::UnsupportedExtension {
                extension: String::new(),
            }
        })?;
        let mime_type = file::mime_type_of(&extension).ok_or_else(|| {
            ValidationError::UnsupportedExtension {
                extension: extension.clone(),
            }
        })?;

        debug!("上传文件: {} ({} 字节)", file_name, bytes.len());

        let part = Part::bytes(bytes.clone())
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| GatewayError::request_failed(UPLOAD_ENDPOINT, e))?;
        let form = Form::new()
            .part("file", part)
            .text("user", user_id.to_string());

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, UPLOAD_ENDPOINT))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GatewayError::request_failed(UPLOAD_ENDPOINT, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().filter(|s| !s.is_empty());
            return Err(
                GatewayError::bad_response(UPLOAD_ENDPOINT, Some(status.as_u16()), message).into(),
            );
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::json_parse_failed(UPLOAD_ENDPOINT, e))?;

        Self::check_upload(&upload)?;

        debug!("上传成功: id={}", upload.id);

        Ok(UploadedFile::from_response(upload, bytes))
    }

    /// 检查上传响应是否合格
    ///
    /// 缺少标识、大小为 0、扩展名不可识别都按上传失败处理
    fn check_upload(upload: &UploadResponse) -> Result<(), GatewayError> {
        if upload.id.is_empty() {
            return Err(GatewayError::invalid_upload("响应缺少文件标识"));
        }
        if upload.size == 0 {
            return Err(GatewayError::invalid_upload("文件大小为 0"));
        }
        if !file::is_allowed_extension(&upload.extension) {
            return Err(GatewayError::invalid_upload(format!(
                "无法识别的扩展名: {}",
                upload.extension
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UploadGateway for UploadClient {
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        user_id: &str,
    ) -> AppResult<UploadedFile> {
        self.upload_file(file_name, bytes, user_id).await
    }
}
