//! 图像混合服务核心实现

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::api::blend::payload::BlendResponse;
use crate::app::error::PipelineError;
use crate::config::AppConfig;

/// 未提供提示词时使用的内置提示词
pub const DEFAULT_PROMPT: &str =
    "Blend these album covers into a single cohesive, modern album artwork.";
/// 固定输出分辨率
const OUTPUT_SIZE: &str = "1024x1024";

/// 图像混合服务
///
/// 职责：
/// - 把拼贴图提交给图像编辑模型
/// - 归一化两种响应形态（内联 Base64 / 远程 URL）
/// - 不关心拼贴怎么生成，也不关心结果存到哪
pub struct BlendService {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) api_base_url: String,
    pub(crate) model_name: String,
}

impl BlendService {
    /// 创建新的混合服务
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.blend_api_key.clone(),
            api_base_url: config.blend_api_base_url.clone(),
            model_name: config.blend_model_name.clone(),
        }
    }

    /// 提交拼贴图与提示词，返回生成图片的字节
    ///
    /// API Key 未配置时直接失败，不发起任何网络请求。
    pub async fn blend_image(
        &self,
        collage_path: &Path,
        prompt: Option<&str>,
    ) -> Result<Vec<u8>, PipelineError> {
        if self.api_key.trim().is_empty() {
            return Err(PipelineError::ConfigurationError(
                "缺少图像混合服务 API Key".to_string(),
            ));
        }

        let image_bytes = tokio::fs::read(collage_path).await.map_err(|e| {
            PipelineError::ImageDecodeError(anyhow::anyhow!(
                "读取拼贴图失败 {:?}: {}",
                collage_path,
                e
            ))
        })?;
        debug!("拼贴图大小: {} 字节", image_bytes.len());

        let image_part = Part::bytes(image_bytes)
            .file_name("collage.png")
            .mime_str("image/png")
            .map_err(|e| PipelineError::UpstreamError(anyhow::anyhow!("构造图片分片失败: {}", e)))?;

        let form = Form::new()
            .part("image", image_part)
            .text("model", self.model_name.clone())
            .text("prompt", prompt.unwrap_or(DEFAULT_PROMPT).to_string())
            .text("n", "1")
            .text("size", OUTPUT_SIZE)
            .text("response_format", "b64_json");

        let url = format!("{}/images/edits", self.api_base_url.trim_end_matches('/'));
        debug!("调用图像混合 API: {}, 模型: {}", url, self.model_name);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                PipelineError::NetworkError(anyhow::anyhow!("混合服务请求失败: {}", e))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("混合服务返回错误，状态码: {}, 响应: {}", status, body);
            return Err(PipelineError::UpstreamError(anyhow::anyhow!(
                "混合服务返回 {}",
                status
            )));
        }

        let blend_resp: BlendResponse = resp.json().await.map_err(|e| {
            PipelineError::UpstreamResponseError(format!("响应解析失败: {}", e))
        })?;

        let payload = blend_resp.data.into_iter().next().ok_or_else(|| {
            PipelineError::UpstreamResponseError("响应中没有图片数据".to_string())
        })?;

        payload.into_bytes(&self.client).await
    }
}
