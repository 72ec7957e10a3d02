//! 混合服务响应体

use serde::Deserialize;

use crate::api::base64_to_img::base64_to_png_img;
use crate::app::error::PipelineError;

/// 图像混合服务的响应
#[derive(Debug, Deserialize)]
pub struct BlendResponse {
    pub data: Vec<ImagePayload>,
}

/// 生成结果的两种返回形态：内联 Base64 或远程 URL
///
/// 有的部署内联返回图片数据，有的只给一个可下载地址，
/// 两种形态最终都要归一化成同样的字节。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImagePayload {
    Inline { b64_json: String },
    Remote { url: String },
}

impl ImagePayload {
    /// 把响应载荷归一化为图片字节
    pub async fn into_bytes(self, client: &reqwest::Client) -> Result<Vec<u8>, PipelineError> {
        match self {
            ImagePayload::Inline { b64_json } => base64_to_png_img(&b64_json)
                .map_err(|e| PipelineError::UpstreamResponseError(format!("Base64 解码失败: {}", e))),
            ImagePayload::Remote { url } => {
                let resp = client.get(&url).send().await.map_err(|e| {
                    PipelineError::NetworkError(anyhow::anyhow!("拉取生成图片失败 {}: {}", url, e))
                })?;
                if !resp.status().is_success() {
                    return Err(PipelineError::NetworkError(anyhow::anyhow!(
                        "HTTP 错误: {} ({})",
                        resp.status(),
                        url
                    )));
                }
                let bytes = resp.bytes().await.map_err(|e| {
                    PipelineError::NetworkError(anyhow::anyhow!("读取生成图片失败: {}", e))
                })?;
                Ok(bytes.to_vec())
            }
        }
    }
}
