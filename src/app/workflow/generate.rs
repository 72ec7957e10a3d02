//! 封面混合主流程
//!
//! 完整流程：下载 → 拼贴 → AI 混合 → 上传

use std::path::PathBuf;

use tracing::info;

use crate::api::blend::service::BlendService;
use crate::api::collage;
use crate::api::fetcher;
use crate::api::storage::StorageService;
use crate::app::error::PipelineError;
use crate::app::workflow::RequestCtx;
use crate::config::AppConfig;

/// 从封面 URL 列表生成一张混合封面，返回公开访问 URL
///
/// 任意阶段失败即整体失败，调用方需要从头重试整个请求。
pub async fn generate_artwork(
    image_urls: &[String],
    prompt: Option<&str>,
    ctx: &RequestCtx,
    config: &AppConfig,
) -> Result<String, PipelineError> {
    let prefix = ctx.log_prefix();

    if image_urls.is_empty() {
        return Err(PipelineError::InvalidInput("图片 URL 列表为空".to_string()));
    }

    info!("{} ========== 开始生成混合封面 ==========", prefix);
    info!(
        "{} 图片数量: {}, 自定义提示词: {}",
        prefix, ctx.image_count, ctx.has_prompt
    );

    let scratch_dir = scratch_dir(config);

    // === 1. 下载封面 ===
    info!("{} [步骤 1/4] 下载封面图片", prefix);
    let files = fetcher::download_images(image_urls, &scratch_dir).await?;

    // === 2. 生成拼贴 ===
    info!("{} [步骤 2/4] 生成拼贴图", prefix);
    let collage_path = collage::build_collage(&files, &scratch_dir).await?;
    info!("{} 拼贴图: {:?}", prefix, collage_path);

    // === 3. AI 混合 ===
    info!("{} [步骤 3/4] 调用图像混合服务", prefix);
    let blend_service = BlendService::new(config);
    let artwork = blend_service.blend_image(&collage_path, prompt).await?;
    info!("{} 混合完成，图片大小: {} 字节", prefix, artwork.len());

    // === 4. 上传存储 ===
    info!("{} [步骤 4/4] 上传到对象存储", prefix);
    let storage = StorageService::new(config);
    let url = storage.upload_image(&artwork).await?;

    info!("{} 混合封面生成完成: {}", prefix, url);
    Ok(url)
}

/// 临时文件目录，缺省为系统临时目录
fn scratch_dir(config: &AppConfig) -> PathBuf {
    config
        .scratch_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}
