use std::path::Path;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::api::spotify;
use crate::app::models::GenerateRequest;
use crate::app::workflow::RequestCtx;
use crate::app::workflow::generate::generate_artwork;
use crate::config::AppConfig;

pub async fn run() -> Result<(), anyhow::Error> {
    let config = AppConfig::load()?;
    let requests_dir = config
        .requests_dir
        .clone()
        .unwrap_or_else(|| "requests".to_string());

    let entries = std::fs::read_dir(&requests_dir)?;

    let mut success_count = 0;
    let mut failure_count = 0;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            info!("开始处理请求: {:?}", path);

            match process_single_request(&path, &config).await {
                Ok(url) => {
                    success_count += 1;
                    info!("请求 {:?} 处理完成，生成图片: {}", path, url);
                }
                Err(e) => {
                    failure_count += 1;
                    error!("请求 {:?} 处理失败，跳过。错误: {:?}", path, e);
                }
            }
        }
    }

    info!(
        "全部请求处理完成 - 成功: {}, 失败: {}",
        success_count, failure_count
    );

    Ok(())
}

// 处理单个请求文件
async fn process_single_request(path: &Path, config: &AppConfig) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    let request: GenerateRequest = serde_json::from_str(&content)?;

    // 未携带图片列表时，用访问令牌拉取用户的热门专辑封面
    let image_urls = if request.image_urls.is_empty() {
        match &request.access_token {
            Some(token) => {
                info!("请求 {:?} 未携带图片列表，从音乐服务拉取热门专辑封面", path);
                spotify::get_album_images(token)
                    .await?
                    .into_iter()
                    .map(|art| art.image_url)
                    .collect()
            }
            None => request.image_urls.clone(),
        }
    } else {
        request.image_urls.clone()
    };

    let ctx = RequestCtx::new(image_urls.len(), request.prompt.is_some());
    let prefix = ctx.log_prefix();

    match generate_artwork(&image_urls, request.prompt.as_deref(), &ctx, config).await {
        Ok(url) => Ok(url),
        Err(e) => {
            error!("{} 生成失败: {:?}", prefix, e);
            warn!(
                target: "failed_requests",
                "{} 请求文件: {:?} | 状态码: {} | 原因: {:?}",
                prefix,
                path,
                e.status_code(),
                e
            );
            // 对外只暴露通用文案，细节留在日志里
            Err(anyhow::anyhow!("{} {}", prefix, e.public_message()))
        }
    }
}
