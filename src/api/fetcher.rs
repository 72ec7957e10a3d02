//! 封面图片下载模块

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use crate::app::error::PipelineError;

/// 下载单张图片到本地
async fn download_one(
    client: &reqwest::Client,
    url: &str,
    target: &Path,
) -> Result<(), PipelineError> {
    let resp = client.get(url).send().await.map_err(|e| {
        PipelineError::NetworkError(anyhow::anyhow!("请求图片失败 {}: {}", url, e))
    })?;

    if !resp.status().is_success() {
        return Err(PipelineError::NetworkError(anyhow::anyhow!(
            "HTTP 错误: {} ({})",
            resp.status(),
            url
        )));
    }

    let bytes = resp.bytes().await.map_err(|e| {
        PipelineError::NetworkError(anyhow::anyhow!("读取图片响应失败 {}: {}", url, e))
    })?;

    tokio::fs::write(target, &bytes).await.map_err(|e| {
        PipelineError::NetworkError(anyhow::anyhow!("写入临时文件失败 {:?}: {}", target, e))
    })?;

    debug!("已下载 {} -> {:?} ({} 字节)", url, target, bytes.len());
    Ok(())
}

/// 并发下载所有封面，返回与输入同序的本地路径
///
/// 任意一张下载失败则整体失败，不做部分成功，也不做重试；
/// 已在途的下载任务不会被取消，结果直接丢弃。
pub async fn download_images(
    urls: &[String],
    scratch_dir: &Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    if urls.is_empty() {
        return Err(PipelineError::InvalidInput("图片 URL 列表为空".to_string()));
    }

    tokio::fs::create_dir_all(scratch_dir).await.map_err(|e| {
        PipelineError::NetworkError(anyhow::anyhow!(
            "创建临时目录失败 {:?}: {}",
            scratch_dir,
            e
        ))
    })?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| PipelineError::NetworkError(anyhow::anyhow!("构建 HTTP 客户端失败: {}", e)))?;

    let mut tasks = Vec::new();
    for url in urls {
        let client = client.clone();
        let url = url.clone();
        let target = scratch_dir.join(format!("{}.png", Uuid::new_v4()));

        let task = tokio::spawn(async move {
            download_one(&client, &url, &target).await.map(|_| target)
        });
        tasks.push(task);
    }

    // 按提交顺序收集，保证返回的路径与输入 URL 同序
    let mut files = Vec::with_capacity(tasks.len());
    for task in tasks {
        let path = task.await.map_err(|e| {
            PipelineError::NetworkError(anyhow::anyhow!("下载任务执行失败: {}", e))
        })??;
        files.push(path);
    }

    info!("共下载 {} 张封面", files.len());
    Ok(files)
}
