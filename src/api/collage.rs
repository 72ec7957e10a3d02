//! 封面拼贴模块

use std::path::{Path, PathBuf};

use image::{GenericImage, ImageReader, Rgb, RgbImage, imageops::FilterType};
use tracing::info;
use uuid::Uuid;

use crate::app::error::PipelineError;

/// 单元格边长（像素）
const CELL_SIZE: u32 = 320;
/// 画布背景色 #0f0f0f
const BACKGROUND: Rgb<u8> = Rgb([15, 15, 15]);

/// 计算网格尺寸：列数取 sqrt(n) 向上取整，行数补齐
pub(crate) fn grid_dims(count: usize) -> (u32, u32) {
    let cols = (count as f64).sqrt().ceil() as u32;
    let rows = (count as u32).div_ceil(cols);
    (cols, rows)
}

/// 把所有封面拼成一张网格图，返回拼贴文件路径
///
/// # 流程
/// 1. 并发解码并按 cover 方式缩放到固定单元格（裁掉溢出，保持比例，居中）
/// 2. 按行优先顺序铺到纯色画布上，末尾未占用的单元格保持背景色
/// 3. 输出 PNG 到临时目录
///
/// 任意一张图片不可读即整体失败，不用占位图顶替。
pub async fn build_collage(
    files: &[PathBuf],
    scratch_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::InvalidInput("没有可拼贴的图片".to_string()));
    }

    let (cols, rows) = grid_dims(files.len());
    let width = cols * CELL_SIZE;
    let height = rows * CELL_SIZE;
    info!(
        "拼贴布局: {} 张图片, {}x{} 网格, 画布 {}x{}",
        files.len(),
        cols,
        rows,
        width,
        height
    );

    // 解码和缩放是 CPU 密集操作，放到阻塞线程池里并发执行
    let mut tasks = Vec::new();
    for file in files {
        let file = file.clone();
        let task = tokio::task::spawn_blocking(move || -> Result<RgbImage, PipelineError> {
            // 下载的文件统一叫 .png，实际可能是 JPEG 等格式，按内容识别
            let img = ImageReader::open(&file)
                .and_then(|reader| reader.with_guessed_format())
                .map_err(|e| {
                    PipelineError::ImageDecodeError(anyhow::anyhow!(
                        "读取图片失败 {:?}: {}",
                        file,
                        e
                    ))
                })?
                .decode()
                .map_err(|e| {
                    PipelineError::ImageDecodeError(anyhow::anyhow!(
                        "图片解码失败 {:?}: {}",
                        file,
                        e
                    ))
                })?;
            Ok(img
                .resize_to_fill(CELL_SIZE, CELL_SIZE, FilterType::Triangle)
                .to_rgb8())
        });
        tasks.push(task);
    }

    let mut cells = Vec::with_capacity(files.len());
    for task in tasks {
        let cell = task.await.map_err(|e| {
            PipelineError::ImageDecodeError(anyhow::anyhow!("缩放任务执行失败: {}", e))
        })??;
        cells.push(cell);
    }

    // 行优先铺排：第 i 张放在 (i % cols, i / cols)
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    for (index, cell) in cells.iter().enumerate() {
        let x = (index as u32 % cols) * CELL_SIZE;
        let y = (index as u32 / cols) * CELL_SIZE;
        canvas.copy_from(cell, x, y).map_err(|e| {
            PipelineError::ImageDecodeError(anyhow::anyhow!("拼贴第 {} 张失败: {}", index, e))
        })?;
    }

    let collage_path = scratch_dir.join(format!("collage-{}.png", Uuid::new_v4()));
    canvas.save(&collage_path).map_err(|e| {
        PipelineError::ImageDecodeError(anyhow::anyhow!(
            "写入拼贴图失败 {:?}: {}",
            collage_path,
            e
        ))
    })?;

    Ok(collage_path)
}
