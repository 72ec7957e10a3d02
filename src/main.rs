mod api;
mod app;
mod config;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = app::logger::init("logs", "cover_blend");

    // 运行封面混合 pipeline
    if let Err(e) = app::workflow::pipeline::run().await {
        tracing::error!("Pipeline 执行失败: {:?}", e);
        return Err(e);
    }
    info!("========== 所有请求处理完成 ==========");

    Ok(())
}
