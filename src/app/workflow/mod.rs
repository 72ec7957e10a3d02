pub mod generate;
pub mod pipeline;

use uuid::Uuid;

pub struct RequestCtx {
    /// 请求唯一标识，同时用于日志前缀
    pub request_id: String,
    /// 参与拼贴的图片数量
    pub image_count: usize,
    /// 是否携带自定义提示词
    pub has_prompt: bool,
}

impl RequestCtx {
    pub fn new(image_count: usize, has_prompt: bool) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            image_count,
            has_prompt,
        }
    }

    /// 生成日志前缀
    pub fn log_prefix(&self) -> String {
        format!("[请求 {}]", &self.request_id[..8])
    }
}
