//! 流水线错误分类
//!
//! 区分调用方错误与系统错误，调用方只能看到 public_message，
//! 上游的详细报错只进日志。

/// 封面生成各阶段的错误类型
#[derive(Debug)]
pub enum PipelineError {
    /// 输入非法（如空的图片 URL 列表）
    InvalidInput(String),
    /// 下载或上游网络请求失败
    NetworkError(anyhow::Error),
    /// 源图片无法读取或解码
    ImageDecodeError(anyhow::Error),
    /// 缺少必须的配置，在发起任何网络请求之前检出
    ConfigurationError(String),
    /// 混合服务没有返回可用的图片数据
    UpstreamResponseError(String),
    /// 混合服务报告失败（限流、参数错误等）
    UpstreamError(anyhow::Error),
    /// 对象存储写入失败
    StorageError(anyhow::Error),
}

impl PipelineError {
    /// 是否属于调用方的问题
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_))
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        if self.is_caller_fault() { 400 } else { 500 }
    }

    /// 对调用方可见的描述，不暴露上游细节
    pub fn public_message(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "imageUrls are required",
            PipelineError::NetworkError(_) => "Failed to fetch image",
            PipelineError::ImageDecodeError(_) => "Failed to decode image",
            PipelineError::ConfigurationError(_) => "Service is not configured",
            PipelineError::UpstreamResponseError(_) | PipelineError::UpstreamError(_) => {
                "Failed to generate image"
            }
            PipelineError::StorageError(_) => "Failed to store image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_fault_maps_to_400() {
        let err = PipelineError::InvalidInput("图片 URL 列表为空".to_string());
        assert!(err.is_caller_fault());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_system_fault_maps_to_500() {
        let err = PipelineError::UpstreamError(anyhow::anyhow!("quota exceeded"));
        assert!(!err.is_caller_fault());
        assert_eq!(err.status_code(), 500);
        // 上游细节不出现在对外文案里
        assert!(!err.public_message().contains("quota"));
    }
}
