use anyhow::Context;
use config::{Config, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// 图像混合服务的 API Key
    pub blend_api_key: String,
    /// 图像混合服务的 API 地址（OpenAI 兼容）
    pub blend_api_base_url: String,
    /// 图像混合使用的模型
    pub blend_model_name: String,
    /// 对象存储桶名称
    pub bucket_name: String,
    /// 存储桶所在区域
    pub aws_region: String,
    /// 自定义存储端点（MinIO 等 S3 兼容服务时使用）
    pub storage_endpoint: Option<String>,
    /// 静态存储凭证，缺省时走默认凭证链
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    /// 请求文件目录，缺省为 requests
    pub requests_dir: Option<String>,
    /// 临时文件目录，缺省为系统临时目录
    pub scratch_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config: AppConfig = Config::builder()
            .add_source(
                config::File::with_name("application")
                    .format(FileFormat::Yaml)
                    .required(true),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .try_parsing(true)
                    .separator("_"),
            )
            .build()
            .with_context(|| anyhow::anyhow!("Failed to load config"))?
            .try_deserialize()
            .with_context(|| anyhow::anyhow!("Failed to deserialize config"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
blend_api_key: "sk-test"
blend_api_base_url: "https://api.openai.com/v1"
blend_model_name: "gpt-image-1"
bucket_name: "cover-blend-artifacts"
aws_region: "us-east-1"
"#;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(SAMPLE, FileFormat::Yaml))
            .build()
            .expect("构建配置失败")
            .try_deserialize()
            .expect("反序列化配置失败");

        assert_eq!(config.blend_model_name, "gpt-image-1");
        assert_eq!(config.bucket_name, "cover-blend-artifacts");
        assert!(config.storage_endpoint.is_none());
        assert!(config.requests_dir.is_none());
    }
}
