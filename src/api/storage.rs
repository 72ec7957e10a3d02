//! 对象存储上传模块

use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use tracing::info;
use uuid::Uuid;

use crate::app::error::PipelineError;
use crate::config::AppConfig;

/// 对象键统一放在这个前缀下，方便管理
const KEY_PREFIX: &str = "images";

/// 对象存储服务
pub struct StorageService {
    pub(crate) bucket_name: String,
    pub(crate) region: String,
    pub(crate) endpoint: Option<String>,
    pub(crate) access_key_id: Option<String>,
    pub(crate) secret_access_key: Option<String>,
}

impl StorageService {
    /// 创建新的存储服务
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bucket_name: config.bucket_name.clone(),
            region: config.aws_region.clone(),
            endpoint: config.storage_endpoint.clone(),
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
        }
    }

    /// 生成唯一对象键: images/<uuid>.png
    pub(crate) fn object_key() -> String {
        format!("{}/{}.png", KEY_PREFIX, Uuid::new_v4())
    }

    /// 对象的公开访问 URL，由桶名和键直接拼出，不回查存储
    pub(crate) fn public_url(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket_name, key)
    }

    fn credentials(&self) -> Result<Credentials, PipelineError> {
        match (&self.access_key_id, &self.secret_access_key) {
            // 配置了静态凭证就直接用
            (Some(id), Some(key)) => Credentials::new(Some(id), Some(key), None, None, None),
            // 否则走默认凭证链（环境变量、profile 等）
            _ => Credentials::default(),
        }
        .map_err(|e| PipelineError::StorageError(anyhow::anyhow!("加载存储凭证失败: {}", e)))
    }

    /// 上传图片字节，返回公开访问 URL
    ///
    /// 每次调用都写一个全新的键，绝不覆盖已有对象。
    pub async fn upload_image(&self, bytes: &[u8]) -> Result<String, PipelineError> {
        if self.bucket_name.trim().is_empty() {
            return Err(PipelineError::ConfigurationError(
                "缺少存储桶名称".to_string(),
            ));
        }

        let credentials = self.credentials()?;

        // 自定义端点（MinIO 等）用 Custom 区域并启用 path-style
        let bucket = match &self.endpoint {
            Some(endpoint) => Bucket::new(
                &self.bucket_name,
                Region::Custom {
                    region: self.region.clone(),
                    endpoint: endpoint.clone(),
                },
                credentials,
            )
            .map_err(|e| {
                PipelineError::StorageError(anyhow::anyhow!("初始化存储桶失败: {}", e))
            })?
            .with_path_style(),
            None => {
                let region = self.region.parse::<Region>().map_err(|e| {
                    PipelineError::ConfigurationError(format!(
                        "无法解析存储区域 {}: {}",
                        self.region, e
                    ))
                })?;
                Bucket::new(&self.bucket_name, region, credentials).map_err(|e| {
                    PipelineError::StorageError(anyhow::anyhow!("初始化存储桶失败: {}", e))
                })?
            }
        };

        let object_key = Self::object_key();
        info!("上传路径: {}", object_key);

        let response = bucket
            .put_object_with_content_type(&object_key, bytes, "image/png")
            .await
            .map_err(|e| PipelineError::StorageError(anyhow::anyhow!("上传失败: {}", e)))?;

        if response.status_code() != 200 {
            return Err(PipelineError::StorageError(anyhow::anyhow!(
                "上传失败，状态码: {}",
                response.status_code()
            )));
        }

        let final_url = self.public_url(&object_key);
        info!("图片上传成功！URL: {}", final_url);
        Ok(final_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::logger;

    fn test_service(bucket: &str) -> StorageService {
        StorageService {
            bucket_name: bucket.to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    #[test]
    fn test_object_keys_are_unique() {
        let a = StorageService::object_key();
        let b = StorageService::object_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_key_format() {
        let key = StorageService::object_key();
        assert!(key.starts_with("images/"));
        assert!(key.ends_with(".png"));
        // images/ + uuid(36) + .png
        assert_eq!(key.len(), "images/".len() + 36 + ".png".len());
    }

    #[test]
    fn test_public_url_format() {
        let service = test_service("my-bucket");
        let url = service.public_url("images/abc.png");
        assert_eq!(url, "https://my-bucket.s3.amazonaws.com/images/abc.png");
    }

    #[tokio::test]
    async fn test_missing_bucket_is_configuration_error() {
        let service = test_service("");
        match service.upload_image(b"png-bytes").await {
            Err(PipelineError::ConfigurationError(_)) => {}
            other => panic!("预期 ConfigurationError，实际: {:?}", other),
        }
    }

    /// 真实上传测试，需要可用的存储配置
    #[tokio::test]
    #[ignore]
    async fn test_upload_to_live_bucket() {
        logger::init_test();

        let config = crate::config::AppConfig::load().expect("加载配置失败");
        let service = StorageService::new(&config);

        let result = service.upload_image(b"\x89PNG\r\n\x1a\ntest").await;
        match result {
            Ok(url) => {
                println!("✅ 图片上传成功！URL: {}", url);
                assert!(url.contains(&config.bucket_name));
            }
            Err(e) => {
                println!("❌ 上传失败: {:?}", e);
                panic!("测试失败");
            }
        }
    }
}
