use serde::Deserialize;

/// 一次封面混合请求（JSON 文档，字段为 camelCase）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// 参与拼贴的封面 URL，按输入顺序排布
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// 自定义提示词，缺省时使用内置提示词
    pub prompt: Option<String>,
    /// 音乐服务访问令牌；未给出图片列表时用它拉取热门专辑封面
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_request() {
        let json = r#"{
            "imageUrls": ["https://x/a.jpg", "https://x/b.jpg"],
            "prompt": "vaporwave style",
            "accessToken": "BQDxyz"
        }"#;
        let request: GenerateRequest = serde_json::from_str(json).expect("解析请求失败");
        assert_eq!(request.image_urls.len(), 2);
        assert_eq!(request.prompt.as_deref(), Some("vaporwave style"));
        assert!(request.access_token.is_some());
    }

    #[test]
    fn test_parse_minimal_request() {
        let json = r#"{"imageUrls": ["https://x/a.jpg"]}"#;
        let request: GenerateRequest = serde_json::from_str(json).expect("解析请求失败");
        assert_eq!(request.image_urls, vec!["https://x/a.jpg"]);
        assert!(request.prompt.is_none());
        assert!(request.access_token.is_none());
    }

    #[test]
    fn test_parse_token_only_request() {
        let json = r#"{"accessToken": "BQDxyz"}"#;
        let request: GenerateRequest = serde_json::from_str(json).expect("解析请求失败");
        assert!(request.image_urls.is_empty());
        assert_eq!(request.access_token.as_deref(), Some("BQDxyz"));
    }
}
