//! 音乐服务专辑封面接口
//!
//! 只负责用已有的访问令牌拉取封面数据，令牌的获取和刷新由外部完成。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const API_BASE: &str = "https://api.spotify.com/v1";
/// 最多取多少位热门艺人
const TOP_ARTISTS_LIMIT: usize = 5;
/// 每位艺人最多取多少张专辑
const ALBUMS_PER_ARTIST: usize = 4;
/// 返回的封面总数上限
const MAX_COVERS: usize = 25;

#[derive(Debug, Deserialize)]
struct TopArtistsResponse {
    items: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumsResponse {
    items: Vec<Album>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumImage {
    pub url: String,
}

/// 专辑封面信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumArt {
    pub artist_name: String,
    pub album_name: String,
    pub image_url: String,
    pub released_at: Option<String>,
}

/// 拉取用户的热门艺人
async fn get_top_artists(client: &reqwest::Client, access_token: &str) -> Result<Vec<Artist>> {
    let resp = client
        .get(format!("{}/me/top/artists", API_BASE))
        .bearer_auth(access_token)
        .query(&[("limit", TOP_ARTISTS_LIMIT.to_string())])
        .send()
        .await
        .context("请求热门艺人失败")?;

    if !resp.status().is_success() {
        anyhow::bail!("热门艺人接口返回 {}", resp.status());
    }

    let data: TopArtistsResponse = resp.json().await.context("热门艺人响应解析失败")?;
    Ok(data.items)
}

/// 拉取单个艺人的专辑列表
async fn get_albums(
    client: &reqwest::Client,
    artist_id: &str,
    access_token: &str,
) -> Result<Vec<Album>> {
    let resp = client
        .get(format!("{}/artists/{}/albums", API_BASE, artist_id))
        .bearer_auth(access_token)
        .query(&[
            ("include_groups", "album,single".to_string()),
            ("market", "US".to_string()),
            ("limit", ALBUMS_PER_ARTIST.to_string()),
        ])
        .send()
        .await
        .context("请求专辑列表失败")?;

    if !resp.status().is_success() {
        anyhow::bail!("专辑列表接口返回 {}", resp.status());
    }

    let data: AlbumsResponse = resp.json().await.context("专辑列表响应解析失败")?;
    Ok(data.items)
}

/// 拉取用户热门艺人的专辑封面（按艺人并发）
///
/// 丢掉没有封面图的专辑，总数截到 25 张。
pub async fn get_album_images(access_token: &str) -> Result<Vec<AlbumArt>> {
    let client = reqwest::Client::new();
    let artists = get_top_artists(&client, access_token).await?;
    info!("获取到 {} 位热门艺人", artists.len());

    let mut tasks = Vec::new();
    for artist in artists {
        let client = client.clone();
        let token = access_token.to_string();

        let task = tokio::spawn(async move {
            let albums = get_albums(&client, &artist.id, &token).await?;
            let art = albums
                .into_iter()
                .filter_map(|album| {
                    album.images.first().map(|img| AlbumArt {
                        artist_name: artist.name.clone(),
                        album_name: album.name.clone(),
                        image_url: img.url.clone(),
                        released_at: album.release_date.clone(),
                    })
                })
                .collect::<Vec<_>>();
            Ok::<_, anyhow::Error>(art)
        });
        tasks.push(task);
    }

    let mut covers = Vec::new();
    for task in futures::future::join_all(tasks).await {
        let art = task.map_err(|e| anyhow::anyhow!("拉取专辑任务执行失败: {}", e))??;
        covers.extend(art);
    }

    covers.truncate(MAX_COVERS);
    info!("共收集 {} 张专辑封面", covers.len());
    Ok(covers)
}
