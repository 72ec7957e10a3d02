//! 测试用的本地 HTTP 桩服务

use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// 起一个处理固定次数请求的 HTTP 服务，读完整个请求后返回固定响应体
///
/// 返回可直接拼接路径的 base URL（http://127.0.0.1:端口）。
pub async fn serve_responses(
    status_line: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
    hits: usize,
) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for _ in 0..hits {
            let (mut socket, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => return,
            };

            // 按 Content-Length 读完请求头和请求体，避免过早应答
            let mut buf = vec![0u8; 64 * 1024];
            let mut read = 0;
            loop {
                if read == buf.len() {
                    buf.resize(buf.len() * 2, 0);
                }
                let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                read += n;
                if let Some(pos) = find_subslice(&buf[..read], b"\r\n\r\n") {
                    let header = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
                    let content_length = header
                        .lines()
                        .find_map(|line| {
                            line.strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if read - (pos + 4) >= content_length {
                        break;
                    }
                }
            }

            let header = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                content_type,
                body.len()
            );
            let _ = socket.write_all(header.as_bytes()).await;
            let _ = socket.write_all(&body).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}
