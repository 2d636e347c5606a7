use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::error::HttpError;

/// Serves every connection with `status_line` and a two-byte body.
pub(crate) async fn spawn_server(status_line: &'static str) -> Result<(String, JoinHandle<()>), HttpError> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    let handle = tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buffer = [0u8; 4096];
                if stream.read(&mut buffer).await.is_err() {
                    return;
                }
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
                    status_line
                );
                if stream.write_all(response.as_bytes()).await.is_err() {
                    return;
                }
                drop(stream.shutdown().await);
            });
        }
    });

    Ok((format!("http://{}/", addr), handle))
}

pub(crate) async fn closed_port_url() -> Result<String, HttpError> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}
