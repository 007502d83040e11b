//! Minimal canned-response HTTP server for fetcher integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Running stub server.
#[allow(dead_code)]
pub struct StubServer {
    /// Base URL without trailing slash.
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl StubServer {
    /// Number of requests fully read by the server.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server answering every request with `status_line` and `body`.
#[allow(dead_code)]
pub async fn serve(status_line: &'static str, body: &'static str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub server should bind");
    let address = listener.local_addr().expect("stub server address");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            read_request(&mut stream).await;
            counter.fetch_add(1, Ordering::SeqCst);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    StubServer {
        base_url: format!("http://{address}"),
        hits,
    }
}

/// Starts a server that accepts connections and never answers.
#[allow(dead_code)]
pub async fn serve_silently() -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub server should bind");
    let address = listener.local_addr().expect("stub server address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    StubServer {
        base_url: format!("http://{address}"),
        hits: Arc::new(AtomicUsize::new(0)),
    }
}

/// Returns a base URL on which nothing is listening.
#[allow(dead_code)]
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe listener should bind");
    let address = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{address}")
}

async fn read_request(stream: &mut TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];

    let header_end = loop {
        if let Some(position) = find(&buffer, b"\r\n\r\n") {
            break position + 4;
        }
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => buffer.extend_from_slice(&chunk[..read]),
        }
    };

    let headers = String::from_utf8_lossy(&buffer[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok());
    let chunked = headers.contains("transfer-encoding: chunked");

    loop {
        let body = &buffer[header_end..];
        let complete = match content_length {
            Some(length) => body.len() >= length,
            None if chunked => find(body, b"0\r\n\r\n").is_some(),
            None => true,
        };
        if complete {
            return;
        }
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => buffer.extend_from_slice(&chunk[..read]),
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
