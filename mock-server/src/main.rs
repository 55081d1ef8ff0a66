use tokio::net::TcpListener;

/// Serves the echo endpoints on `127.0.0.1:$PORT` (default 3000).
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    println!("echo server on http://{}", listener.local_addr()?);
    mock_server::run(listener).await
}
