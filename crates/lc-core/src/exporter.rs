//! Scrape/health HTTP surface.
//!
//! Serves `/metrics` (text exposition of the forecast gauge) and
//! `/healthz` on a background thread. Liveness does not depend on loop
//! iteration success: once the server is up, `/healthz` is always ok and
//! `/metrics` renders whatever the publisher currently holds — a failed
//! iteration leaves the previous value readable, it never turns into a
//! 5xx here.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

use crate::publish::ForecastGauge;

/// Handle to the running scrape server.
pub struct ScrapeServer {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
    addr: SocketAddr,
}

impl ScrapeServer {
    /// Bind and start serving on a background thread.
    pub fn start(bind: &str, port: u16, gauge: ForecastGauge) -> Result<Self, String> {
        let addr: SocketAddr = format!("{}:{}", bind, port)
            .parse()
            .map_err(|e| format!("invalid listen address: {}", e))?;

        let server = tiny_http::Server::http(addr)
            .map_err(|e| format!("failed to bind scrape server on {}: {}", addr, e))?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| "scrape server has no tcp address".to_string())?;

        info!(addr = %addr, "scrape server started");

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let thread = thread::Builder::new()
            .name("lc-scrape".to_string())
            .spawn(move || {
                serve_loop(server, &gauge, &shutdown_clone);
            })
            .map_err(|e| format!("failed to spawn scrape thread: {}", e))?;

        Ok(Self {
            shutdown,
            thread: Some(thread),
            addr,
        })
    }

    /// The bound address (useful when started with port 0 in tests).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop serving and join the thread.
    pub fn shutdown(mut self) {
        self.stop();
        info!("scrape server stopped");
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop so it can observe the flag.
        let _ = std::net::TcpStream::connect(self.addr);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ScrapeServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn serve_loop(server: tiny_http::Server, gauge: &ForecastGauge, shutdown: &AtomicBool) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        // Accept with timeout so the shutdown flag gets checked.
        let request = match server.recv_timeout(std::time::Duration::from_secs(1)) {
            Ok(Some(req)) => req,
            Ok(None) => continue,
            Err(e) => {
                if !shutdown.load(Ordering::SeqCst) {
                    error!(error = %e, "scrape server accept error");
                }
                break;
            }
        };

        if shutdown.load(Ordering::SeqCst) {
            let _ = request
                .respond(tiny_http::Response::from_string("shutting down").with_status_code(503));
            break;
        }

        let url = request.url().to_string();
        debug!(method = %request.method(), url = %url, "scrape request");

        match url.as_str() {
            "/metrics" | "/metrics/" => match gauge.render() {
                Ok(body) => {
                    let response = tiny_http::Response::from_string(body).with_header(
                        "Content-Type: text/plain; version=0.0.4; charset=utf-8"
                            .parse::<tiny_http::Header>()
                            .unwrap(),
                    );
                    if let Err(e) = request.respond(response) {
                        warn!(error = %e, "failed to send metrics response");
                    }
                }
                Err(e) => {
                    error!(error = %e, "failed to render metrics");
                    let _ = request.respond(
                        tiny_http::Response::from_string(format!("error: {}", e))
                            .with_status_code(500),
                    );
                }
            },
            "/healthz" | "/health" => {
                let _ = request.respond(tiny_http::Response::from_string("ok"));
            }
            _ => {
                let _ = request
                    .respond(tiny_http::Response::from_string("not found").with_status_code(404));
            }
        }
    }
}
