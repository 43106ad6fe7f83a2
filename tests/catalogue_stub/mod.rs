use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Canned catalogue answers keyed by identifier. Unknown identifiers get 404.
#[derive(Debug, Clone, Default)]
pub struct CatalogueStubConfig {
    pub records: HashMap<String, serde_json::Value>,
    pub server_errors: Vec<String>,
}

pub struct CatalogueStub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CatalogueStub {
    pub fn spawn(config: CatalogueStubConfig) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start catalogue stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/api");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                seen.lock().expect("requests lock").push(url.clone());

                let path = url.split('?').next().unwrap_or(&url);
                let Some(identifier) = path.strip_prefix("/api/DSV01/records/") else {
                    let _ = request.respond(
                        tiny_http::Response::from_string("unknown profile").with_status_code(400),
                    );
                    continue;
                };

                if config.server_errors.iter().any(|id| id == identifier) {
                    let _ = request.respond(
                        tiny_http::Response::from_string("catalogue backend unavailable")
                            .with_status_code(503),
                    );
                    continue;
                }

                let Some(record) = config.records.get(identifier) else {
                    let _ = request.respond(
                        tiny_http::Response::from_string("not found").with_status_code(404),
                    );
                    continue;
                };

                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("build header");
                let _ = request.respond(
                    tiny_http::Response::from_string(record.to_string()).with_header(header),
                );
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for CatalogueStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
