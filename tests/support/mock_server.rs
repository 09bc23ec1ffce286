use std::{
    collections::{HashMap, VecDeque},
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
};

#[derive(Clone)]
struct MockResponse {
    code: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct Routes {
    queued: HashMap<String, VecDeque<MockResponse>>,
    hits: HashMap<String, usize>,
}

/// Attendance server stand-in. Each path replays its queued responses in
/// order and keeps repeating the last one; unknown paths get a 404.
pub struct MockServer {
    base_url: String,
    routes: Arc<Mutex<Routes>>,
}

impl MockServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        let routes = Arc::new(Mutex::new(Routes::default()));
        let served = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                handle(stream, &served);
            }
        });
        Self {
            base_url: format!("http://{addr}/"),
            routes,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn enqueue_json(&self, path: &str, code: u16, body: &str) {
        self.enqueue(path, code, "application/json", body);
    }

    pub fn enqueue(&self, path: &str, code: u16, content_type: &'static str, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .queued
            .entry(path.to_string())
            .or_default()
            .push_back(MockResponse {
                code,
                content_type,
                body: body.to_string(),
            });
    }

    pub fn hits(&self, path: &str) -> usize {
        self.routes
            .lock()
            .unwrap()
            .hits
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

fn handle(stream: TcpStream, routes: &Mutex<Routes>) {
    let mut reader = BufReader::new(&stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) => break,
            Ok(_) if header == "\r\n" || header == "\n" => break,
            Ok(_) => {}
            Err(_) => return,
        }
    }
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    let response = next_response(routes, &path).unwrap_or(MockResponse {
        code: 404,
        content_type: "text/plain",
        body: "Not Found".to_string(),
    });
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.code,
        reason(response.code),
        response.content_type,
        response.body.len(),
        response.body
    );
    let mut stream = &stream;
    let _ = stream.write_all(payload.as_bytes());
    let _ = stream.flush();
}

fn next_response(routes: &Mutex<Routes>, path: &str) -> Option<MockResponse> {
    let mut routes = routes.lock().unwrap();
    *routes.hits.entry(path.to_string()).or_default() += 1;
    let queue = routes.queued.get_mut(path)?;
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

fn reason(code: u16) -> &'static str {
    match code {
        200 => "OK",
        202 => "Accepted",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
