//! Mock FastHR API server for testing
//!
//! Serves canned HR data over a plain `TcpListener` so the request pipeline,
//! login flow and endpoint services can be exercised without a backend.
//!
//! Every request is recorded (method, path, query, headers, body) so tests
//! can assert on exactly what went over the wire. Responses for a path can be
//! replaced at runtime with [`MockHrServer::respond_with`], and
//! [`MockHrServer::revoke_tokens`] makes every authenticated endpoint answer
//! 401 from then on.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::NaiveDate;
use serde_json::{json, Value as JsonValue};
use url::Url;

/// Mock FastHR server for testing
pub struct MockHrServer {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<MockState>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// A user the mock login endpoint accepts
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub employee_id: i64,
    pub email: String,
    pub password: String,
    pub token: String,
    pub name: String,
    pub role: String,
}

/// Configuration for the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub accounts: Vec<MockAccount>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl MockConfig {
    pub const ADMIN_EMAIL: &'static str = "admin@fasthr.local";
    pub const ADMIN_PASSWORD: &'static str = "admin123";
    pub const ADMIN_TOKEN: &'static str = "mock-admin-token";
    pub const EMPLOYEE_EMAIL: &'static str = "ayse@fasthr.local";
    pub const EMPLOYEE_PASSWORD: &'static str = "ayse123";
    pub const EMPLOYEE_TOKEN: &'static str = "mock-employee-token";
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            accounts: vec![
                MockAccount {
                    employee_id: 1,
                    email: Self::ADMIN_EMAIL.to_string(),
                    password: Self::ADMIN_PASSWORD.to_string(),
                    token: Self::ADMIN_TOKEN.to_string(),
                    name: "Admin User".to_string(),
                    role: "admin".to_string(),
                },
                MockAccount {
                    employee_id: 2,
                    email: Self::EMPLOYEE_EMAIL.to_string(),
                    password: Self::EMPLOYEE_PASSWORD.to_string(),
                    token: Self::EMPLOYEE_TOKEN.to_string(),
                    name: "Ayşe Yılmaz".to_string(),
                    role: "employee".to_string(),
                },
            ],
            delay_ms: 0,
        }
    }
}

/// One request as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path without the query string
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Header names are lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn json_body(&self) -> JsonValue {
        serde_json::from_str(&self.body).unwrap_or(JsonValue::Null)
    }
}

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    overrides: HashMap<String, (u16, String)>,
    revoked: bool,
}

impl MockHrServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(Mutex::new(MockState::default()));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let state_clone = state.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &state);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests received for one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    /// Answer every request to `path` with a fixed status and body
    pub fn respond_with(&self, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Reject every bearer token from now on
    pub fn revoke_tokens(&self) {
        self.state.lock().unwrap().revoked = true;
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockHrServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, state: &Mutex<MockState>) {
    // The accepted socket inherits non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"detail": "Invalid request"}"#);
        return;
    };

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let (override_response, revoked) = {
        let mut state = state.lock().unwrap();
        state.requests.push(request.clone());
        (state.overrides.get(&request.path).cloned(), state.revoked)
    };

    if let Some((status, body)) = override_response {
        send_response(&mut stream, status, &body);
        return;
    }

    let (status, body) = route(&request, config, revoked);
    send_response(&mut stream, status, &body.to_string());
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut raw = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        raw.extend_from_slice(&buffer[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while raw.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buffer[..n]);
    }

    let body_end = raw.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&raw[header_end..body_end]).to_string();

    let url = Url::parse(&format!("http://mock{}", target)).ok()?;
    let query = url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Some(RecordedRequest {
        method,
        path: url.path().to_string(),
        query,
        headers,
        body,
    })
}

fn route(request: &RecordedRequest, config: &MockConfig, revoked: bool) -> (u16, JsonValue) {
    let method = request.method.as_str();
    let segments: Vec<&str> = request
        .path
        .trim_matches('/')
        .split('/')
        .collect();

    if method == "POST" && request.path == "/api/auth/login" {
        return login(request, config);
    }

    let account = request
        .header("authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| config.accounts.iter().find(|a| a.token == token));

    let account = match account {
        Some(account) if !revoked => account,
        _ => return (401, json!({"detail": "Could not validate credentials"})),
    };

    match (method, segments.as_slice()) {
        ("GET", ["api", "auth", "me"]) => (
            200,
            json!({"email": account.email, "name": account.name, "role": account.role}),
        ),

        ("GET", ["api", "dashboard", "stats"]) => (
            200,
            json!({
                "total_employees": 42,
                "on_leave_today": 3,
                "pending_requests": 5,
                "birthdays_this_month": 2
            }),
        ),

        ("GET", ["api", "employees"]) => (200, JsonValue::Array(mock_employees())),
        ("GET", ["api", "employees", "on-leave"]) => (
            200,
            JsonValue::Array(
                mock_employees()
                    .into_iter()
                    .filter(|e| e["is_on_leave"] == json!(true))
                    .collect(),
            ),
        ),
        ("GET", ["api", "employees", id]) => match id.parse::<i64>() {
            Ok(id) if (1..=3).contains(&id) => (200, mock_employee_detail(id)),
            _ => (404, json!({"detail": "Employee not found"})),
        },

        ("GET", ["api", "leaves"]) => (
            200,
            filter_by_status(mock_leaves(), request.query_param("status")),
        ),
        ("POST", ["api", "leaves"]) => (201, created_leave(request, account)),
        ("GET", ["api", "leaves", "balances", employee_id]) => (
            200,
            json!({
                "employee_id": employee_id.parse::<i64>().unwrap_or(0),
                "annual": 14,
                "annual_used": 5,
                "sick": 10,
                "sick_used": 1
            }),
        ),
        ("GET", ["api", "leaves", id]) => find_by_id(mock_leaves(), id, "Leave request not found"),
        ("PATCH", ["api", "leaves", id]) => updated(mock_leaves(), id, request, "Leave request not found"),

        ("GET", ["api", "expenses"]) => (
            200,
            filter_by_status(mock_expenses(), request.query_param("status")),
        ),
        ("POST", ["api", "expenses"]) => (201, created_expense(request, account)),
        ("GET", ["api", "expenses", "summary", employee_id]) => (
            200,
            json!({
                "employee_id": employee_id.parse::<i64>().unwrap_or(0),
                "total": 1450.5,
                "pending": 1,
                "approved": 2,
                "rejected": 0
            }),
        ),
        ("PATCH", ["api", "expenses", id]) => updated(mock_expenses(), id, request, "Expense not found"),

        _ => (404, json!({"detail": "Not Found"})),
    }
}

fn login(request: &RecordedRequest, config: &MockConfig) -> (u16, JsonValue) {
    let body = request.json_body();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match config
        .accounts
        .iter()
        .find(|a| a.email == email && a.password == password)
    {
        Some(account) => (
            200,
            json!({"access_token": account.token, "token_type": "bearer"}),
        ),
        None => (401, json!({"detail": "Incorrect email or password"})),
    }
}

fn filter_by_status(items: Vec<JsonValue>, status: Option<String>) -> JsonValue {
    match status {
        Some(status) => JsonValue::Array(
            items
                .into_iter()
                .filter(|item| item["status"] == json!(status))
                .collect(),
        ),
        None => JsonValue::Array(items),
    }
}

fn find_by_id(items: Vec<JsonValue>, id: &str, missing: &str) -> (u16, JsonValue) {
    let id: i64 = id.parse().unwrap_or(-1);
    match items.into_iter().find(|item| item["id"] == json!(id)) {
        Some(item) => (200, item),
        None => (404, json!({ "detail": missing })),
    }
}

fn updated(
    items: Vec<JsonValue>,
    id: &str,
    request: &RecordedRequest,
    missing: &str,
) -> (u16, JsonValue) {
    let (status, mut item) = find_by_id(items, id, missing);
    if status != 200 {
        return (status, item);
    }

    let patch = request.json_body();
    item["status"] = patch["status"].clone();
    if let Some(reason) = patch.get("rejection_reason") {
        item["rejection_reason"] = reason.clone();
    }
    (200, item)
}

fn created_leave(request: &RecordedRequest, account: &MockAccount) -> JsonValue {
    let body = request.json_body();
    let parse = |key: &str| {
        body[key]
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    };
    let days = match (parse("start_date"), parse("end_date")) {
        (Some(start), Some(end)) => (end - start).num_days() + 1,
        _ => 0,
    };

    json!({
        "id": 10,
        "employee_id": account.employee_id,
        "employee_name": account.name,
        "leave_type": body["leave_type"],
        "start_date": body["start_date"],
        "end_date": body["end_date"],
        "days": days,
        "reason": body["reason"],
        "status": "Bekliyor",
        "created_at": "2026-10-18T09:00:00"
    })
}

fn created_expense(request: &RecordedRequest, account: &MockAccount) -> JsonValue {
    let body = request.json_body();
    json!({
        "id": 20,
        "employee_id": account.employee_id,
        "employee_name": account.name,
        "expense_type": body["expense_type"],
        "amount": body["amount"],
        "date": body["date"],
        "description": body["description"],
        "receipt_url": body.get("receipt_url").cloned().unwrap_or(JsonValue::Null),
        "status": "Bekliyor",
        "created_at": "2026-10-18T09:00:00"
    })
}

fn mock_employees() -> Vec<JsonValue> {
    vec![
        json!({
            "id": 1,
            "full_name": "Admin User",
            "title": "HR Director",
            "avatar_url": "AU",
            "is_on_leave": false,
            "department": "İnsan Kaynakları"
        }),
        json!({
            "id": 2,
            "full_name": "Ayşe Yılmaz",
            "title": "Software Engineer",
            "avatar_url": "https://cdn.fasthr.local/avatars/2.png",
            "is_on_leave": true,
            "department": "Engineering"
        }),
        json!({
            "id": 3,
            "full_name": "Mehmet Demir",
            "title": "Accountant",
            "avatar_url": null,
            "is_on_leave": false,
            "department": "Finance"
        }),
    ]
}

fn mock_employee_detail(id: i64) -> JsonValue {
    let mut detail = mock_employees()
        .into_iter()
        .find(|e| e["id"] == json!(id))
        .unwrap_or_else(|| json!({}));

    detail["email"] = json!(format!("employee{}@fasthr.local", id));
    detail["phone"] = json!("+90 555 000 00 00");
    detail["start_date"] = json!("2021-03-15");
    detail["address"] = json!("İstanbul");
    detail["birth_date"] = json!("1990-10-02");
    detail["emergency_contact"] = JsonValue::Null;
    detail["salary"] = json!(45000.0);
    detail
}

fn mock_leaves() -> Vec<JsonValue> {
    vec![
        json!({
            "id": 1,
            "employee_id": 2,
            "employee_name": "Ayşe Yılmaz",
            "leave_type": "Yıllık İzin",
            "start_date": "2026-10-14",
            "end_date": "2026-10-20",
            "days": 7,
            "reason": "Tatil",
            "status": "Onaylandı",
            "created_at": "2026-09-30T10:15:00"
        }),
        json!({
            "id": 2,
            "employee_id": 3,
            "employee_name": "Mehmet Demir",
            "leave_type": "Hastalık İzni",
            "start_date": "2026-11-02",
            "end_date": "2026-11-03",
            "days": 2,
            "reason": "Doktor randevusu",
            "status": "Bekliyor",
            "created_at": "2026-10-17T08:45:00"
        }),
    ]
}

fn mock_expenses() -> Vec<JsonValue> {
    vec![
        json!({
            "id": 1,
            "employee_id": 2,
            "employee_name": "Ayşe Yılmaz",
            "expense_type": "Yol",
            "amount": 250.5,
            "date": "2026-10-10",
            "description": "Taksi",
            "receipt_url": null,
            "status": "Bekliyor",
            "created_at": "2026-10-10T18:00:00"
        }),
        json!({
            "id": 2,
            "employee_id": 3,
            "employee_name": "Mehmet Demir",
            "expense_type": "Konaklama",
            "amount": "1200.00",
            "date": "2026-09-21",
            "description": "Ankara otel",
            "receipt_url": "https://cdn.fasthr.local/receipts/2.pdf",
            "status": "Onaylandı",
            "created_at": "2026-09-22T09:30:00"
        }),
    ]
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockHrServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_route_rejects_missing_token() {
        let request = RecordedRequest {
            method: "GET".to_string(),
            path: "/api/employees".to_string(),
            query: vec![],
            headers: vec![],
            body: String::new(),
        };
        let (status, _) = route(&request, &MockConfig::default(), false);
        assert_eq!(status, 401);
    }

    #[test]
    fn test_route_filters_by_status() {
        let request = RecordedRequest {
            method: "GET".to_string(),
            path: "/api/leaves".to_string(),
            query: vec![("status".to_string(), "Bekliyor".to_string())],
            headers: vec![(
                "authorization".to_string(),
                format!("Bearer {}", MockConfig::ADMIN_TOKEN),
            )],
            body: String::new(),
        };
        let (status, body) = route(&request, &MockConfig::default(), false);
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
