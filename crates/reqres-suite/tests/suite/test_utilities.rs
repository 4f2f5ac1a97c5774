use reqres_client::{ClientConfig, ReqresClient};
use serde_json::{Map, Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOTAL_RECORDS: u64 = 12;
pub const PER_PAGE: u64 = 6;
pub const LOGIN_TOKEN: &str = "QpwL5tke4Pnpja7X4";

/// Free-tier key the public deployment expects on every request.
pub const PUBLIC_API_KEY: &str = "reqres-free-v1";

/// In-process stand-in for the reqres API, mounted on a wiremock server.
pub struct ReqresEmulator {
    next_id: AtomicU64,
    numeric_ids: bool,
    reject_creates: bool,
}

impl Default for ReqresEmulator {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ReqresEmulator {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            numeric_ids: false,
            reject_creates: false,
        }
    }

    /// Hand out ids as JSON numbers instead of strings.
    pub fn numeric_ids(mut self) -> Self {
        self.numeric_ids = true;
        self
    }

    /// Answer every `POST /users` with a 500.
    pub fn rejecting_creates(mut self) -> Self {
        self.reject_creates = true;
        self
    }

    fn users(&self, request: &Request, rest: &[&str]) -> ResponseTemplate {
        let method = request.method.as_str();
        match (method, rest) {
            ("GET", []) => {
                let page = query_u64(request, "page").unwrap_or(1);
                ResponseTemplate::new(200).set_body_json(page_of(page, user_record))
            }
            ("POST", []) => {
                if self.reject_creates {
                    return ResponseTemplate::new(500).set_body_string("Internal Server Error");
                }
                match validated_user(request) {
                    Ok(mut body) => {
                        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                        let id = if self.numeric_ids {
                            json!(id)
                        } else {
                            json!(id.to_string())
                        };
                        body.insert("id".to_string(), id);
                        body.insert("createdAt".to_string(), json!(timestamp()));
                        ResponseTemplate::new(201).set_body_json(Value::Object(body))
                    }
                    Err(response) => response,
                }
            }
            ("GET", [id]) => match id.parse::<u64>() {
                Ok(id) if (1..=TOTAL_RECORDS).contains(&id) => {
                    ResponseTemplate::new(200).set_body_json(single(user_record(id)))
                }
                _ => not_found(),
            },
            ("PUT" | "PATCH", [_]) => match validated_user(request) {
                Ok(mut body) => {
                    body.insert("updatedAt".to_string(), json!(timestamp()));
                    ResponseTemplate::new(200).set_body_json(Value::Object(body))
                }
                Err(response) => response,
            },
            ("DELETE", [_]) => ResponseTemplate::new(204),
            _ => not_found(),
        }
    }

    fn resources(&self, request: &Request, rest: &[&str]) -> ResponseTemplate {
        match (request.method.as_str(), rest) {
            ("GET", []) => {
                let page = query_u64(request, "page").unwrap_or(1);
                ResponseTemplate::new(200).set_body_json(page_of(page, resource_record))
            }
            ("GET", [id]) => match id.parse::<u64>() {
                Ok(id) if (1..=TOTAL_RECORDS).contains(&id) => {
                    ResponseTemplate::new(200).set_body_json(single(resource_record(id)))
                }
                _ => not_found(),
            },
            _ => not_found(),
        }
    }

    fn credentials(&self, request: &Request, register: bool) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let email = body.get("email").and_then(Value::as_str);
        let password = body.get("password").and_then(Value::as_str);

        match (email, password) {
            (None, _) => bad_request("Missing email or username"),
            (Some(_), None) => bad_request("Missing password"),
            (Some(_), Some(_)) if register => {
                ResponseTemplate::new(200).set_body_json(json!({"id": 4, "token": LOGIN_TOKEN}))
            }
            (Some(_), Some(_)) => {
                ResponseTemplate::new(200).set_body_json(json!({"token": LOGIN_TOKEN}))
            }
        }
    }
}

impl Respond for ReqresEmulator {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request
            .url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["api", "users", rest @ ..] => self.users(request, rest),
            ["api", "unknown", rest @ ..] => self.resources(request, rest),
            ["api", "register"] if request.method.as_str() == "POST" => {
                self.credentials(request, true)
            }
            ["api", "login"] if request.method.as_str() == "POST" => {
                self.credentials(request, false)
            }
            _ => not_found(),
        }
    }
}

fn query_u64(request: &Request, key: &str) -> Option<u64> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

/// Mirrors reqres: names and jobs must be strings when present.
fn validated_user(request: &Request) -> Result<Map<String, Value>, ResponseTemplate> {
    let body = match serde_json::from_slice::<Value>(&request.body) {
        Ok(Value::Object(map)) => map,
        _ => return Err(bad_request("Body must be a JSON object")),
    };

    for field in ["name", "job"] {
        if let Some(value) = body.get(field) {
            if !value.is_string() {
                return Err(ResponseTemplate::new(422)
                    .set_body_json(json!({"error": format!("'{field}' must be a string")})));
            }
        }
    }

    Ok(body)
}

fn page_of(page: u64, record: fn(u64) -> Value) -> Value {
    let first = (page.saturating_sub(1)) * PER_PAGE + 1;
    let data: Vec<Value> = (first..first + PER_PAGE)
        .filter(|id| *id <= TOTAL_RECORDS)
        .map(record)
        .collect();

    json!({
        "page": page,
        "per_page": PER_PAGE,
        "total": TOTAL_RECORDS,
        "total_pages": TOTAL_RECORDS.div_ceil(PER_PAGE),
        "data": data,
    })
}

fn single(record: Value) -> Value {
    json!({ "data": record })
}

fn user_record(id: u64) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@reqres.in"),
        "first_name": format!("First{id}"),
        "last_name": format!("Last{id}"),
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg"),
    })
}

fn resource_record(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("colour {id}"),
        "year": 2000 + id,
        "color": format!("#{:06X}", id * 0x10_1010),
        "pantone_value": format!("{}-{:04}", 10 + id, id * 7),
    })
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({}))
}

fn bad_request(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({ "error": error }))
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

// =============================================================================
// TEST SERVER
// =============================================================================

pub struct TestServer {
    pub server: MockServer,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ReqresEmulator::new()).await
    }

    pub async fn start_with(emulator: ReqresEmulator) -> Self {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(emulator)
            .mount(&server)
            .await;
        Self { server }
    }

    /// A server with no routes: every request gets wiremock's default 404.
    pub async fn start_empty() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn client(&self) -> ReqresClient {
        ReqresClient::new(ClientConfig::new(self.base_url())).expect("valid mock server URL")
    }

    /// Number of requests seen with this method and exact path (no query).
    pub async fn count_requests(&self, method: &str, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .count()
    }

    pub async fn count_method(&self, method: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == method)
            .count()
    }
}

#[allow(dead_code)]
pub fn live_client() -> ReqresClient {
    reqres_suite::telemetry::init();
    ReqresClient::new(ClientConfig::default().with_api_key(PUBLIC_API_KEY))
        .expect("default base URL is valid")
}
