// NVP Test Server
//
// Spawns a real HTTP server on a random port that speaks the NVP wire format.
// Responses are canned per METHOD; every posted body is decoded and recorded
// so tests can assert on exactly what the client sent.

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

pub use actix_test::TestServer;

/// Body returned for a METHOD nothing was registered for
const UNKNOWN_METHOD: &str = "ACK=Failure&L_ERRORCODE0=81002\
    &L_SHORTMESSAGE0=Unspecified%20Method&L_LONGMESSAGE0=Method%20Specified%20is%20not%20Supported\
    &L_SEVERITYCODE0=Error";

#[derive(Default)]
struct MockState {
    responses: HashMap<String, (u16, String)>,
    requests: Vec<BTreeMap<String, String>>,
}

/// Canned responses and recorded requests shared with the server
#[derive(Clone, Default)]
pub struct MockNvp {
    state: Arc<Mutex<MockState>>,
}

impl MockNvp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with HTTP 200 and `body`
    pub fn respond(&self, method: &str, body: &str) -> &Self {
        self.respond_with_status(method, 200, body)
    }

    pub fn respond_with_status(&self, method: &str, status: u16, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(method.to_string(), (status, body.to_string()));
        self
    }

    /// Every request received so far, decoded, in arrival order
    pub fn requests(&self) -> Vec<BTreeMap<String, String>> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Most recent request for `method`
    pub fn last_request(&self, method: &str) -> Option<BTreeMap<String, String>> {
        self.requests()
            .into_iter()
            .rev()
            .find(|params| params.get("METHOD").map(String::as_str) == Some(method))
    }

    pub fn count_for(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|params| params.get("METHOD").map(String::as_str) == Some(method))
            .count()
    }
}

async fn nvp_endpoint(mock: web::Data<MockNvp>, body: web::Bytes) -> HttpResponse {
    let params: Vec<(String, String)> = serde_urlencoded::from_bytes(&body).unwrap_or_default();
    let params: BTreeMap<String, String> = params.into_iter().collect();
    let method = params.get("METHOD").cloned().unwrap_or_default();

    let mut state = mock.state.lock().unwrap();
    state.requests.push(params);

    let (status, body) = state
        .responses
        .get(&method)
        .cloned()
        .unwrap_or_else(|| (200, UNKNOWN_METHOD.to_string()));

    HttpResponse::build(StatusCode::from_u16(status).unwrap())
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

/// Spawn an NVP server backed by `mock`; it listens on `/nvp`
///
/// # Example
/// ```no_run
/// #[actix_web::test]
/// async fn test_token() {
///     let mock = MockNvp::new();
///     mock.respond("SetExpressCheckout", SET_EXPRESS_CHECKOUT_SUCCESS);
///     let srv = spawn_nvp_server(&mock);
///     let config = test_config(&srv.url("/nvp"));
/// }
/// ```
pub fn spawn_nvp_server(mock: &MockNvp) -> TestServer {
    let mock = mock.clone();
    actix_test::start(move || {
        App::new()
            .app_data(web::Data::new(mock.clone()))
            .route("/nvp", web::post().to(nvp_endpoint))
    })
}
