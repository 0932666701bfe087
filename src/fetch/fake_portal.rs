//! A local stand-in for the portal: an ASP.NET-style login form guarded by
//! hidden tokens and a grades page that needs the auth cookie set by a
//! successful login.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::get,
    Form, Router,
};
use tokio::net::TcpListener;
use url::Url;

use crate::config::PortalConfig;

pub const INDEX: &str = "12345";
pub const PASSWORD: &str = "correct horse";

pub const LOGIN_PAGE: &str = include_str!("../parse/html_examples/login.html");
pub const GRADES_PAGE: &str = include_str!("../parse/html_examples/grades.html");
const SESSION_EXPIRED_PAGE: &str = "<html><body><p>Sesja wygasła. Zaloguj się ponownie.</p></body></html>";
const LOGIN_FAILED_PAGE: &str = "<html><body><p>Błędny login lub hasło.</p></body></html>";

const SESSION_COOKIE: &str = "ASP.NET_SessionId=s3ss10n";
const AUTH_COOKIE: &str = ".ASPXAUTH=4uth";

struct PortalState {
    grades_page: Mutex<String>,
    logins: Mutex<usize>,
}

pub struct FakePortal {
    addr: SocketAddr,
    state: Arc<PortalState>,
}

impl FakePortal {
    pub async fn spawn() -> Self {
        Self::spawn_with_grades(GRADES_PAGE).await
    }

    pub async fn spawn_with_grades(grades_page: &str) -> Self {
        let state = Arc::new(PortalState {
            grades_page: Mutex::new(grades_page.to_owned()),
            logins: Mutex::new(0),
        });
        let app = Router::new()
            .route("/WU/", get(login_page).post(login))
            .route("/WU/OcenyP.aspx", get(grades))
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Self { addr, state }
    }

    pub fn login_url(&self) -> Url {
        format!("http://{}/WU/", self.addr).parse().unwrap()
    }

    pub fn grade_url(&self) -> Url {
        format!("http://{}/WU/OcenyP.aspx", self.addr).parse().unwrap()
    }

    pub fn config(&self, password: &str) -> PortalConfig {
        PortalConfig::new(self.login_url(), self.grade_url(), INDEX, password)
    }

    pub fn set_grades_page(&self, html: &str) {
        *self.state.grades_page.lock().unwrap() = html.to_owned();
    }

    /// Number of accepted logins so far.
    pub fn logins(&self) -> usize {
        *self.state.logins.lock().unwrap()
    }
}

fn has_cookie(headers: &HeaderMap, cookie: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|c| c.trim() == cookie)
}

async fn login_page() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; path=/"))],
        Html(LOGIN_PAGE),
    )
}

async fn login(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let field = |name: &str| form.get(name).map(String::as_str);
    let accepted = has_cookie(&headers, SESSION_COOKIE)
        && field("__VIEWSTATE") == Some("/wEPDwUKLTYyMzM5NTQ3Mw9kFgJmD2QWAmYPZBYCAgMPZBYC")
        && field("__VIEWSTATEGENERATOR") == Some("C2EE9ABB")
        && field("ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$txtIdent") == Some(INDEX)
        && field("ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$txtHaslo")
            == Some(PASSWORD)
        && field("ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$rbKto") == Some("student")
        && field("ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$butLoguj")
            == Some("Zaloguj");

    if accepted {
        *state.logins.lock().unwrap() += 1;
        (
            [(header::SET_COOKIE, format!("{AUTH_COOKIE}; path=/"))],
            Html(r#"<html><body><a href="Wyloguj.aspx">Wyloguj</a></body></html>"#.to_owned()),
        )
            .into_response()
    } else {
        Html(LOGIN_FAILED_PAGE).into_response()
    }
}

async fn grades(State(state): State<Arc<PortalState>>, headers: HeaderMap) -> Html<String> {
    if has_cookie(&headers, AUTH_COOKIE) {
        Html(state.grades_page.lock().unwrap().clone())
    } else {
        Html(SESSION_EXPIRED_PAGE.to_owned())
    }
}
