use reqwest::{Client, Error as RequestError};
use tracing::{instrument, Level};
use url::Url;

use super::{fetch_page, make_client};
use crate::{config::PortalConfig, error::Error, parse::LoginTokens};

const INDEX_FIELD: &str = "ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$txtIdent";
const PASSWORD_FIELD: &str = "ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$txtHaslo";
const ROLE_FIELD: &str = "ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$rbKto";
const SUBMIT_FIELD: &str = "ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$butLoguj";
const ROLE_STUDENT: &str = "student";
const SUBMIT_LABEL: &str = "Zaloguj";

/// Label of the logout link, only rendered for a logged-in user.
const LOGGED_IN_MARKER: &str = "Wyloguj";

/// A logged-in portal session. Its cookies die with it, so every check starts
/// from a fresh login.
#[derive(Debug)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Logs in with the index and password from `portal`.
    ///
    /// The portal answers a bad login with a normal 200 page, so success is
    /// judged only by the logout link appearing in the response.
    #[instrument(skip(portal), fields(login_url = %portal.login_url()), level = Level::TRACE)]
    pub async fn authenticate(portal: &PortalConfig) -> crate::Result<Self> {
        let client = make_client()?;
        let login_page = fetch_page(&client, portal.login_url()).await?;
        let tokens = LoginTokens::from_page(&login_page)?;

        let form = [
            ("__VIEWSTATE", tokens.view_state()),
            ("__VIEWSTATEGENERATOR", tokens.view_state_generator()),
            (INDEX_FIELD, portal.index()),
            (PASSWORD_FIELD, portal.password()),
            (ROLE_FIELD, ROLE_STUDENT),
            (SUBMIT_FIELD, SUBMIT_LABEL),
        ];
        let body = client
            .post(portal.login_url().clone())
            .form(&form)
            .send()
            .await?
            .text()
            .await?;

        if body.contains(LOGGED_IN_MARKER) {
            log::debug!("Logged in to the portal as {}", portal.index());
            Ok(Self { client })
        } else {
            Err(Error::AuthRejected)
        }
    }

    pub async fn grades_page(&self, url: &Url) -> Result<String, RequestError> {
        fetch_page(&self.client, url).await
    }
}
