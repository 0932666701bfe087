//! Logs in to the portal, downloads the grades page and parses it into a
//! snapshot of every grade currently listed.
use crate::{
    config::PortalConfig,
    error::Error,
    fetch::Session,
    grade::GradeRecord,
    parse::{self, grades_from_page},
};

#[derive(Debug, Clone)]
pub struct Scraper {
    portal: PortalConfig,
}

impl Scraper {
    pub const fn new(portal: PortalConfig) -> Self {
        Self { portal }
    }

    /// Returns the grades currently listed on the portal.
    ///
    /// Every failure (network, rejected login, changed markup) is logged and
    /// yields an empty snapshot, which callers treat as "nothing new".
    pub async fn fetch(&self) -> Vec<GradeRecord> {
        match self.try_fetch().await {
            Ok(grades) => {
                log::info!("Fetched {} grades from the portal", grades.len());
                grades
            }
            Err(Error::AuthRejected) => {
                log::error!("The portal rejected the login, check the credentials");
                Vec::new()
            }
            Err(Error::Parse(e @ parse::Error::HtmlParse(_))) => {
                log::error!("No grade data available: {e}");
                Vec::new()
            }
            Err(e) => {
                log::error!("Failed to fetch grades: {e}");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> crate::Result<Vec<GradeRecord>> {
        let page = {
            let session = Session::authenticate(&self.portal).await?;
            session.grades_page(self.portal.grade_url()).await?
        };
        Ok(grades_from_page(&page)?)
    }
}
