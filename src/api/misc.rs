use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{
    CategoriesResponse, Category, Episode, ExploreShow, GooglePlayCategoriesResponse,
    GooglePlayCategory, Language, LanguagesResponse,
};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

fn locale_params(locale: Option<&str>) -> Params {
    let mut params = Params::new();
    params.set_opt("c", locale.filter(|l| !l.is_empty()));
    params
}

impl<C: HttpClient> Client<C> {
    /// Show categories, localized when `locale` (e.g. "it_IT") is given
    pub async fn get_show_categories(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<Category>, ClientError> {
        let response: CategoriesResponse = self
            .get("/show-categories", &locale_params(locale))
            .await?;
        Ok(response.categories)
    }

    pub async fn get_googleplay_categories(&self) -> Result<Vec<GooglePlayCategory>, ClientError> {
        let response: GooglePlayCategoriesResponse =
            self.get("/googleplay-categories", &Params::new()).await?;
        Ok(response.googleplay_categories)
    }

    /// Show languages ordered by code
    pub async fn get_show_languages(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<Language>, ClientError> {
        let response: LanguagesResponse = self
            .get("/show-languages", &locale_params(locale))
            .await?;
        Ok(response.into_sorted())
    }

    pub async fn get_episodes_by_tag(
        &self,
        tag: &str,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        let tag = urlencoding::encode(tag);
        self.get_page(&format!("/tags/{tag}/episodes"), &pagination.to_params())
            .await
    }

    /// Shows featured in an explore category
    pub async fn get_category_shows(
        &self,
        category_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<ExploreShow>, ClientError> {
        self.get_page(
            &format!("/explore/categories/{category_id}/items"),
            &pagination.to_params(),
        )
        .await
    }
}
