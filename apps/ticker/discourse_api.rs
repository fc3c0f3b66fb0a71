use crate::{
    config::{TickerConfig, TopicId},
    error::Result,
    models::{
        posts::{Post, PostResponse},
        settings::ThemeSettingUpdate,
    },
};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT},
};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The two forum calls the ticker needs. Every failure is fatal to the run.
#[async_trait]
pub trait Forum {
    /// All posts of a topic, including their raw markdown.
    async fn fetch_posts(&self, topic: &TopicId) -> Result<Vec<Post>>;

    /// Overwrites one setting of a theme component.
    async fn update_theme_setting(
        &self,
        component_id: &str,
        name: &str,
        value: &str,
    ) -> Result<()>;
}

#[derive(Clone)]
pub struct DiscourseApi {
    client: Client,
    pub base_url: String,
}

impl DiscourseApi {
    pub fn new(config: &TickerConfig) -> Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: &TickerConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::default_headers(config)?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn default_headers(
        config: &TickerConfig,
    ) -> std::result::Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("news-ticker/0.1 reqwest/0.12"),
        );
        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);
        headers.insert("Api-Key", api_key);
        headers.insert("Api-Username", HeaderValue::from_str(&config.api_username)?);
        Ok(headers)
    }
}

#[async_trait]
impl Forum for DiscourseApi {
    #[instrument(skip(self, topic), fields(topic = %topic))]
    async fn fetch_posts(&self, topic: &TopicId) -> Result<Vec<Post>> {
        let url = format!("{}/t/{}/posts.json", self.base_url, topic);
        debug!(url, "Fetching posts");

        let response: PostResponse = self
            .client
            .get(&url)
            .query(&[("include_raw", "true")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let posts = response.post_stream.posts;
        info!(posts = posts.len(), "Fetched posts");
        Ok(posts)
    }

    #[instrument(skip(self, value))]
    async fn update_theme_setting(
        &self,
        component_id: &str,
        name: &str,
        value: &str,
    ) -> Result<()> {
        let url = format!("{}/admin/themes/{}/setting.json", self.base_url, component_id);
        debug!(url, "Updating theme setting");

        self.client
            .put(&url)
            .json(&ThemeSettingUpdate { name, value })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
