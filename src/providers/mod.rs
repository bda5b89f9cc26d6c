pub mod redmine;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::model::issue::Issue;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Label used in logs and error messages. Must not contain credentials.
    fn name(&self) -> &str;
    async fn fetch_items(&self) -> Result<Vec<Issue>, FetchError>;
}


/// One provider per configured source, in configured order.
pub fn create_providers(config: &AppConfig) -> Vec<Box<dyn Provider>> {
    config
        .redmine_urls
        .iter()
        .map(|source| {
            Box::new(redmine::RedmineProvider::new(source.clone())) as Box<dyn Provider>
        })
        .collect()
}
