use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Portal configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub appwrite_endpoint: String,
    pub appwrite_project_id: String,
    pub database_id: String,
    pub schools_collection_id: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            appwrite_endpoint: env::var("APPWRITE_ENDPOINT")
                .unwrap_or_else(|_| "https://sfo.cloud.appwrite.io/v1".to_string()),
            appwrite_project_id: env::var("APPWRITE_PROJECT_ID")
                .context("APPWRITE_PROJECT_ID must be set")?,
            database_id: env::var("APPWRITE_DATABASE_ID")
                .context("APPWRITE_DATABASE_ID must be set")?,
            schools_collection_id: env::var("APPWRITE_SCHOOLS_COLLECTION_ID")
                .unwrap_or_else(|_| "schools".to_string()),
        })
    }
}
