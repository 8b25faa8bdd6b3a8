pub mod error;
pub mod mysql;
pub mod rest;

use anyhow::{Context, Result};

use crate::{
    config::{Config, StoreBackend},
    db::init_db,
    model::income::IncomeRecord,
};
use error::StoreError;
use mysql::MySqlIncomeStore;
use rest::RestIncomeStore;

/// The record store accessor: one read, all rows, newest first.
pub enum IncomeStore {
    Rest(RestIncomeStore),
    MySql(MySqlIncomeStore),
    #[cfg(test)]
    Fixture(Result<Vec<IncomeRecord>, u16>),
    /// Never answers.
    #[cfg(test)]
    Stalled,
}

impl IncomeStore {
    pub async fn from_config(config: &Config) -> Result<Self> {
        match &config.backend {
            StoreBackend::Rest { url, anon_key } => {
                let store = RestIncomeStore::new(
                    url,
                    anon_key,
                    &config.income_table,
                    config.fetch_timeout,
                )
                .context("Failed to build HTTP client")?;
                Ok(IncomeStore::Rest(store))
            }
            StoreBackend::MySql { database_url } => {
                let pool = init_db(database_url)
                    .await
                    .context("Failed to connect to database")?;
                Ok(IncomeStore::MySql(MySqlIncomeStore::new(
                    pool,
                    &config.income_table,
                )))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            IncomeStore::Rest(_) => "rest",
            IncomeStore::MySql(_) => "mysql",
            #[cfg(test)]
            IncomeStore::Fixture(_) => "fixture",
            #[cfg(test)]
            IncomeStore::Stalled => "stalled",
        }
    }

    /// Every record ordered by time descending. An empty table is `Ok(vec![])`.
    pub async fn fetch_all(&self) -> Result<Vec<IncomeRecord>, StoreError> {
        match self {
            IncomeStore::Rest(store) => store.fetch_all().await,
            IncomeStore::MySql(store) => store.fetch_all().await,
            #[cfg(test)]
            IncomeStore::Fixture(result) => result.clone().map_err(StoreError::Status),
            #[cfg(test)]
            IncomeStore::Stalled => futures_util::future::pending().await,
        }
    }
}
