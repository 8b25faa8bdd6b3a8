// use sqlx::PgPool;

// pub async fn init_db(database_url: &str) -> Result<PgPool, sqlx::Error> {
//     PgPool::connect(database_url).await
// }

use sqlx::MySqlPool;

pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPool::connect(database_url).await
}
