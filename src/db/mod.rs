pub mod filter;
pub mod models;
pub mod store;

pub use filter::EntryFilter;
pub use store::{ObservedLocations, PriceStore};

/// Single-connection in-memory pool with migrations applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}
