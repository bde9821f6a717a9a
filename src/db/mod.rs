pub mod assignments;
pub mod courses;
pub mod students;

#[cfg(test)]
pub(crate) async fn setup_test_db() -> sqlx::SqlitePool {
    // A second pooled connection would see its own empty :memory: database,
    // so the test pool is capped at one.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
