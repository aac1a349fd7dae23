use tempfile::NamedTempFile;

use verse_loader::loader;
use verse_loader::test_support::TestDatabase;

fn write_csv(rows: &[(i32, &str, &str)]) -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp csv");
    let mut writer = csv::Writer::from_path(file.path()).expect("open csv writer");

    writer
        .write_record(["index", "reference", "verse"])
        .expect("write header");
    for (index, reference, verse) in rows {
        writer
            .write_record([index.to_string(), reference.to_string(), verse.to_string()])
            .expect("write row");
    }
    writer.flush().expect("flush csv");

    file
}

async fn fetch_verses(pool: &sqlx::PgPool) -> Vec<(i32, String, String)> {
    sqlx::query_as(r#"SELECT "index", reference, verse FROM verses ORDER BY "index""#)
        .fetch_all(pool)
        .await
        .expect("select verses")
}

#[tokio::test]
async fn loads_every_row_with_a_partial_final_batch() {
    let db = TestDatabase::new().await.expect("provision test database");
    let pool = db.pool_clone();

    let csv = write_csv(&[
        (1, "Genesis 1:1", "In the beginning, God created the heaven and the earth."),
        (2, "Genesis 1:2", "And the earth was without form, and void."),
        (3, "Genesis 1:3", "And God said, Let there be light: and there was light."),
    ]);

    let stats = loader::load_file(&pool, csv.path(), 2)
        .await
        .expect("load succeeds");

    // 3 rows at batch size 2: one full batch, one partial batch of one.
    assert_eq!(stats.rows, 3);
    assert_eq!(stats.batches, 2);

    let rows = fetch_verses(&pool).await;
    assert_eq!(
        rows,
        vec![
            (
                1,
                "Genesis 1:1".to_string(),
                "In the beginning, God created the heaven and the earth.".to_string()
            ),
            (
                2,
                "Genesis 1:2".to_string(),
                "And the earth was without form, and void.".to_string()
            ),
            (
                3,
                "Genesis 1:3".to_string(),
                "And God said, Let there be light: and there was light.".to_string()
            ),
        ]
    );

    db.close().await.expect("tear down test database");
}

#[tokio::test]
async fn header_only_file_commits_with_no_batches() {
    let db = TestDatabase::new().await.expect("provision test database");
    let pool = db.pool_clone();

    let csv = write_csv(&[]);

    let stats = loader::load_file(&pool, csv.path(), 100)
        .await
        .expect("load succeeds");

    assert_eq!(stats.rows, 0);
    assert_eq!(stats.batches, 0);
    assert!(fetch_verses(&pool).await.is_empty());

    db.close().await.expect("tear down test database");
}

#[tokio::test]
async fn row_count_equal_to_batch_size_issues_one_batch() {
    let db = TestDatabase::new().await.expect("provision test database");
    let pool = db.pool_clone();

    let csv = write_csv(&[
        (1, "Genesis 1:1", "In the beginning"),
        (2, "Genesis 1:2", "And the earth"),
    ]);

    let stats = loader::load_file(&pool, csv.path(), 2)
        .await
        .expect("load succeeds");

    assert_eq!(stats.rows, 2);
    assert_eq!(stats.batches, 1);
    assert_eq!(fetch_verses(&pool).await.len(), 2);

    db.close().await.expect("tear down test database");
}

#[tokio::test]
async fn rerun_against_loaded_table_fails_on_duplicate_index() {
    let db = TestDatabase::new().await.expect("provision test database");
    let pool = db.pool_clone();

    let csv = write_csv(&[(1, "Genesis 1:1", "In the beginning")]);

    loader::load_file(&pool, csv.path(), 100)
        .await
        .expect("first load succeeds");

    let err = loader::load_file(&pool, csv.path(), 100)
        .await
        .expect_err("second load violates the primary key");
    assert!(matches!(
        err,
        verse_loader::error::LoaderError::Database(_)
    ));

    // The failed run rolled back, leaving the first load intact.
    assert_eq!(fetch_verses(&pool).await.len(), 1);

    db.close().await.expect("tear down test database");
}

#[tokio::test]
async fn failed_load_leaves_no_partial_batches_behind() {
    let db = TestDatabase::new().await.expect("provision test database");
    let pool = db.pool_clone();

    // Duplicate index within the file: the second batch fails after the
    // first was already sent.
    let csv = write_csv(&[
        (1, "Genesis 1:1", "In the beginning"),
        (2, "Genesis 1:2", "And the earth"),
        (1, "Genesis 1:1", "In the beginning"),
    ]);

    loader::load_file(&pool, csv.path(), 2)
        .await
        .expect_err("duplicate index aborts the load");

    assert!(fetch_verses(&pool).await.is_empty());

    db.close().await.expect("tear down test database");
}
