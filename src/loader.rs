use std::path::Path;

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::LoaderError;
use crate::records::VerseRecord;

/// Counters for one completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub batches: usize,
}

/// Fixed-size accumulator for verse records.
///
/// `push` hands back a full batch once `batch_size` records have
/// accumulated; `finish` drains whatever partial batch remains at end of
/// input. An exact multiple of `batch_size` leaves nothing for `finish`,
/// so no empty INSERT is ever issued.
pub struct Batcher {
    batch_size: usize,
    buf: Vec<VerseRecord>,
}

impl Batcher {
    pub fn new(batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch size must be nonzero");
        Self {
            batch_size,
            buf: Vec::with_capacity(batch_size),
        }
    }

    pub fn push(&mut self, record: VerseRecord) -> Option<Vec<VerseRecord>> {
        self.buf.push(record);
        if self.buf.len() >= self.batch_size {
            Some(std::mem::replace(
                &mut self.buf,
                Vec::with_capacity(self.batch_size),
            ))
        } else {
            None
        }
    }

    pub fn finish(self) -> Option<Vec<VerseRecord>> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.buf)
        }
    }
}

/// Stream the CSV at `path` into the `verses` table in batches of
/// `batch_size` rows, inside a single transaction committed at the end.
///
/// The first line of the file is treated as a header and discarded. Any
/// CSV or database error aborts the load; the dropped transaction rolls
/// back every batch already sent.
pub async fn load_file(
    pool: &PgPool,
    path: &Path,
    batch_size: usize,
) -> Result<LoadStats, LoaderError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut tx = pool.begin().await?;
    let mut batcher = Batcher::new(batch_size);
    let mut stats = LoadStats::default();

    for row in reader.records() {
        let record = VerseRecord::from_csv_row(&row?)?;
        stats.rows += 1;
        if let Some(batch) = batcher.push(record) {
            insert_batch(&mut tx, batch).await?;
            stats.batches += 1;
        }
    }

    // Partial final batch, if the row count was not an exact multiple.
    if let Some(batch) = batcher.finish() {
        insert_batch(&mut tx, batch).await?;
        stats.batches += 1;
    }

    tx.commit().await?;

    Ok(stats)
}

/// Bulk insert one batch using UNNEST over parallel arrays.
async fn insert_batch(
    tx: &mut Transaction<'_, Postgres>,
    batch: Vec<VerseRecord>,
) -> Result<(), LoaderError> {
    let count = batch.len();
    let mut indexes = Vec::with_capacity(count);
    let mut references = Vec::with_capacity(count);
    let mut verses = Vec::with_capacity(count);

    for record in batch {
        indexes.push(record.index);
        references.push(record.reference);
        verses.push(record.verse);
    }

    sqlx::query(
        r#"INSERT INTO verses ("index", reference, verse)
           SELECT * FROM UNNEST($1::int[], $2::text[], $3::text[])"#,
    )
    .bind(&indexes)
    .bind(&references)
    .bind(&verses)
    .execute(&mut **tx)
    .await?;

    log::trace!("bulk inserted {} verses", count);
    Ok(())
}
