use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::ledger::store::EmployeeContact;

/// id -> contact details, used by projection read paths only. A rename shows
/// up after the TTL at the latest; mutation paths never read this cache.
static CONTACT_CACHE: Lazy<Cache<u64, EmployeeContact>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(3600)) // 1h TTL
        .build()
});

pub async fn get(id: u64) -> Option<EmployeeContact> {
    CONTACT_CACHE.get(&id).await
}

pub async fn insert(contact: EmployeeContact) {
    CONTACT_CACHE.insert(contact.id, contact).await;
}

/// Drop one employee after an update or delete.
pub async fn invalidate(id: u64) {
    CONTACT_CACHE.invalidate(&id).await;
}

/// Insert a batch of contacts concurrently
async fn batch_insert(contacts: &[EmployeeContact]) {
    let futures: Vec<_> = contacts
        .iter()
        .map(|c| CONTACT_CACHE.insert(c.id, c.clone()))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load active employees into the in-memory cache (batched)
pub async fn warmup_contact_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, EmployeeContact>(
        r#"
        SELECT id, full_name, email
        FROM employees
        WHERE active = TRUE
        ORDER BY id DESC
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let contact = row?;
        batch.push(contact);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_insert(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_insert(&batch).await;
    }

    log::info!(
        "Employee contact cache warmup complete: {} active employees",
        total_count
    );

    Ok(())
}
