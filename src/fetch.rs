use anyhow::Result;
use keggkit::{client::Fetched, parse::Diagnostic, KeggClient};
use log::{debug, info};
use rayon::prelude::*;

/// One `get` request: `query_id` is sent to KEGG, `source_id` is only used to
/// attribute diagnostics.
#[derive(Debug, Clone)]
pub struct Query {
    pub source_id: String,
    pub query_id: String,
}

/// Fetch every query on a pool of `threads` workers. Results come back in the
/// order of `queries`, with the diagnostics of each query in that same order.
pub fn fetch_all(
    client: &KeggClient,
    queries: &[Query],
    threads: usize,
) -> Result<(Vec<Fetched>, Vec<Diagnostic>)> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    let total = queries.len();
    info!("fetching {} record(s) from {}", total, client.base_url);

    let results: Vec<(Fetched, Vec<Diagnostic>)> = pool.install(|| {
        queries
            .par_iter()
            .enumerate()
            .map(|(i, query)| {
                debug!("query {} of {}: {}", i + 1, total, query.query_id);
                client.fetch_record(&query.source_id, &query.query_id)
            })
            .collect()
    });

    let mut fetched = Vec::with_capacity(results.len());
    let mut diagnostics = Vec::new();
    for (record, record_diagnostics) in results {
        fetched.push(record);
        diagnostics.extend(record_diagnostics);
    }
    Ok((fetched, diagnostics))
}
