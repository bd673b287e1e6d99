use std::time::Instant;

use crate::model::{Site, SiteId};
use crate::projector::project;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

fn catalog(count: u64) -> Vec<Site> {
    (1..=count)
        .map(|id| {
            Site::new(
                id,
                &format!("Network Site {id:05}"),
                &format!("https://site{id}.example.org"),
                &format!("https://site{id}.example.org/wp-admin/"),
            )
            .with_current(id == 1)
        })
        .collect()
}

#[test]
fn large_catalog_projection_p95_under_10ms() {
    let sites = catalog(10_000);
    let recent: Vec<SiteId> = vec![9_999, 17, 250, 3, 1];

    for _ in 0..20 {
        let _ = project(&sites, &recent, 1, "site 12");
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(60);
        for round in 0..60 {
            let query = if round % 2 == 0 { "" } else { "site1234" };
            let start = Instant::now();
            let view = project(&sites, &recent, 1, query);
            let _ = view.flat_navigation_list();
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 10.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 10.0ms); batches={batch_p95:?}",
    );
}
