use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use asisten_kita::store::{collections, fields, DocumentStore, MemoryStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seed the in-memory store with a small marketplace: verified workers in a
/// few East Java cities and a pair of published lowongan.
pub(crate) fn seed_marketplace(store: &MemoryStore) -> Result<(), StoreError> {
    let workers = [
        ("art-001", "Siti Rahayu", "Malang", "Lowokwaru", 4.8, 6, true),
        ("art-002", "Dewi Lestari", "Malang", "Klojen", 4.2, 3, true),
        ("art-003", "Budi Santoso", "Surabaya", "Gubeng", 3.9, 2, false),
        ("art-004", "Rina Wati", "Batu", "Junrejo", 4.5, 7, true),
        ("art-005", "Sri Mulyani", "Malang", "Blimbing", 4.9, 10, true),
    ];
    for (id, name, city, district, rating, years, verified) in workers {
        store.create(
            collections::WORKER_PROFILES,
            Some(id),
            fields(json!({
                "name": name,
                "city": city,
                "district": district,
                "skills": ["memasak", "membersihkan rumah", "menyetrika"],
                "job_types": ["pembantu rumah tangga"],
                "work_arrangements": ["live_in", "daily_commute"],
                "experience_years": years,
                "rate_min": 1_500_000,
                "rate_max": 2_500_000,
                "rate_unit": "monthly",
                "is_verified": verified,
                "rating_avg": rating,
                "rating_count": 12,
                "status": "active",
            })),
        )?;
    }

    let postings = [
        (
            "low-001",
            "ART menginap untuk keluarga kecil",
            "Malang",
            2_000_000,
            3_000_000,
        ),
        (
            "low-002",
            "ART pulang-pergi area Surabaya",
            "Surabaya",
            1_800_000,
            2_400_000,
        ),
    ];
    for (id, title, city, min, max) in postings {
        store.create(
            collections::LOWONGAN,
            Some(id),
            fields(json!({
                "title": title,
                "description": "Memasak, bersih-bersih, dan menyetrika untuk rumah tangga harian.",
                "city": city,
                "job_types": ["pembantu rumah tangga"],
                "skills": ["memasak", "membersihkan rumah"],
                "work_arrangements": ["live_in"],
                "salary_min": min,
                "salary_max": max,
                "rate_unit": "monthly",
                "user_id": "user-employer-001",
                "status": "published",
                "is_active": true,
                "views_count": 0,
                "applications_count": 0,
            })),
        )?;
    }

    Ok(())
}
