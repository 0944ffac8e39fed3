use crate::infra::seed_marketplace;
use asisten_kita::applications::{ApplicationService, NewApplication};
use asisten_kita::directory::WorkerDirectoryService;
use asisten_kita::error::AppError;
use asisten_kita::listings::{JobBoardService, NewPosting};
use asisten_kita::search::{LocationFilter, SearchParams, WorkerFilters};
use asisten_kita::store::MemoryStore;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// City to search workers in
    #[arg(long, default_value = "Malang")]
    pub(crate) city: String,
    /// Page size for the search portion of the demo
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: usize,
    /// Skip the application lifecycle portion of the demo
    #[arg(long)]
    pub(crate) skip_applications: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::new());
    seed_marketplace(&store)?;

    let directory = WorkerDirectoryService::new(store.clone());
    let board = JobBoardService::new(store.clone());
    let applications = ApplicationService::new(store);

    println!("AsistenKita marketplace demo");
    println!("\nWorker search in {} (top {} by rating)", args.city, args.limit);

    let params = SearchParams {
        limit: args.limit,
        offset: 0,
        q: None,
        filters: Some(WorkerFilters {
            location: Some(LocationFilter::cities(&[args.city.as_str()])),
            ..WorkerFilters::default()
        }),
        sort: None,
    };
    let page = match directory.search(&params) {
        Ok(page) => page,
        Err(err) => {
            println!("  Search unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "  {} of {} matching profiles (page {}/{})",
        page.items.len(),
        page.total,
        page.info.page,
        page.info.total_pages
    );
    for worker in &page.items {
        let verified = if worker.is_verified { "yes" } else { "no" };
        println!(
            "  - {} | {} | rating {:.1} ({} reviews) | verified: {}",
            worker.name, worker.city, worker.rating_avg, worker.rating_count, verified
        );
    }

    if args.skip_applications {
        return Ok(());
    }

    println!("\nLowongan lifecycle");
    let draft = match board.create(
        "user-demo",
        NewPosting {
            title: format!("ART harian area {}", args.city),
            description: "Memasak dan bersih-bersih tiga kali seminggu.".to_string(),
            city: args.city.clone(),
            salary_min: Some(1_500_000),
            salary_max: Some(2_200_000),
            ..NewPosting::default()
        },
    ) {
        Ok(posting) => posting,
        Err(err) => {
            println!("  Draft rejected: {err}");
            return Ok(());
        }
    };
    println!("  Drafted {} -> status {}", draft.id, draft.status.label());

    let published = match board.publish(&draft.id) {
        Ok(posting) => posting,
        Err(err) => {
            println!("  Publish failed: {err}");
            return Ok(());
        }
    };
    println!("  Published {} -> active {}", published.id, published.is_active);

    let Some(applicant) = page.items.first() else {
        println!("  No workers available to apply");
        return Ok(());
    };

    println!("\nApplication lifecycle for {}", applicant.name);
    let application = match applications.apply(NewApplication::for_pair(&published.id, &applicant.id))
    {
        Ok(application) => application,
        Err(err) => {
            println!("  Application rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "  Applied -> {} (status {})",
        application.id,
        application.status.label()
    );

    match applications.apply(NewApplication::for_pair(&published.id, &applicant.id)) {
        Ok(_) => println!("  Unexpected: duplicate application accepted"),
        Err(err) => println!("  Duplicate apply rejected: {err}"),
    }

    match applications.accept(&application.id) {
        Ok(accepted) => println!("  Employer accepted -> status {}", accepted.status.label()),
        Err(err) => {
            println!("  Accept failed: {err}");
            return Ok(());
        }
    }

    match board.get(&published.id) {
        Ok(posting) => println!(
            "  Posting counters: {} applications, {} views",
            posting.applications_count, posting.views_count
        ),
        Err(err) => println!("  Posting lookup failed: {err}"),
    }

    match applications.list_for_job_with_profiles(&published.id, 10, 0) {
        Ok(page) => {
            println!("  Applicant list ({} total):", page.total);
            for row in &page.items {
                let name = row
                    .worker
                    .as_ref()
                    .map(|worker| worker.name.as_str())
                    .unwrap_or("profil tidak tersedia");
                println!(
                    "    - {} | {} | status {}",
                    row.application.id,
                    name,
                    row.application.status.label()
                );
            }
        }
        Err(err) => println!("  Applicant list failed: {err}"),
    }

    Ok(())
}
