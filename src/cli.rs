// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::client::JobsClient;
use crate::config::ClientConfig;
use crate::search::{
    sorted, FetchRequested, FilterEdit, FilterState, JobsQuery, PaginationState, ResultsState,
    SearchSession, SetField, SortKey, TextField, Transition,
};
use crate::types::Job;
use crate::utils::format_salary_range;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Search the public jobs board from the terminal")]
pub struct JobsCli {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// One-shot search against the jobs endpoint
    Search(SearchArgs),
    /// Show a single job posting
    Show { job_id: String },
    /// Scripted walk through the debounced search session
    Session(SearchArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<String>,
    #[arg(long = "employment-type", value_delimiter = ',')]
    pub employment_type: Vec<String>,
    #[arg(long = "work-type", value_delimiter = ',')]
    pub work_type: Vec<String>,
    /// Salary buckets like 5-10, or 10+
    #[arg(long = "salary-range", value_delimiter = ',')]
    pub salary_range: Vec<String>,
    #[arg(long = "experience", value_delimiter = ',')]
    pub experience: Vec<String>,
    /// Campus-drive partner id; routes to the tpo-scoped endpoint
    #[arg(long)]
    pub tpo: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// latest, salary or relevance
    #[arg(long, default_value = "latest")]
    pub sort: SortKey,
}

pub async fn handle_command(cli: JobsCli) -> Result<()> {
    let config = ClientConfig::load()?;
    let client = JobsClient::new(&config)?;

    match cli.command {
        JobsCommand::Search(args) => run_search(&client, args).await,
        JobsCommand::Show { job_id } => run_show(&client, &job_id).await,
        JobsCommand::Session(args) => run_session(client, args).await,
    }
}

fn filters_from(args: &SearchArgs) -> FilterState {
    let mut filters = FilterState::with_tpo(args.tpo.clone());
    if let Some(value) = &args.company {
        filters.set_text(TextField::CompanyName, value.as_str());
    }
    if let Some(value) = &args.location {
        filters.set_text(TextField::Location, value.as_str());
    }
    if let Some(value) = &args.title {
        filters.set_text(TextField::Title, value.as_str());
    }
    if let Some(value) = &args.search {
        filters.set_text(TextField::SearchInput, value.as_str());
    }
    for value in &args.category {
        filters.toggle(SetField::Category, value, true);
    }
    for value in &args.employment_type {
        filters.toggle(SetField::EmploymentType, value, true);
    }
    for value in &args.work_type {
        filters.toggle(SetField::WorkType, value, true);
    }
    for value in &args.salary_range {
        filters.toggle(SetField::SalaryRange, value, true);
    }
    for value in &args.experience {
        filters.toggle(SetField::ExperienceRange, value, true);
    }
    filters
}

async fn run_search(client: &JobsClient, args: SearchArgs) -> Result<()> {
    let filters = filters_from(&args);
    let query = JobsQuery::build(&filters, args.page);
    info!("Query: {}", query.query_string());

    let mut results = ResultsState::new();
    results.begin(1);
    results.complete(1, client.fetch_jobs(&query).await);

    let mut pagination = PaginationState::new();
    pagination.go_to_page(args.page);
    pagination.set_total_jobs(results.total_jobs());

    print_results(&sorted(results.jobs(), args.sort), &pagination);
    Ok(())
}

async fn run_show(client: &JobsClient, job_id: &str) -> Result<()> {
    let details = client.job_details(job_id).await?;

    println!("{} at {}", details.title, details.company_name);
    if let Some(brand) = &details.brand_name {
        println!("Brand:       {}", brand);
    }
    if let Some(location) = &details.location {
        println!("Location:    {}", location);
    }
    println!("Type:        {}", details.employment_type);
    if let Some(work_type) = &details.work_type {
        println!("Work mode:   {}", work_type);
    }
    println!(
        "Salary:      {}",
        format_salary_range(details.min_salary, details.max_salary)
    );
    if let Some(openings) = details.no_of_openings {
        println!("Openings:    {}", openings);
    }
    if !details.skills.is_empty() {
        println!("Skills:      {}", details.skills.join(", "));
    }
    if let Some(description) = &details.description {
        println!("\n{}", description);
    }
    Ok(())
}

/// Walk the session state machine against the live backend: initial
/// load, a coalesced burst of filter edits, then an explicit page
/// change.
async fn run_session(client: JobsClient, args: SearchArgs) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel(16);
    let (request_tx, mut request_rx) = mpsc::channel(16);

    let session = SearchSession::new(filters_from(&args));
    tokio::spawn(session.run(event_rx, request_tx));

    let mut results = ResultsState::new();

    println!("-- initial load --");
    event_tx.send(Transition::InitialLoad).await?;
    fetch_next(&client, &mut request_rx, &mut results).await?;

    println!("-- editing filters (edits coalesce behind the debounce) --");
    event_tx
        .send(Transition::EditFilter(FilterEdit::Toggle {
            field: SetField::EmploymentType,
            value: "full-time".to_string(),
            included: true,
        }))
        .await?;
    event_tx
        .send(Transition::EditFilter(FilterEdit::Text(
            TextField::SearchInput,
            "engineer".to_string(),
        )))
        .await?;
    fetch_next(&client, &mut request_rx, &mut results).await?;

    println!("-- explicit page change (no debounce) --");
    event_tx.send(Transition::ChangePage(2)).await?;
    fetch_next(&client, &mut request_rx, &mut results).await?;

    Ok(())
}

async fn fetch_next(
    client: &JobsClient,
    request_rx: &mut mpsc::Receiver<FetchRequested>,
    results: &mut ResultsState,
) -> Result<()> {
    let request = tokio::time::timeout(Duration::from_secs(5), request_rx.recv())
        .await
        .context("Session produced no fetch request")?
        .context("Session ended unexpectedly")?;

    let mut pagination = PaginationState::new();
    pagination.go_to_page(request.query.page);

    results.begin(request.seq);
    results.complete(request.seq, client.fetch_jobs(&request.query).await);

    pagination.set_total_jobs(results.total_jobs());
    print_results(results.jobs(), &pagination);
    Ok(())
}

fn print_results(jobs: &[Job], pagination: &PaginationState) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!(
        "{:<28} {:<20} {:<16} {:<12} {:<14}",
        "Title", "Company", "Location", "Type", "Salary"
    );
    println!("{}", "-".repeat(92));
    for job in jobs {
        println!(
            "{:<28} {:<20} {:<16} {:<12} {:<14}",
            job.title,
            job.brand_name.as_deref().unwrap_or(&job.company_name),
            job.location.as_deref().unwrap_or("-"),
            job.employment_type,
            format_salary_range(job.min_salary, job.max_salary)
        );
    }

    println!(
        "\nShowing {}-{} of {} jobs",
        pagination.start_index(),
        pagination.end_index(),
        pagination.total_jobs()
    );

    let window: Vec<String> = pagination
        .page_window()
        .into_iter()
        .map(|page| {
            if page == pagination.current_page() {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    if !window.is_empty() {
        println!("Pages: {}", window.join(" "));
    }
}
