use chrono::NaiveDate;
use clap::Args;
use permit_tracker::catalog::{jurisdictions, resolve_jurisdiction, Jurisdiction};
use permit_tracker::config::AppConfig;
use permit_tracker::deadlines::{
    urgent_deadlines, Clock, Deadline, DeadlineInputs, DeadlinePolicy, SystemClock,
};
use permit_tracker::error::AppError;
use permit_tracker::import::{DeadlineReport, ProjectCsvImporter};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DeadlineArgs {
    /// Date the application was submitted (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) submitted_at: Option<NaiveDate>,
    /// Date the permit was issued (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) permit_issued_at: Option<NaiveDate>,
    /// Date of the most recent county action (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) last_action_at: Option<NaiveDate>,
    /// Override the reference date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Only show deadlines that are urgent or overdue
    #[arg(long)]
    pub(crate) urgent_only: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV export with Project, Address, Submitted At, Permit Issued At, Last Action At
    pub(crate) csv: PathBuf,
    /// Override the reference date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct JurisdictionArgs {
    /// Show a single jurisdiction by id or name
    #[arg(long)]
    pub(crate) id: Option<String>,
}

pub(crate) fn run_deadlines(args: DeadlineArgs) -> Result<(), AppError> {
    let DeadlineArgs {
        submitted_at,
        permit_issued_at,
        last_action_at,
        today,
        urgent_only,
    } = args;

    let config = AppConfig::load()?;
    let today = today.unwrap_or_else(|| SystemClock.today());
    let inputs = DeadlineInputs {
        submitted_at,
        permit_issued_at,
        last_action_at,
    };

    let deadlines = deadline_listing(&config.deadlines, &inputs, today, urgent_only);
    println!("Permit deadlines (evaluated {})", today);
    if deadlines.is_empty() {
        println!("No deadlines apply to these milestones.");
        return Ok(());
    }

    for deadline in &deadlines {
        println!("{}", render_deadline(deadline));
    }

    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs { csv, today } = args;

    let config = AppConfig::load()?;
    let today = today.unwrap_or_else(|| SystemClock.today());
    let report = ProjectCsvImporter::from_path(&csv, &config.deadlines, today)?;

    render_import_report(&report);
    Ok(())
}

pub(crate) fn run_jurisdictions(args: JurisdictionArgs) -> Result<(), AppError> {
    match args.id {
        Some(query) => match resolve_jurisdiction(&query) {
            Some(jurisdiction) => render_jurisdiction(jurisdiction),
            None => {
                println!("No jurisdiction matches '{}'. Known ids:", query);
                for jurisdiction in jurisdictions() {
                    println!("- {}", jurisdiction.id);
                }
            }
        },
        None => {
            println!("Thurston County permitting jurisdictions");
            for jurisdiction in jurisdictions() {
                let appointment = if jurisdiction.requires_appointment {
                    "appointment required"
                } else {
                    "walk-in"
                };
                println!(
                    "- {} | {} | {} | {}",
                    jurisdiction.id, jurisdiction.name, jurisdiction.phone, appointment
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn deadline_listing(
    policy: &DeadlinePolicy,
    inputs: &DeadlineInputs,
    today: NaiveDate,
    urgent_only: bool,
) -> Vec<Deadline> {
    let deadlines = policy.calculate(inputs, today);
    if urgent_only {
        urgent_deadlines(&deadlines)
    } else {
        deadlines
    }
}

pub(crate) fn render_deadline(deadline: &Deadline) -> String {
    let remaining = match deadline.days_remaining() {
        days if days < 0 => format!("{} days overdue", -days),
        0 => "due today".to_string(),
        1 => "1 day left".to_string(),
        days => format!("{days} days left"),
    };

    format!(
        "- [{}] {} | {} | {} | {}",
        deadline.status().label(),
        deadline.kind().label(),
        deadline.description(),
        remaining,
        deadline.action_required()
    )
}

fn render_import_report(report: &DeadlineReport) {
    println!(
        "Project deadline report: {} projects, {} urgent (evaluated {})",
        report.rows.len(),
        report.urgent_count,
        report.today
    );

    for row in &report.rows {
        match &row.address {
            Some(address) => println!("\n{} ({})", row.project, address),
            None => println!("\n{}", row.project),
        }

        if row.deadlines.is_empty() {
            println!("- no deadlines tracked yet");
        }
        for view in &row.deadlines {
            println!("{}", render_deadline(&view.deadline));
        }
    }

    let attention: Vec<_> = report.attention().collect();
    if !attention.is_empty() {
        println!("\nNeeds attention");
        for (row, view) in attention {
            println!(
                "- {}: {} ({})",
                row.project,
                view.deadline.action_required(),
                view.status_label
            );
        }
    }
}

fn render_jurisdiction(jurisdiction: &Jurisdiction) {
    println!("{} ({})", jurisdiction.name, jurisdiction.id);
    println!("Office: {}", jurisdiction.permit_office);
    println!("Address: {}", jurisdiction.address);
    println!("Phone: {} | Email: {}", jurisdiction.phone, jurisdiction.email);
    println!("Website: {}", jurisdiction.website);
    if let Some(url) = jurisdiction.appointment_url {
        println!("Appointments: {}", url);
    }
    println!(
        "Processing: {}; {}",
        jurisdiction.processing_times.basic, jurisdiction.processing_times.complex
    );

    if !jurisdiction.special_requirements.is_empty() {
        println!("\nSpecial requirements");
        for requirement in jurisdiction.special_requirements {
            println!("- {}", requirement);
        }
    }
}
