use anyhow::{bail, Context, Result};
use chrono::Datelike;
use std::env;
use std::path::PathBuf;

use degree_progress::{
    format_gpa, load_blacklists_or_empty, logging, read_ledger, CategoryProgress, Curriculum,
    EngineConfig, ProgressReport, ReconciliationEngine, StudentLedger,
};

const USAGE: &str = "usage: degree-progress report --curriculum <file.json> --ledger <file.csv|file.json> \
[--blacklists <file.json>] [--config <file.json>] [--year <yyyy>] [--json]";

#[derive(Debug, Default)]
struct ReportArgs {
    curriculum: Option<PathBuf>,
    ledger: Option<PathBuf>,
    blacklists: Option<PathBuf>,
    config: Option<PathBuf>,
    year: Option<i32>,
    json: bool,
}

fn main() -> Result<()> {
    if let Err(err) = logging::init() {
        eprintln!("⚠️  {}", err);
    }

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "report" {
        let report_args = parse_report_args(&args[2..])?;
        run_report(report_args)?;
    } else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    Ok(())
}

fn parse_report_args(args: &[String]) -> Result<ReportArgs> {
    let mut parsed = ReportArgs::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .with_context(|| format!("missing value for {}", flag))
        };
        match flag.as_str() {
            "--curriculum" => parsed.curriculum = Some(PathBuf::from(value()?)),
            "--ledger" => parsed.ledger = Some(PathBuf::from(value()?)),
            "--blacklists" => parsed.blacklists = Some(PathBuf::from(value()?)),
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--year" => {
                let raw = value()?;
                parsed.year = Some(raw.parse().with_context(|| format!("invalid year: {}", raw))?);
            }
            "--json" => parsed.json = true,
            other => bail!("unknown argument: {}\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

fn run_report(args: ReportArgs) -> Result<()> {
    let curriculum_path = args.curriculum.context("--curriculum is required")?;
    let ledger_path = args.ledger.context("--ledger is required")?;

    // 1. Configuration (the clock is read here, never inside the engine)
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
    let config = config.with_current_year(year);

    let aliases = config.alias_table()?;
    let grades = config.grade_table()?;
    let engine = ReconciliationEngine::from_config(&config)?;

    // 2. Curriculum
    let curriculum = Curriculum::from_file(&curriculum_path, &aliases)?;
    tracing::info!(
        curriculum = %curriculum.name,
        categories = curriculum.requirements.len(),
        courses = curriculum.course_credits.len(),
        "curriculum loaded"
    );

    // 3. Ledger
    let records = read_ledger(&ledger_path)?;
    let normalized = StudentLedger::normalize(&records, &grades);
    let mut ledger = normalized.ledger;
    let backfilled = ledger.backfill_credits(&curriculum);
    tracing::info!(entries = ledger.len(), backfilled, "{}", normalized.quality.summary());
    for issue in &normalized.quality.issues {
        tracing::warn!(code = %issue.code, field = %issue.field, "{}", issue.issue);
    }

    // 4. Blacklists (soft failure)
    let blacklists = args
        .blacklists
        .as_ref()
        .map(load_blacklists_or_empty)
        .unwrap_or_default();

    // 5. Reconcile
    let report = engine.reconcile_curriculum(ledger.entries(), &curriculum, &blacklists);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&curriculum, &report);
    }

    Ok(())
}

fn print_report(curriculum: &Curriculum, report: &ProgressReport) {
    println!("🎓 {}", curriculum.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if !report.is_computable() {
        println!("❌ Progress cannot be computed: the curriculum has no credit requirements");
    }

    for (name, progress) in &report.category_breakdown {
        println!("  {:<20} {}", name, describe_category(progress));
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Earned:   {:.1} credits", report.total_earned_credits);
    println!(
        "✓ Counted:  {:.1} / {:.1} credits",
        report.total_counted_credits, report.total_required_credits
    );
    if let (Some(done), Some(projected)) = (report.percent_complete, report.projected_percent) {
        println!("✓ Progress: {}% ({}% projected)", done, projected);
    }
    println!("✓ GPA:      {}", format_gpa(report.gpa));

    for entry in &report.overflow {
        println!(
            "↪ {} overflows {:.1} credits from {} to {}",
            entry.course.code, entry.overflow_credits, entry.original_category, entry.reassigned_to
        );
    }
    for plan in &report.planned_semesters {
        println!("📅 {}: {:.1} credits ({})", plan.semester, plan.credits, plan.courses.join(", "));
    }
    for warning in &report.blacklist_warnings {
        println!("⚠️  {}", warning);
    }
}

fn describe_category(progress: &CategoryProgress) -> String {
    if progress.informational {
        format!("{:.1} credits (informational)", progress.counted_credits())
    } else {
        format!(
            "{:.1} / {:.1} (done {:.1}, taking {:.1}, planned {:.1}, overflow {:.1})",
            progress.counted_credits(),
            progress.required_credits,
            progress.completed_credits,
            progress.in_progress_credits,
            progress.planned_credits,
            progress.overflow_credits
        )
    }
}
