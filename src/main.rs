use axum::extract::Extension;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_track::config::AppConfig;
use talent_track::error::AppError;
use talent_track::telemetry;
use talent_track::workflows::recruiting::{
    recruiting_router, ApplicationId, CandidateId, DeleteInterviewRequest, EmployeeId,
    InMemoryRecruitingStore, InterviewLifecycleService, InterviewPatch, InterviewRequest,
    InterviewResult, InterviewStepId, PositionId, PositionPatch, PositionStatus,
    PositionUpdateService, RecordingAuditTrail, RecruitingServices,
};
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: Arc<PrometheusHandle>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Talent Track",
    about = "Run the applicant-tracking interview service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk an interview through its lifecycle against a seeded store
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Interview date used for the scheduled demo interview (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    interview_date: Option<NaiveDate>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

fn build_services(
    store: Arc<InMemoryRecruitingStore>,
    audit: Arc<RecordingAuditTrail>,
) -> RecruitingServices<InMemoryRecruitingStore, RecordingAuditTrail> {
    RecruitingServices {
        interviews: Arc::new(InterviewLifecycleService::new(Arc::clone(&store), audit)),
        positions: Arc::new(PositionUpdateService::new(store)),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryRecruitingStore::with_sample_data());
    let audit = Arc::new(RecordingAuditTrail::default());
    let services = build_services(store, audit);

    let app = recruiting_router(services)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "applicant tracking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let interview_date = args
        .interview_date
        .unwrap_or_else(|| Local::now().date_naive() + Duration::days(7));

    let store = Arc::new(InMemoryRecruitingStore::with_sample_data());
    let audit = Arc::new(RecordingAuditTrail::default());
    let interviews = InterviewLifecycleService::new(Arc::clone(&store), Arc::clone(&audit));
    let positions = PositionUpdateService::new(Arc::clone(&store));

    println!("Interview lifecycle demo");
    println!("Candidate 1 has application 1 against position 10 (flow 5)");

    let scheduled = match interviews.create(
        CandidateId(1),
        InterviewRequest {
            application_id: ApplicationId(1),
            interview_step_id: InterviewStepId(2),
            employee_id: EmployeeId(3),
            interview_date,
            score: None,
            notes: None,
        },
    ) {
        Ok(interview) => interview,
        Err(err) => {
            println!("  Scheduling rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Scheduled interview {} on {} -> result {}",
        scheduled.id.0,
        scheduled.interview_date,
        scheduled.result.label()
    );

    let scored = match interviews.update(
        CandidateId(1),
        scheduled.id,
        InterviewPatch {
            score: Some(86),
            result: Some(InterviewResult::Passed),
            notes: Some("Strong on distributed systems questions".to_string()),
            ..InterviewPatch::default()
        },
    ) {
        Ok(interview) => interview,
        Err(err) => {
            println!("  Scoring rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Scored interview {} -> result {} (score {})",
        scored.id.0,
        scored.result.label(),
        scored.score.unwrap_or_default()
    );

    match interviews.delete(
        CandidateId(1),
        scored.id,
        DeleteInterviewRequest {
            reason: Some("cleanup attempt".to_string()),
        },
    ) {
        Ok(removed) => println!("- Deleted completed interview {}", removed.id.0),
        Err(err) => println!("- Deletion refused: {err}"),
    }

    match interviews.create(
        CandidateId(1),
        InterviewRequest {
            application_id: ApplicationId(1),
            interview_step_id: InterviewStepId(3),
            employee_id: EmployeeId(3),
            interview_date: interview_date + Duration::days(7),
            score: None,
            notes: None,
        },
    ) {
        Ok(follow_up) => {
            match interviews.delete(
                CandidateId(1),
                follow_up.id,
                DeleteInterviewRequest {
                    reason: Some("candidate withdrew".to_string()),
                },
            ) {
                Ok(removed) => println!("- Deleted pending interview {}", removed.id.0),
                Err(err) => println!("  Deletion rejected: {err}"),
            }
        }
        Err(err) => println!("  Follow-up scheduling rejected: {err}"),
    }

    match interviews.advance_stage(CandidateId(1), ApplicationId(1), InterviewStepId(3)) {
        Ok(application) => println!(
            "- Application {} advanced to step {}",
            application.id.0, application.current_interview_step.0
        ),
        Err(err) => println!("  Stage advance rejected: {err}"),
    }

    println!("\nPosition maintenance demo");
    match positions.update(
        PositionId(10),
        PositionPatch {
            status: Some(PositionStatus::Contratado),
            is_visible: Some(false),
            ..PositionPatch::default()
        },
    ) {
        Ok(position) => println!(
            "- Position {} -> status {} (visible: {})",
            position.id.0,
            position.status.label(),
            position.is_visible
        ),
        Err(err) => println!("  Update rejected: {err}"),
    }

    match positions.update(
        PositionId(10),
        PositionPatch {
            salary_min: Some(80_000.0),
            salary_max: Some(60_000.0),
            ..PositionPatch::default()
        },
    ) {
        Ok(position) => println!(
            "- Salary band now {:?}..{:?}",
            position.salary_min, position.salary_max
        ),
        Err(err) => println!("- Salary band refused: {err}"),
    }

    let entries = audit.entries();
    if entries.is_empty() {
        println!("\nAudit trail: no deletions recorded");
    } else {
        println!("\nAudit trail");
        for entry in entries {
            println!(
                "- interview {} removed for candidate {} at {} (reason: {})",
                entry.interview_id.0,
                entry.candidate_id.0,
                entry.recorded_at,
                entry.reason.as_deref().unwrap_or("none given")
            );
        }
    }

    Ok(())
}
