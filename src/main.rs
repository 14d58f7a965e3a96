use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use partner_ledger::config::AppConfig;
use partner_ledger::error::AppError;
use partner_ledger::ledger::{
    AggregateReport, OutreachCsvImporter, PartnerAccount, PartnerDashboardView, PartnerId,
    PartnerRecords, Stage,
};
use partner_ledger::telemetry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    monthly_goal_target: u64,
}

#[derive(Parser, Debug)]
#[command(
    name = "Growth Partner Ledger",
    about = "Compute partner performance dashboards and program-wide rollups",
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
    /// Compute a partner dashboard offline from an outreach-log export
    Partner {
        #[command(subcommand)]
        command: PartnerCommand,
    },
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

#[derive(Subcommand, Debug)]
enum PartnerCommand {
    /// Render the performance dashboard for one partner
    Dashboard(PartnerDashboardArgs),
}

#[derive(Args, Debug)]
struct PartnerDashboardArgs {
    /// Outreach-log CSV export to hydrate the ledger
    #[arg(long)]
    logs: PathBuf,
    /// Partner identifier to stamp on imported entries
    #[arg(long, default_value = "partner-local")]
    partner_id: String,
    /// Evaluation date for streaks (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Monthly earnings goal override
    #[arg(long)]
    goal_target: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PartnerDashboardRequest {
    partner: PartnerRecords,
    #[serde(default)]
    today: Option<NaiveDate>,
    #[serde(default)]
    goal_target: Option<u64>,
}

#[derive(Debug, Serialize)]
struct PartnerDashboardResponse {
    today: NaiveDate,
    goal_target: u64,
    dashboard: PartnerDashboardView,
}

#[derive(Debug, Deserialize)]
struct AdminOverviewRequest {
    partners: Vec<PartnerRecords>,
    #[serde(default)]
    today: Option<NaiveDate>,
    #[serde(default)]
    goal_target: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AdminOverviewResponse {
    today: NaiveDate,
    report: AggregateReport,
    partners: Vec<PartnerOverviewEntry>,
}

#[derive(Debug, Serialize)]
struct PartnerOverviewEntry {
    partner_id: PartnerId,
    stage: Stage,
    stage_label: &'static str,
    total_outreach: u64,
    streak_days: u32,
    earnings_total: u64,
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
        Command::Partner {
            command: PartnerCommand::Dashboard(args),
        } => run_partner_dashboard(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
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
        metrics: prometheus_handle,
        monthly_goal_target: config.goals.monthly_target,
    };

    let app = app_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "partner ledger service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/partner/dashboard", post(partner_dashboard_endpoint))
        .route("/api/v1/admin/overview", post(admin_overview_endpoint))
        .with_state(state)
}

fn run_partner_dashboard(args: PartnerDashboardArgs) -> Result<(), AppError> {
    let PartnerDashboardArgs {
        logs,
        partner_id,
        today,
        goal_target,
    } = args;

    let config = AppConfig::load()?;
    let partner_id = PartnerId(partner_id);
    let entries = OutreachCsvImporter::from_path(logs, &partner_id)?;

    let records = PartnerRecords {
        account: placeholder_account(partner_id),
        logs: entries,
        leads: Vec::new(),
        earnings: Vec::new(),
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let goal_target = goal_target.unwrap_or(config.goals.monthly_target);
    let dashboard = PartnerDashboardView::build(&records, today, goal_target);

    render_partner_dashboard(&dashboard, today, goal_target);
    Ok(())
}

/// Offline imports have no stored account to reconcile against, so the
/// dashboard starts from a blank Starter account.
fn placeholder_account(partner_id: PartnerId) -> PartnerAccount {
    PartnerAccount {
        id: partner_id,
        application_id: "offline-import".to_string(),
        stage: Stage::Starter,
        earnings_total: 0,
        earnings_paid: 0,
        earnings_pending: 0,
        bank_details: None,
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
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

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn partner_dashboard_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<PartnerDashboardRequest>,
) -> Result<Json<PartnerDashboardResponse>, AppError> {
    let PartnerDashboardRequest {
        partner,
        today,
        goal_target,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let goal_target = goal_target.unwrap_or(state.monthly_goal_target);
    let dashboard = PartnerDashboardView::build(&partner, today, goal_target);

    Ok(Json(PartnerDashboardResponse {
        today,
        goal_target,
        dashboard,
    }))
}

async fn admin_overview_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<AdminOverviewRequest>,
) -> Result<Json<AdminOverviewResponse>, AppError> {
    let AdminOverviewRequest {
        partners,
        today,
        goal_target,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let goal_target = goal_target.unwrap_or(state.monthly_goal_target);
    let report = AggregateReport::compute(&partners);

    let partners = partners
        .iter()
        .map(|records| {
            let dashboard = PartnerDashboardView::build(records, today, goal_target);
            PartnerOverviewEntry {
                partner_id: records.account.id.clone(),
                stage: dashboard.stage,
                stage_label: dashboard.stage_label,
                total_outreach: dashboard.total_outreach,
                streak_days: dashboard.streak_days,
                earnings_total: records.account.earnings_total,
            }
        })
        .collect();

    Ok(Json(AdminOverviewResponse {
        today,
        report,
        partners,
    }))
}

fn render_partner_dashboard(dashboard: &PartnerDashboardView, today: NaiveDate, goal_target: u64) {
    println!("Partner dashboard for {}", dashboard.partner_id.0);
    println!("Evaluated {} against a {} monthly goal", today, goal_target);

    println!(
        "\nStage: {} ({}% to next level)",
        dashboard.stage_label, dashboard.stage_progress_percent
    );
    if let Some(stage) = dashboard.reconciled_stage {
        println!("Stored stage is stale; recomputed as {}", stage.label());
    }
    if let Some(earnings) = &dashboard.reconciled_earnings {
        println!(
            "Cached earnings are stale; ledger shows {} total / {} paid / {} pending",
            earnings.total, earnings.paid, earnings.pending
        );
    }

    println!("\nLifetime totals");
    println!("- Outreach sent: {}", dashboard.total_outreach);
    println!("- Replies received: {}", dashboard.total_replies);
    println!("- Qualified leads: {}", dashboard.total_leads);
    println!("- Appointments booked: {}", dashboard.total_appointments);
    println!("- Activity streak: {} day(s)", dashboard.streak_days);

    println!("\nGoal completion: {:.0}%", dashboard.goal_completion_percent);
    println!(
        "Earnings: {} total / {} paid / {} pending",
        dashboard.earnings.total, dashboard.earnings.paid, dashboard.earnings.pending
    );

    println!("\nLead split by channel");
    for share in &dashboard.channel_split {
        println!("- {}: {}%", share.channel_label, share.percent);
    }

    if dashboard.trend.is_empty() {
        println!("\nRecent activity: none logged");
    } else {
        println!("\nRecent activity");
        for point in &dashboard.trend {
            println!("- {}: {} sent", point.date, point.count);
        }
    }

    if !dashboard.pipeline.is_empty() {
        println!("\nLead pipeline");
        for entry in &dashboard.pipeline {
            println!("- {}: {}", entry.status_label, entry.count);
        }
    }
}
