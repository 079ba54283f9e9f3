//! Command handlers.

use std::path::Path;

use chrono::Utc;
use chrono_tz::Tz;
use equilibrio_core::calendar::{self, DateRange};
use equilibrio_core::dashboard::{DashboardRequest, DashboardService};
use equilibrio_core::recurrence::RecurrenceEngine;
use equilibrio_core::source::{CostSource, LedgerSnapshot, SaleQuery, SaleSource};
use equilibrio_core::stats::{ProductFilter, StatsAggregator};
use equilibrio_shared::types::TenantId;
use equilibrio_shared::{AppConfig, AppError, AppResult};
use serde_json::{Value, json};
use tracing::info;

use crate::cli::{DashboardArgs, RangeArgs};

/// Engines and settings built once from configuration.
pub struct Context {
    recurrence: RecurrenceEngine,
    aggregator: StatsAggregator,
    timezone: Tz,
}

impl Context {
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let recurrence = RecurrenceEngine::new().with_max_range_days(config.engine.max_range_days);
        Ok(Self {
            recurrence,
            aggregator: StatsAggregator::new()
                .with_recurrence(recurrence)
                .with_top_products(config.engine.top_products),
            timezone: calendar::parse_timezone(&config.business.timezone)?,
        })
    }

    fn range(&self, args: &RangeArgs) -> AppResult<DateRange> {
        Ok(calendar::widen_bounds(&args.start, &args.end, self.timezone)?)
    }
}

async fn load_snapshot(path: &Path) -> AppResult<LedgerSnapshot> {
    let raw = tokio::fs::read_to_string(path).await?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&raw)
        .map_err(|e| AppError::Validation(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), tenants = snapshot.tenants.len(), "Loaded ledger");
    Ok(snapshot)
}

pub async fn stats(ctx: &Context, args: &RangeArgs) -> AppResult<Value> {
    let range = ctx.range(args)?;
    let filter = ProductFilter::parse(args.product.as_deref());
    let snapshot = load_snapshot(&args.ledger).await?;
    let tenant = TenantId::new(args.tenant.as_str());

    let costs = snapshot.costs(&tenant).await?;
    let query = SaleQuery {
        range: Some(range),
        product: filter.clone(),
    };
    let sales = snapshot.sales(&tenant, &query).await?;

    let result = ctx.aggregator.aggregate(&sales, &costs, &range, &filter)?;
    to_json(&result)
}

pub async fn dashboard(ctx: &Context, args: &DashboardArgs) -> AppResult<Value> {
    let request = DashboardRequest {
        range: ctx.range(&args.range)?,
        product_filter: ProductFilter::parse(args.range.product.as_deref()),
    };
    let today = args
        .today
        .unwrap_or_else(|| Utc::now().with_timezone(&ctx.timezone).date_naive());
    let snapshot = load_snapshot(&args.range.ledger).await?;
    let tenant = TenantId::new(args.range.tenant.as_str());

    // Both the summary and the month goal read from this one fetch.
    let costs = snapshot.costs(&tenant).await?;
    let sales = snapshot.sales(&tenant, &SaleQuery::default()).await?;

    let dashboard =
        DashboardService::new(ctx.aggregator).build(&sales, &costs, &request, today)?;
    to_json(&dashboard)
}

pub async fn schedule(ctx: &Context, args: &RangeArgs) -> AppResult<Value> {
    let range = ctx.range(args)?;
    let snapshot = load_snapshot(&args.ledger).await?;
    let costs = snapshot
        .costs(&TenantId::new(args.tenant.as_str()))
        .await?;

    let charges = ctx.recurrence.schedule(&costs, &range)?;
    let total = ctx.recurrence.total_due(&costs, &range)?;
    Ok(json!({
        "start": range.start(),
        "end": range.end(),
        "charges": charges,
        "total": total,
    }))
}

fn to_json(value: &impl serde::Serialize) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}
