//! 리스크 정책 기반 포지션 사이징.

use std::fmt::Write;

use anyhow::{bail, Context, Result};
use journal_core::PositionSide;
use journal_risk::{r_multiple, PositionSizer, RiskPolicy, SizingPlan};
use rust_decimal::Decimal;
use serde::Serialize;

use super::render::OutputFormat;

/// 사이징 보고서.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeReport {
    pub side: PositionSide,
    #[serde(flatten)]
    pub plan: SizingPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_r: Option<Decimal>,
}

/// 가격 인자를 파싱합니다.
pub fn parse_price(name: &str, s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid {}: {}", name, s))
}

/// 진입가/손절가(선택적으로 목표가)로 사이징 보고서를 만듭니다.
///
/// 손절가가 진입가보다 낮으면 롱, 높으면 숏으로 봅니다.
pub fn size_report(
    policy: RiskPolicy,
    entry: Decimal,
    stop: Decimal,
    target: Option<Decimal>,
) -> Result<SizeReport> {
    if entry <= Decimal::ZERO {
        bail!("Entry price must be positive: {}", entry);
    }
    if entry == stop {
        bail!("Stop price must differ from entry price");
    }

    let side = if stop < entry {
        PositionSide::Long
    } else {
        PositionSide::Short
    };
    let plan = PositionSizer::new(policy).plan(entry, stop);
    let target_r = target.and_then(|t| r_multiple(side, entry, stop, t));

    Ok(SizeReport {
        side,
        plan,
        target_r,
    })
}

/// 사이징 보고서를 출력 문자열로 만듭니다.
pub fn run_size(
    policy: RiskPolicy,
    entry: Decimal,
    stop: Decimal,
    target: Option<Decimal>,
    format: OutputFormat,
) -> Result<String> {
    let report = size_report(policy, entry, stop, target)?;

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut out = String::new();
    let plan = &report.plan;
    writeln!(out, "방향:        {}", report.side)?;
    writeln!(out, "수량:        {}", plan.size)?;
    writeln!(out, "허용 리스크: {:.2}", plan.risk_amount)?;
    writeln!(out, "손절 거리:   {}", plan.stop_distance)?;
    writeln!(
        out,
        "명목 가치:   {:.2} (예산의 {:.2}%)",
        plan.notional, plan.notional_budget_pct
    )?;
    if let Some(r) = report.target_r {
        writeln!(out, "목표 R:      {}", r)?;
    }
    Ok(out)
}
