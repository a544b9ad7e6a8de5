//! Markdown report rendering.

use scanner_core::{EnrichedTicker, ScanReport};

/// Render the full pre-market report as markdown.
pub fn build_report_md(report: &ScanReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    let session = &report.session_info;

    lines.push("# Daily Scanner Analysis - Pre-Market Watchlist".to_string());
    lines.push(String::new());
    lines.push("## SESSION INFO".to_string());
    lines.push(format!("- **Date:** {}", session.date));
    lines.push(format!("- **Day of Week:** {}", session.day_of_week));
    lines.push(format!("- **Market Open (UK Time):** {}", session.market_open_uk));
    lines.push(format!(
        "- **Scanner Sources Used:** {}",
        session.scanner_sources.join(", ")
    ));
    lines.push(format!(
        "- **Number of Tickers Scanned:** {}",
        session.tickers_scanned
    ));
    lines.push(format!(
        "- **Number Passing Initial Filter:** {}",
        session.tickers_passing
    ));
    lines.push(format!(
        "- **Macro/Sector Notes:** {}",
        session.macro_notes.as_deref().unwrap_or("N/A")
    ));
    lines.push(String::new());

    // Classified tickers get full analysis blocks; gate rejections only show
    // up in the Tier 3 exclusion table below.
    let classified: Vec<&EnrichedTicker> = report
        .tickers
        .iter()
        .filter(|t| t.classification.is_some())
        .collect();
    let rejected: Vec<&EnrichedTicker> = report
        .tickers
        .iter()
        .filter(|t| t.classification.is_none())
        .collect();

    lines.push("## TICKER ANALYSIS".to_string());
    lines.push(String::new());

    for ticker in &classified {
        push_ticker_block(&mut lines, ticker);
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("## PRIORITY RANKING".to_string());
    lines.push(String::new());

    lines.push("### Tier 1: Primary Focus (MAX 4 tickers)".to_string());
    if report.priority.tier1.is_empty() {
        lines.push("- None".to_string());
    } else {
        lines.push(String::new());
        lines.push("| Rank | Ticker | Class | Primary Strategy | Conviction | Key Level |".to_string());
        lines.push("|------|--------|-------|------------------|------------|-----------|".to_string());
        for entry in &report.priority.tier1 {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                entry.rank.map_or("-".to_string(), |r| r.to_string()),
                entry.ticker,
                entry.classification.map_or("-", |c| c.name()),
                entry.primary_strategy.map_or("-", |s| s.label()),
                entry.conviction.map_or("-", |c| c.name()),
                entry
                    .key_level
                    .map_or("N/A".to_string(), |l| format!("{:.2}", l)),
            ));
        }
    }
    lines.push(String::new());

    lines.push("### Tier 2: Secondary Watch".to_string());
    if report.priority.tier2.is_empty() {
        lines.push("- None".to_string());
    } else {
        lines.push(String::new());
        lines.push("| Rank | Ticker | Class | Strategy If Active | Conviction | Why Secondary? |".to_string());
        lines.push("|------|--------|-------|--------------------|------------|----------------|".to_string());
        for entry in &report.priority.tier2 {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                entry.rank.map_or("-".to_string(), |r| r.to_string()),
                entry.ticker,
                entry.classification.map_or("-", |c| c.name()),
                entry.primary_strategy.map_or("-", |s| s.label()),
                entry.conviction.map_or("-", |c| c.name()),
                entry.why_secondary.as_deref().unwrap_or("N/A"),
            ));
        }
    }
    lines.push(String::new());

    lines.push("### Tier 3: Do Not Trade Today".to_string());
    // Classifier-driven Tier 3 merged with gate rejections.
    let mut tier3_rows: Vec<(String, String)> = report
        .priority
        .tier3
        .iter()
        .map(|entry| {
            (
                entry.ticker.clone(),
                entry.reason.clone().unwrap_or_else(|| "Excluded".to_string()),
            )
        })
        .collect();
    tier3_rows.extend(rejected.iter().map(|t| {
        (
            t.symbol().to_string(),
            t.tier_reason.clone().unwrap_or_else(|| "Failed gate".to_string()),
        )
    }));

    if tier3_rows.is_empty() {
        lines.push("- None".to_string());
    } else {
        lines.push(String::new());
        lines.push("| Ticker | Reason for Exclusion |".to_string());
        lines.push("|--------|----------------------|".to_string());
        for (ticker, reason) in &tier3_rows {
            lines.push(format!("| {} | {} |", ticker, reason));
        }
    }
    lines.push(String::new());

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("## SESSION ACTION PLAN".to_string());
    lines.push(String::new());

    for window in [
        &report.action_plan.opening_phase,
        &report.action_plan.mid_session,
        &report.action_plan.late_session,
    ] {
        lines.push(format!("### {}", window.title));
        for item in &window.items {
            lines.push(format!("- {}", item));
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("## STOP CONDITIONS".to_string());
    lines.push(String::new());
    let stops = &report.stop_conditions;
    lines.push(format!(
        "- **Daily Monetary Loss Limit:** ${}",
        stops.daily_loss_limit
    ));
    lines.push(format!(
        "- **Maximum Losing Trades:** {}",
        stops.max_losing_trades
    ));
    lines.push(format!(
        "- **Emotional Check-In Time:** {} (UK)",
        stops.emotional_check_time
    ));
    lines.push(format!("- **Hard Close Time (UK):** {}", stops.hard_close_uk));
    lines.push(String::new());

    lines.join("\n")
}

fn push_ticker_block(lines: &mut Vec<String>, ticker: &EnrichedTicker) {
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(format!("### {}", ticker.symbol()));
    lines.push(String::new());
    lines.push(format!("**Price:** {}", fmt(ticker.input.price())));
    lines.push(format!(
        "**Catalyst Type:** {}",
        ticker
            .catalyst
            .as_ref()
            .map_or("N/A", |c| c.catalyst_type.name())
    ));
    lines.push(format!(
        "**Catalyst Detail:** {}",
        ticker.catalyst.as_ref().map_or("N/A", |c| c.detail.as_str())
    ));
    lines.push(format!(
        "**Earnings Timing:** {}",
        ticker
            .catalyst
            .as_ref()
            .and_then(|c| c.earnings_timing.as_deref())
            .unwrap_or("N/A")
    ));
    lines.push(format!(
        "**Float / Avg Volume:** {} / {}",
        fmt_int(ticker.input.float),
        fmt_int(ticker.input.avg_volume)
    ));
    lines.push(format!(
        "**Relative Volume (PM):** {}",
        ticker
            .rel_volume
            .map_or("N/A".to_string(), |v| format!("{:.2}x", v))
    ));
    lines.push(String::new());

    lines.push("**KEY LEVELS:**".to_string());
    let levels = &ticker.levels;
    lines.push(format!("- Previous Day High: {}", fmt(levels.prev_high)));
    lines.push(format!("- Previous Day Low: {}", fmt(levels.prev_low)));
    lines.push(format!("- Previous Day Close: {}", fmt(levels.prev_close)));
    lines.push(format!("- Pre-Market High: {}", fmt(levels.pm_high)));
    lines.push(format!("- Pre-Market Low: {}", fmt(levels.pm_low)));
    lines.push(format!(
        "- 52-Week High / Low: {} / {}",
        fmt(levels.week52_high),
        fmt(levels.week52_low)
    ));
    lines.push(format!("- HTF Resistance: {}", fmt(levels.htf_resistance)));
    lines.push(format!("- HTF Support: {}", fmt(levels.htf_support)));
    lines.push(String::new());

    lines.push("**CLASSIFICATION:**".to_string());
    lines.push(format!(
        "- Classification: **{}**",
        ticker.classification.map_or("N/A", |c| c.name())
    ));
    lines.push(format!(
        "- Classification Reasoning: {}",
        ticker.classification_reason.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "- Permitted Strategies: {}",
        ticker
            .permitted_strategies
            .as_ref()
            .filter(|s| !s.is_empty())
            .map_or("N/A".to_string(), |s| s
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", "))
    ));
    lines.push(format!(
        "- Primary Strategy: {}",
        ticker.primary_strategy.map_or("N/A", |s| s.label())
    ));
    lines.push(format!(
        "- Secondary Strategy: {}",
        ticker.secondary_strategy.map_or("N/A", |s| s.label())
    ));
    lines.push(format!(
        "- Conditional Note: {}",
        ticker.conditional_note.as_deref().unwrap_or("N/A")
    ));
    lines.push(String::new());

    lines.push("**RISK ASSESSMENT:**".to_string());
    lines.push(format!(
        "- Primary Risk: {}",
        ticker.primary_risk.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "- Invalidation: {}",
        ticker.invalidation.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "- Conviction: **{}**",
        ticker.conviction.map_or("N/A", |c| c.name())
    ));
    lines.push(String::new());
}

fn fmt(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |v| format!("{:.2}", v))
}

fn fmt_int(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if v >= 1e9 => format!("{:.1}B", v / 1e9),
        Some(v) if v >= 1e6 => format!("{:.1}M", v / 1e6),
        Some(v) if v >= 1e3 => format!("{:.0}K", v / 1e3),
        Some(v) => format!("{}", v),
    }
}
