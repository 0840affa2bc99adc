use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::valuation::{score_to_price, score_to_units, SecondaryValue, ValuationResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an amount in compact notation (2.9M, 450M, 1.2B, 847k)
pub fn format_amount(amount: u64, currency: &str) -> String {
    const SUFFIXES: [(f64, &str); 3] = [
        (1_000.0, "k"),
        (1_000_000.0, "M"),
        (1_000_000_000.0, "B"),
    ];

    let value = amount as f64;
    let Some(mut tier) = SUFFIXES.iter().rposition(|(div, _)| value >= *div) else {
        return format!("{} {}", amount, currency);
    };
    // 999_950 rounds to "1000.0k"; promote so it reads "1M"
    let rounded = |tier: usize| (value / SUFFIXES[tier].0 * 10.0).round() / 10.0;
    if rounded(tier) >= 1_000.0 && tier + 1 < SUFFIXES.len() {
        tier += 1;
    }
    let formatted = format!("{:.1}{}", rounded(tier), SUFFIXES[tier].1);

    // Trim trailing .0 (e.g., "450.0M" -> "450M")
    let trimmed = formatted
        .replace(".0B", "B")
        .replace(".0M", "M")
        .replace(".0k", "k");

    format!("{} {}", trimmed, currency)
}

/// Final score with one decimal place
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

fn format_secondary(secondary: &Option<SecondaryValue>) -> String {
    match secondary {
        Some(s) => format!("{:.4} {}", s.amount, s.symbol),
        None => String::new(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked results as a table with columns: Index, Score, Value, Title, Secondary
/// No headers. Index is 1-based with a trailing dot.
/// Score column is right-aligned, 5 chars wide (fits "100.0")
/// Value column is right-aligned, 12 chars wide (fits "450M KRW")
pub fn format_results_table(results: &[ValuationResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No artworks to evaluate.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 5;
    let value_width = 12;
    let separator = "  ";

    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!(
                "{:>width$}",
                format_score(result.final_score),
                width = score_width
            );
            let value_padded = format!(
                "{:>width$}",
                format_amount(result.estimated_value, &result.currency),
                width = value_width
            );
            let secondary = format_secondary(&result.secondary);

            let fixed_width = index_width
                + 1
                + score_width
                + value_width
                + separator.len() * 3
                + secondary.chars().count();

            let name = result.display_name();
            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_title(name, width - fixed_width)
                } else {
                    truncate_title(name, 20)
                }
            } else {
                name.to_string()
            };

            let line = if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    value_padded.green(),
                    separator,
                    title,
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, value_padded, separator, title,
                )
            };

            if secondary.is_empty() {
                line
            } else if use_colors {
                format!("{}{}{}", line, separator, secondary.cyan())
            } else {
                format!("{}{}{}", line, separator, secondary)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single result with its per-category breakdown (for verbose mode)
pub fn format_result_detail(result: &ValuationResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let name = result.display_name();
    if use_colors {
        lines.push(name.bold().to_string());
    } else {
        lines.push(name.to_string());
    }

    for category in &result.breakdown.categories {
        lines.push(format!(
            "  {:<14} {:>3} x {:.2} = {:>6.2}",
            format!("{}:", category.label),
            category.sub_score,
            category.weight,
            category.contribution
        ));
    }

    lines.push(format!("  Final score: {}", format_score(result.final_score)));
    lines.push(format!("  Curve units: {:.4}", result.units));

    let value = format_amount(result.estimated_value, &result.currency);
    if use_colors {
        lines.push(format!("  Estimated value: {}", value.green()));
    } else {
        lines.push(format!("  Estimated value: {}", value));
    }
    if result.secondary.is_some() {
        lines.push(format!("  Equivalent: {}", format_secondary(&result.secondary)));
    }

    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: score, value, currency, title (no headers, no colors)
pub fn format_tsv(results: &[ValuationResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{:.2}\t{}\t{}\t{}",
                result.final_score,
                result.estimated_value,
                result.currency,
                result.display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as pretty-printed JSON
pub fn format_json(results: &[ValuationResult]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Tabulate the price curve from 0 to 100 in `step` increments.
/// A step of 0 is treated as 10. Always ends with the score 100 row.
pub fn format_curve_table(step: u32, base_price_unit: f64, currency: &str) -> String {
    let step = if step == 0 { 10 } else { step.min(100) };
    let mut scores: Vec<u32> = (0..=100).step_by(step as usize).collect();
    if scores.last() != Some(&100) {
        scores.push(100);
    }

    scores
        .into_iter()
        .map(|score| {
            let s = f64::from(score);
            format!(
                "{:>3}  {:>8.4}  {:>14}",
                score,
                score_to_units(s),
                format_amount(score_to_price(s, base_price_unit), currency)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
