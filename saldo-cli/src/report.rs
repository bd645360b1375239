//! Plain-text rendering of a `Summary`.

use anyhow::{Context, Result};
use saldo_core::Transaction;
use saldo_finance::{MerchantTotal, Summary};
use std::fmt::Write;

/// Format an amount as soles, e.g. `S/ 1,234.50` or `-S/ 12.00`.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}S/ {grouped}.{:02}", cents % 100)
}

pub fn render_json(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("serialize summary")
}

pub fn render_text(summary: &Summary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, summary);
    out
}

fn write_text(out: &mut String, s: &Summary) -> std::fmt::Result {
    writeln!(out, "# Resumen {}\n", s.year)?;
    writeln!(
        out,
        "Transacciones: {} ({} válidas, {} sin fecha reconocible)",
        s.record_count, s.valid_count, s.invalid_count
    )?;
    if let (Some(start), Some(end)) = (s.highlights.period_start, s.highlights.period_end) {
        writeln!(out, "Periodo: {} al {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y"))?;
    }
    writeln!(out, "Ingresos: {}", format_money(s.total_income))?;
    writeln!(out, "Gastos:   {}", format_money(s.total_expense))?;
    writeln!(out, "Balance:  {}", format_money(s.net_balance))?;

    if let Some(t) = &s.highlights.largest_income {
        writeln!(out, "Mayor ingreso: {}", describe(t, t.income))?;
    }
    if let Some(t) = &s.highlights.largest_expense {
        writeln!(out, "Mayor gasto:   {}", describe(t, t.expense))?;
    }

    writeln!(out, "\n## Evolución mensual\n")?;
    if s.monthly.is_empty() {
        writeln!(out, "(sin datos)")?;
    }
    for m in &s.monthly {
        writeln!(
            out,
            "- {}  ingresos {}  gastos {}",
            m.month,
            format_money(m.income_total),
            format_money(m.expense_total)
        )?;
    }

    writeln!(out, "\n## Por cuenta de origen\n")?;
    let mut accounts: Vec<(&String, &f64)> = s.accounts.iter().collect();
    accounts.sort_by(|a, b| b.1.total_cmp(a.1));
    for (account, total) in accounts {
        writeln!(out, "- {account}: {}", format_money(*total))?;
    }

    write_ranking(out, "Top ingresos", &s.top_income)?;
    write_ranking(out, "Top gastos", &s.top_expense)?;

    writeln!(out, "\n## Gastos por categoría\n")?;
    for c in &s.categories {
        writeln!(
            out,
            "- {}: {} ({:.2}%, {} mov.)",
            c.category,
            format_money(c.total),
            c.share_pct,
            c.count
        )?;
    }

    if let Some(threshold) = s.anomalies.threshold {
        if !s.anomalies.flagged.is_empty() {
            writeln!(
                out,
                "\n## Posibles gastos atípicos (mayores a {})\n",
                format_money(threshold)
            )?;
            for t in &s.anomalies.flagged {
                writeln!(out, "- {}", describe(t, t.expense))?;
            }
        }
    }

    if !s.insights.is_empty() {
        writeln!(out, "\n## Recomendaciones\n")?;
        for i in &s.insights {
            writeln!(out, "* {}\n  {}", i.title, i.body)?;
        }
    }

    Ok(())
}

fn write_ranking(out: &mut String, title: &str, items: &[MerchantTotal]) -> std::fmt::Result {
    writeln!(out, "\n## {title}\n")?;
    if items.is_empty() {
        writeln!(out, "(sin datos)")?;
    }
    for (i, m) in items.iter().enumerate() {
        writeln!(out, "{}. {}  {}", i + 1, m.label, format_money(m.amount))?;
    }
    Ok(())
}

fn describe(t: &Transaction, amount: f64) -> String {
    let desc = match t.description_text().trim() {
        "" => "(sin descripción)",
        d => d,
    };
    format!("{} {} {}", t.date_text, desc, format_money(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saldo_core::RawTransaction;
    use saldo_finance::{AnalyzeOptions, analyze};

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "S/ 0.00");
        assert_eq!(format_money(12.5), "S/ 12.50");
        assert_eq!(format_money(1234.5), "S/ 1,234.50");
        assert_eq!(format_money(1234567.891), "S/ 1,234,567.89");
        assert_eq!(format_money(-100.0), "-S/ 100.00");
    }

    #[test]
    fn test_render_text_sections() {
        let raw = vec![
            RawTransaction::new("01ENE", "Pago YAPE a 987654321", "100", "").with_account("A"),
            RawTransaction::new("02ENE", "HABERES", "", "1500"),
        ];
        let s = analyze(&raw, &AnalyzeOptions::for_year(2025));
        let text = render_text(&s);
        assert!(text.contains("# Resumen 2025"));
        assert!(text.contains("Balance:  S/ 1,400.00"));
        assert!(text.contains("- 2025-01  ingresos S/ 1,500.00  gastos S/ 100.00"));
        assert!(text.contains("1. Pago YAPE a Terceros  S/ 100.00"));
        assert!(text.contains("Foco Principal: Otros Gastos"));
    }

    #[test]
    fn test_render_json() {
        let s = analyze(&[], &AnalyzeOptions::for_year(2025));
        let json = render_json(&s).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["record_count"], 0);
        assert!(v["anomalies"]["threshold"].is_null());
    }
}
