//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized

use crate::domain::{CalendarSignal, Domain, FusionReport, Insight, PeakLevel, SignalLevel};

/// Header, component scores, time overlap and the per-layer summary.
pub fn format_fusion_summary(report: &FusionReport, tables_version: &str) -> String {
    let mut out = String::new();
    let c = &report.components;
    let t = &report.time_overlap;

    out.push_str("=== fm - Saju x Astrology Fusion Matrix ===\n");
    out.push_str(&format!("Tables: {tables_version}\n"));
    out.push_str(&format!("Timeline start: {}\n", report.start_month));
    out.push_str(&format!(
        "Coverage: {:.0}% ({} of 10 layers, {} cells)\n",
        c.data_coverage * 100.0,
        report.layers.populated_layers(),
        report.layers.total_cells(),
    ));
    out.push_str(&format!(
        "Components: saju={:.3} astro={:.3} bridge={:.3} | alignment={:.3}\n",
        c.saju_component_score, c.astro_component_score, c.overlap_bridge_score, report.alignment_score,
    ));
    out.push_str(&format!(
        "Time overlap: strength={:.3} weight={:.3} (element={:.2} strong={:.2} progression={:.2} timing={:.2})\n",
        t.overlap_strength,
        t.time_overlap_weight,
        t.element_overlap,
        t.strong_signal,
        t.progression_density,
        t.timing_density,
    ));

    out.push_str("\nLayers:\n");
    for s in &report.layer_summaries {
        let mean = if s.cell_count == 0 {
            "-".to_string()
        } else {
            format!("{:.3}", s.mean)
        };
        out.push_str(&format!(
            "  {:>2} {:<24} cells={:<4} mean={mean}\n",
            s.layer.number(),
            s.layer.display_name(),
            s.cell_count,
        ));
    }

    out
}

pub fn format_domain_scores(report: &FusionReport) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:<12} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}  {}",
            "domain", "base", "final", "saju", "astro", "align", "conf", "weight", "tags"
        ),
    );
    push_line(
        &mut out,
        format!(
            "{:-<12} {:-<6} {:-<6} {:-<6} {:-<6} {:-<6} {:-<6} {:-<6}  {:-<4}",
            "", "", "", "", "", "", "", "", ""
        ),
    );

    for d in report.domain_scores.values() {
        let tags: Vec<String> = d
            .drivers
            .iter()
            .map(|t| format!("+{t}"))
            .chain(d.cautions.iter().map(|t| format!("!{t}")))
            .collect();
        push_line(
            &mut out,
            format!(
                "{:<12} {:>6.2} {:>6.2} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3}  {}",
                truncate(d.domain.display_name(), 12),
                d.base_final_score,
                d.final_score_adjusted,
                d.saju_component_score,
                d.astro_component_score,
                d.alignment_score,
                d.confidence_score,
                d.time_overlap_weight,
                tags.join(", "),
            ),
        );
    }
    out
}

pub fn format_signals(signals: &[CalendarSignal]) -> String {
    if signals.is_empty() {
        return "Signals: none\n".to_string();
    }
    let mut out = String::from("Signals:\n");
    for s in signals {
        let level = match s.level {
            SignalLevel::High => "HIGH",
            SignalLevel::Medium => "MED",
            SignalLevel::Caution => "WARN",
        };
        let domain = s.domain.map(|d| format!(" [{}]", d.display_name())).unwrap_or_default();
        out.push_str(&format!("  {level:<5} {:>5.2}  {}{domain}\n", s.score, s.trigger));
    }
    out
}

pub fn format_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "Insights: none\n".to_string();
    }
    let mut out = String::from("Top insights:\n");
    for (i, ins) in insights.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}) [L{} {}] {} (score {}, {:?}, sig {:.2})\n",
            i + 1,
            ins.layer.number(),
            ins.layer.key(),
            ins.keyword_en,
            ins.score,
            ins.category,
            ins.significance,
        ));
    }
    out
}

/// Month × domain overlap table; `only` restricts the columns to one domain.
pub fn format_timeline_table(report: &FusionReport, only: Option<Domain>) -> String {
    let domains: Vec<Domain> = Domain::ALL
        .into_iter()
        .filter(|d| only.is_none_or(|o| o == *d))
        .collect();

    let mut out = String::new();
    let mut header = format!("{:<8} {:>7}", "month", "global");
    for d in &domains {
        header.push_str(&format!(" {:>8}", truncate(d.key(), 8)));
    }
    push_line(&mut out, header);

    for (i, p) in report.timeline.iter().enumerate() {
        let mut line = format!("{:<8} {:>6.3}{}", p.month, p.overlap_strength, marker(p.peak_level));
        for d in &domains {
            let cell = report
                .timeline_by_domain
                .get(d)
                .and_then(|points| points.get(i))
                .map(|dp| format!("{:>7.3}{}", dp.overlap_strength, marker(dp.peak_level)))
                .unwrap_or_else(|| format!("{:>8}", "-"));
            line.push(' ');
            line.push_str(&cell);
        }
        push_line(&mut out, line);
    }
    out.push_str("(* peak, + high)\n");
    out
}

fn marker(level: PeakLevel) -> char {
    match level {
        PeakLevel::Peak => '*',
        PeakLevel::High => '+',
        PeakLevel::Normal => ' ',
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LayerTables;
    use crate::domain::{FiveElement, MatrixCalculationInput, WesternElement};
    use crate::engine::{FusionOptions, calculate_fusion};
    use crate::math::YearMonth;

    fn report() -> FusionReport {
        let mut input = MatrixCalculationInput::new(FiveElement::Fire, vec![FiveElement::Fire; 4]);
        input.dominant_western_element = Some(WesternElement::Fire);
        let options = FusionOptions {
            start_month: YearMonth::new(2025, 1),
            insight_limit: 3,
        };
        calculate_fusion(&input, LayerTables::builtin(), &options)
    }

    #[test]
    fn summary_lists_every_layer() {
        let text = format_fusion_summary(&report(), "builtin-1");
        assert!(text.contains("Tables: builtin-1"));
        assert!(text.contains("Timeline start: 2025-01"));
        assert!(text.contains("Element Core"));
        assert!(text.contains("Extra Point x Sibsin"));
        assert!(text.contains("Coverage: 10% (1 of 10 layers, 1 cells)"));
    }

    #[test]
    fn domain_table_has_header_rule_and_five_rows() {
        let text = format_domain_scores(&report());
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().any(|l| l.starts_with("Move/Change")));
    }

    #[test]
    fn timeline_table_filters_domains() {
        let r = report();
        let all = format_timeline_table(&r, None);
        assert!(all.lines().next().unwrap().contains("health"));
        let one = format_timeline_table(&r, Some(Domain::Love));
        let header = one.lines().next().unwrap();
        assert!(header.contains("love"));
        assert!(!header.contains("career"));
        // header + 12 months + legend
        assert_eq!(one.lines().count(), 14);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("career", 12), "career");
        assert_eq!(truncate("Move/Change", 5), "Move.");
    }

    #[test]
    fn empty_lists_render_placeholders() {
        assert_eq!(format_signals(&[]), "Signals: none\n");
        assert_eq!(format_insights(&[]), "Insights: none\n");
    }
}
