//! Text rendering for terminal output

use std::fmt::Write;

use domain::{Edge, TripSummary};

/// `Paris, France -> Amsterdam, Netherlands  507 km / 315 mi`
pub fn leg_line(edge: &Edge) -> String {
    format!(
        "{} -> {}  {} km / {} mi",
        edge.from, edge.to, edge.distance_km, edge.distance_mi
    )
}

/// `Netherlands/Amsterdam  507 km / 315 mi`, ready to paste into `dest`
pub fn candidate_line(edge: &Edge) -> String {
    format!(
        "{}/{}  {} km / {} mi",
        edge.to.country(),
        edge.to.city(),
        edge.distance_km,
        edge.distance_mi
    )
}

/// Numbered leg table with totals
pub fn summary_table(summary: &TripSummary) -> String {
    let from_width = summary
        .legs
        .iter()
        .map(|leg| leg.from.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max("From".len());
    let to_width = summary
        .legs
        .iter()
        .map(|leg| leg.to.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max("To".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<from_width$}  {:<to_width$}  {:>10}  {:>10}",
        "#", "From", "To", "km", "mi"
    );
    for (idx, leg) in summary.legs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<from_width$}  {:<to_width$}  {:>10}  {:>10}",
            idx + 1,
            leg.from.to_string(),
            leg.to.to_string(),
            leg.distance_km,
            leg.distance_mi
        );
    }
    let _ = writeln!(
        out,
        "{:>3}  {:<from_width$}  {:<to_width$}  {:>10}  {:>10}",
        "",
        "Total",
        "",
        summary.total_km,
        summary.total_mi
    );
    out
}
