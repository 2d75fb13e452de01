//! One-shot commands: listings and non-interactive planning

use std::io::Write;

use application::{TripExporter, TripPlanner, TripSinkPort};
use domain::{NodeKey, TripCommand, TripSession, TripSummary};
use tracing::info;

use crate::render;

/// Print every country with at least one departure
pub fn countries(planner: &TripPlanner, out: &mut impl Write) -> anyhow::Result<()> {
    for country in planner.graph().origin_countries() {
        writeln!(out, "{country}")?;
    }
    Ok(())
}

/// Print the departure cities of one country
pub fn cities(planner: &TripPlanner, country: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let cities = planner.graph().origin_cities(country);
    if cities.is_empty() {
        anyhow::bail!("No departures from any city in '{}'", country.trim());
    }
    for city in cities {
        writeln!(out, "{city}")?;
    }
    Ok(())
}

/// Print where one city leads
///
/// Without `to_country` this lists the destination countries; with it, the
/// individual legs into that country.
pub fn destinations(
    planner: &TripPlanner,
    from: &NodeKey,
    to_country: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let graph = planner.graph();
    if !graph.has_origin(from) {
        anyhow::bail!("No departures from {from}");
    }

    match to_country {
        None => {
            for country in graph.destination_countries(from) {
                writeln!(out, "{country}")?;
            }
        },
        Some(country) => {
            let country = country.trim();
            let legs: Vec<_> = graph
                .nodes_from(from)
                .into_iter()
                .filter(|edge| edge.to.country() == country)
                .collect();
            if legs.is_empty() {
                anyhow::bail!("No routes from {from} into '{country}'");
            }
            for edge in legs {
                writeln!(out, "{}", render::candidate_line(edge))?;
            }
        },
    }
    Ok(())
}

/// Build a whole trip in one go and optionally export it
///
/// Stops are visited in order; the first unreachable stop aborts the plan.
pub fn plan(
    planner: &TripPlanner,
    origin: NodeKey,
    stops: Vec<NodeKey>,
    sink: Option<&dyn TripSinkPort>,
    out: &mut impl Write,
) -> anyhow::Result<TripSummary> {
    let mut session = TripSession::new();
    planner.execute(&mut session, TripCommand::SetOrigin { origin })?;
    for destination in stops {
        planner.execute(&mut session, TripCommand::AddLeg { destination })?;
    }
    planner.execute(&mut session, TripCommand::Finalize)?;

    let exporter = TripExporter::new();
    let summary = match sink {
        Some(sink) => {
            let summary = exporter.export(&session, sink)?;
            info!(destination = %sink.destination(), "Plan exported");
            summary
        },
        None => exporter.summarize(&session)?,
    };

    write!(out, "{}", render::summary_table(&summary))?;
    if let Some(sink) = sink {
        writeln!(out, "Saved to {}", sink.destination())?;
    }
    Ok(summary)
}
