//! Interactive trip-building shell
//!
//! Reads one command per line and applies it to the traveler's session.
//! Rejected commands are reported and the shell carries on; only I/O
//! failures end it early.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use application::{
    ApplicationError, CommandOutcome, SessionRegistry, TripExporter, TripPlanner, filter_indices,
};
use domain::{DomainError, NodeKey, TravelerId, TripCommand, TripState};
use infrastructure::{ExportFormat, create_sink};
use tracing::debug;

use crate::render;

const HELP: &str = "\
Commands:
  origin <Country>/<City>   start the trip
  origin <n>                start at option n of the last listing
  dest <Country>/<City>     add a leg from the current stop
  dest <n>                  add a leg to option n of the last listing
  candidates [filter]       list numbered origins or next stops
  legs                      show the legs so far
  finish                    lock the trip
  export [path]             write the finished trip
  reset                     discard the trip
  help                      show this help
  quit                      leave the shell";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Origin(String),
    Dest(String),
    Candidates(String),
    Legs,
    Finish,
    Export(Option<PathBuf>),
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellInput {
    /// Parse a line; the verb is case-insensitive
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_lowercase().as_str() {
            "" => Self::Empty,
            "origin" => Self::Origin(rest.to_string()),
            "dest" | "destination" => Self::Dest(rest.to_string()),
            "candidates" | "ls" => Self::Candidates(rest.to_string()),
            "legs" => Self::Legs,
            "finish" => Self::Finish,
            "export" => Self::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(verb.to_string()),
        }
    }
}

/// Interactive shell bound to one traveler
#[derive(Debug)]
pub struct SessionShell<'a> {
    planner: &'a TripPlanner,
    registry: &'a SessionRegistry,
    traveler: TravelerId,
    exporter: TripExporter,
    output_path: PathBuf,
    format: ExportFormat,
    last_listing: Vec<NodeKey>,
}

impl<'a> SessionShell<'a> {
    /// Open a fresh session in `registry`
    pub fn new(
        planner: &'a TripPlanner,
        registry: &'a SessionRegistry,
        output_path: PathBuf,
        format: ExportFormat,
    ) -> Self {
        Self {
            planner,
            registry,
            traveler: registry.open(),
            exporter: TripExporter::new(),
            output_path,
            format,
            last_listing: Vec::new(),
        }
    }

    /// The traveler this shell acts for
    pub const fn traveler(&self) -> TravelerId {
        self.traveler
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "Type 'help' for commands.")?;
        for line in input.lines() {
            let line = line?;
            match ShellInput::parse(&line) {
                ShellInput::Quit => break,
                command => {
                    if let Err(err) = self.handle(command, out)? {
                        if !err.is_recoverable() {
                            return Err(err.into());
                        }
                        writeln!(out, "error: {err}")?;
                    }
                },
            }
        }
        self.registry.end(self.traveler);
        Ok(())
    }

    /// Apply one input; the inner result carries command rejections
    fn handle(
        &mut self,
        input: ShellInput,
        out: &mut impl Write,
    ) -> std::io::Result<Result<(), ApplicationError>> {
        let result = match input {
            ShellInput::Origin(arg) => match self.resolve(&arg) {
                Ok(origin) => self.execute(TripCommand::SetOrigin { origin }, out)?,
                Err(err) => Err(err.into()),
            },
            ShellInput::Dest(arg) => match self.resolve(&arg) {
                Ok(destination) => self.execute(TripCommand::AddLeg { destination }, out)?,
                Err(err) => Err(err.into()),
            },
            ShellInput::Finish => self.execute(TripCommand::Finalize, out)?,
            ShellInput::Reset => self.execute(TripCommand::Reset, out)?,
            ShellInput::Candidates(filter) => {
                self.candidates(&filter, out)?;
                Ok(())
            },
            ShellInput::Legs => {
                self.legs(out)?;
                Ok(())
            },
            ShellInput::Export(path) => self.export(path, out)?,
            ShellInput::Help => {
                writeln!(out, "{HELP}")?;
                Ok(())
            },
            ShellInput::Unknown(verb) => {
                writeln!(out, "Unknown command '{verb}'. Type 'help' for commands.")?;
                Ok(())
            },
            ShellInput::Empty | ShellInput::Quit => Ok(()),
        };
        Ok(result)
    }

    /// `Country/City`, or a number picked from the last `candidates` listing
    fn resolve(&self, arg: &str) -> Result<NodeKey, DomainError> {
        if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
            return NodeKey::parse(arg);
        }
        arg.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.last_listing.get(idx))
            .cloned()
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "no option {arg} in the last listing; run 'candidates' first"
                ))
            })
    }

    fn execute(
        &mut self,
        command: TripCommand,
        out: &mut impl Write,
    ) -> std::io::Result<Result<(), ApplicationError>> {
        debug!(command = command.name(), traveler = %self.traveler, "Shell command");
        let outcome = self
            .registry
            .with_session(self.traveler, |session| self.planner.execute(session, command));

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => return Ok(Err(err)),
        };
        self.last_listing.clear();

        match outcome {
            CommandOutcome::OriginSet { origin, candidates } => {
                writeln!(out, "Starting at {}", origin.key)?;
                write_candidate_count(candidates, out)?;
            },
            CommandOutcome::LegAdded { leg, candidates } => {
                writeln!(out, "Added {}", render::leg_line(&leg))?;
                write_candidate_count(candidates, out)?;
            },
            CommandOutcome::Finalized { .. } => {
                let summary = self
                    .registry
                    .with_session(self.traveler, |session| self.exporter.summarize(session));
                match summary {
                    Ok(summary) => {
                        write!(out, "{}", render::summary_table(&summary))?;
                        writeln!(out, "Trip finished. Use 'export' to save it.")?;
                    },
                    Err(err) => return Ok(Err(err)),
                }
            },
            CommandOutcome::Reset => writeln!(out, "Trip discarded.")?,
        }
        Ok(Ok(()))
    }

    fn candidates(&mut self, filter: &str, out: &mut impl Write) -> std::io::Result<()> {
        self.last_listing.clear();
        let session = self.registry.snapshot(self.traveler).unwrap_or_default();
        let (keys, labels): (Vec<NodeKey>, Vec<String>) = match session.state() {
            TripState::Empty => {
                let graph = self.planner.graph();
                graph
                    .origin_countries()
                    .into_iter()
                    .flat_map(|country| {
                        graph.origin_cities(country).into_iter().map(move |city| {
                            (NodeKey::new(country, city), format!("{country}/{city}"))
                        })
                    })
                    .unzip()
            },
            TripState::Building => self
                .planner
                .candidates(&session)
                .into_iter()
                .map(|edge| (edge.to.clone(), render::candidate_line(edge)))
                .unzip(),
            TripState::Finalized => {
                writeln!(out, "Trip is finished; 'reset' to start over.")?;
                return Ok(());
            },
        };

        let shown = filter_indices(&labels, filter);
        if shown.is_empty() {
            writeln!(out, "(none)")?;
        }
        for (n, idx) in shown.into_iter().enumerate() {
            writeln!(out, "{:>3}. {}", n + 1, labels[idx])?;
            self.last_listing.push(keys[idx].clone());
        }
        Ok(())
    }

    fn legs(&self, out: &mut impl Write) -> std::io::Result<()> {
        let session = self.registry.snapshot(self.traveler).unwrap_or_default();
        if session.legs().is_empty() {
            match session.current_origin() {
                Some(origin) => writeln!(out, "At {} with no legs yet.", origin.key)?,
                None => writeln!(out, "No origin set.")?,
            }
            return Ok(());
        }

        let mut total_km = 0.0;
        let mut total_mi = 0.0;
        for (idx, leg) in session.legs().iter().enumerate() {
            total_km += leg.distance_km;
            total_mi += leg.distance_mi;
            writeln!(out, "{:>3}  {}", idx + 1, render::leg_line(leg))?;
        }
        writeln!(out, "     Total  {total_km} km / {total_mi} mi")?;
        Ok(())
    }

    fn export(
        &self,
        path: Option<PathBuf>,
        out: &mut impl Write,
    ) -> std::io::Result<Result<(), ApplicationError>> {
        let Some(session) = self.registry.snapshot(self.traveler) else {
            return Ok(Ok(()));
        };
        let path = path.unwrap_or_else(|| self.output_path.clone());
        let sink = create_sink(self.format, &path);

        match self.exporter.export(&session, sink.as_ref()) {
            Ok(summary) => {
                writeln!(
                    out,
                    "Saved {} leg(s) to {}",
                    summary.leg_count(),
                    sink.destination()
                )?;
                Ok(Ok(()))
            },
            Err(err) => Ok(Err(err)),
        }
    }
}

fn write_candidate_count(candidates: usize, out: &mut impl Write) -> std::io::Result<()> {
    if candidates == 0 {
        writeln!(out, "No routes lead on from here; 'finish' or 'reset'.")
    } else {
        writeln!(out, "{candidates} possible next stop(s); 'candidates' to list them.")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use domain::{Edge, GeoLocation, RouteGraph};

    use super::*;

    fn key(country: &str, city: &str) -> NodeKey {
        NodeKey::new(country, city)
    }

    fn planner() -> TripPlanner {
        let edge = |from: NodeKey, to: NodeKey, km: f64, mi: f64| {
            Edge::new(
                from,
                to,
                GeoLocation::new(1.0, 1.0),
                GeoLocation::new(2.0, 2.0),
                km,
                mi,
            )
        };
        TripPlanner::new(Arc::new(RouteGraph::from_edges(vec![
            edge(key("France", "Paris"), key("Netherlands", "Amsterdam"), 507.0, 315.0),
            edge(key("France", "Paris"), key("Belgium", "Brussels"), 264.0, 164.0),
            edge(key("Netherlands", "Amsterdam"), key("Germany", "Berlin"), 577.0, 359.0),
        ])))
    }

    fn run_script(planner: &TripPlanner, output_path: PathBuf, script: &str) -> String {
        let registry = SessionRegistry::new();
        let mut shell = SessionShell::new(planner, &registry, output_path, ExportFormat::Csv);
        let mut out = Vec::new();
        shell.run(Cursor::new(script), &mut out).unwrap();
        assert!(registry.is_empty());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_verbs_and_arguments() {
        assert_eq!(
            ShellInput::parse("  ORIGIN  France/Paris "),
            ShellInput::Origin("France/Paris".to_string())
        );
        assert_eq!(
            ShellInput::parse("dest Netherlands/Den Haag"),
            ShellInput::Dest("Netherlands/Den Haag".to_string())
        );
        assert_eq!(ShellInput::parse("candidates"), ShellInput::Candidates(String::new()));
        assert_eq!(ShellInput::parse("export"), ShellInput::Export(None));
        assert_eq!(
            ShellInput::parse("export out/trip.csv"),
            ShellInput::Export(Some(PathBuf::from("out/trip.csv")))
        );
        assert_eq!(ShellInput::parse(""), ShellInput::Empty);
        assert_eq!(ShellInput::parse("exit"), ShellInput::Quit);
        assert_eq!(ShellInput::parse("fly"), ShellInput::Unknown("fly".to_string()));
    }

    #[test]
    fn builds_and_finishes_a_trip() {
        let planner = planner();
        let out = run_script(
            &planner,
            PathBuf::from("unused.csv"),
            "origin France/Paris\ndest Netherlands/Amsterdam\ndest Germany/Berlin\nfinish\nquit\n",
        );

        assert!(out.contains("Starting at Paris, France"));
        assert!(out.contains("2 possible next stop(s)"));
        assert!(out.contains("Added Paris, France -> Amsterdam, Netherlands  507 km / 315 mi"));
        assert!(out.contains("No routes lead on from here"));
        assert!(out.contains("Trip finished."));
        assert!(out.contains("1084"));
    }

    #[test]
    fn rejected_commands_do_not_end_the_shell() {
        let planner = planner();
        let out = run_script(
            &planner,
            PathBuf::from("unused.csv"),
            "dest Germany/Berlin\norigin France/Paris\ndest Germany/Berlin\norigin Paris\nlegs\n",
        );

        assert!(out.contains("error: Invalid transition: cannot add a leg while session is empty"));
        assert!(out.contains("error: No route from Paris, France to Berlin, Germany"));
        assert!(out.contains("error: Validation failed"));
        assert!(out.contains("At Paris, France with no legs yet."));
    }

    #[test]
    fn candidates_are_filtered() {
        let planner = planner();
        let out = run_script(
            &planner,
            PathBuf::from("unused.csv"),
            "candidates fran\norigin France/Paris\ncandidates BEL\ncandidates xyz\n",
        );

        assert!(out.contains("  1. France/Paris\n"));
        assert!(!out.contains("Netherlands/Amsterdam\n"));
        assert!(out.contains("  1. Belgium/Brussels  264 km / 164 mi"));
        assert!(out.contains("(none)"));
    }

    #[test]
    fn export_requires_finished_trip_then_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trip.csv");
        let planner = planner();
        let out = run_script(
            &planner,
            path.clone(),
            "origin France/Paris\ndest Belgium/Brussels\nexport\nfinish\nexport\n",
        );

        assert!(out.contains("error: Invalid transition: cannot summarize a trip that is building"));
        assert!(out.contains("Saved 1 leg(s) to"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("France,Paris,Belgium,Brussels,264,164"));
    }

    #[test]
    fn reset_starts_over() {
        let planner = planner();
        let out = run_script(
            &planner,
            PathBuf::from("unused.csv"),
            "origin France/Paris\nreset\nlegs\norigin France/Paris\n",
        );
        assert!(out.contains("Trip discarded."));
        assert!(out.contains("No origin set."));
        assert_eq!(out.matches("Starting at Paris, France").count(), 2);
    }

    #[test]
    fn numbered_picks_follow_the_last_listing() {
        let planner = planner();
        let out = run_script(
            &planner,
            PathBuf::from("unused.csv"),
            "origin 1\ncandidates\norigin 1\ncandidates\ndest 3\ndest 1\ndest 1\nlegs\n",
        );

        assert_eq!(
            out.matches("error: Validation failed: no option 1 in the last listing")
                .count(),
            2
        );
        assert!(out.contains("  1. France/Paris\n"));
        assert!(out.contains("Starting at Paris, France"));
        assert!(out.contains("  1. Netherlands/Amsterdam  507 km / 315 mi"));
        assert!(out.contains("  2. Belgium/Brussels  264 km / 164 mi"));
        assert!(out.contains("error: Validation failed: no option 3 in the last listing"));
        assert!(out.contains("Added Paris, France -> Amsterdam, Netherlands"));
        assert!(out.contains("  1  Paris, France -> Amsterdam, Netherlands"));
        assert!(!out.contains("Added Amsterdam, Netherlands -> Berlin, Germany"));
    }

    #[test]
    fn numbers_index_the_filtered_listing() {
        let planner = planner();
        let out = run_script(
            &planner,
            PathBuf::from("unused.csv"),
            "origin France/Paris\ncandidates ams\ndest 1\nlegs\n",
        );

        assert!(out.contains("  1. Netherlands/Amsterdam"));
        assert!(!out.contains("Belgium/Brussels  264"));
        assert!(out.contains("  1  Paris, France -> Amsterdam, Netherlands"));
    }
}
