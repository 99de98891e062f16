//! Colored rendering of the run report.
//!
//! The pipeline itself knows nothing about terminals: everything it
//! returns is rendered here, and the color choice is a plain value passed
//! in at construction.

use std::io::{self, Write};
use std::path::Path;

use strsift::{GroupReport, MatchRecord, Provenance, RunSummary};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const RULE_WIDTH: usize = 70;

pub struct Renderer {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl Renderer {
    pub fn new(color: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(color),
            stderr: StandardStream::stderr(color),
        }
    }

    /// Fatal diagnostic, red on stderr.
    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(self.stderr, "{msg}")?;
        self.stderr.reset()
    }

    fn colored(&mut self, color: Color, msg: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(self.stdout, "{msg}")?;
        self.stdout.reset()
    }

    pub fn info(&mut self, msg: &str) -> io::Result<()> {
        self.colored(Color::Cyan, msg)
    }

    pub fn success(&mut self, msg: &str) -> io::Result<()> {
        self.colored(Color::Green, msg)
    }

    pub fn banner(&mut self, file: &Path, json: &Path) -> io::Result<()> {
        let rule = "═".repeat(RULE_WIDTH);
        self.colored(Color::Blue, &rule)?;
        self.colored(Color::Blue, "  Regex pattern search over a binary file")?;
        self.colored(Color::Blue, &rule)?;
        writeln!(self.stdout, "Target file: {}", file.display())?;
        writeln!(self.stdout, "Pattern file: {}", json.display())?;
        writeln!(self.stdout)
    }

    pub fn group(&mut self, report: &GroupReport) -> io::Result<()> {
        self.colored(Color::Cyan, &"━".repeat(RULE_WIDTH))?;

        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(self.stdout, "Pattern: ")?;
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(self.stdout, "{}", report.name)?;
        self.stdout.reset()?;

        if report.is_list {
            writeln!(
                self.stdout,
                "Type: array with {} pattern(s)",
                report.evaluations.len()
            )?;
        }
        writeln!(self.stdout)?;

        // Lists get numbered, indented sub-reports; a scalar pattern is
        // rendered flat.
        let indent = if report.is_list { "  " } else { "" };
        for (idx, evaluation) in report.evaluations.iter().enumerate() {
            if report.is_list {
                writeln!(self.stdout, "  Regex {}: {}", idx + 1, evaluation.pattern)?;
            } else {
                writeln!(self.stdout, "Regex: {}", evaluation.pattern)?;
            }

            match &evaluation.result {
                Err(msg) => {
                    self.stdout
                        .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                    writeln!(self.stdout, "{indent}  Warning: invalid regex: {msg}")?;
                    self.stdout.reset()?;
                }
                Ok(matches) if matches.total == 0 => {
                    self.stdout
                        .set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                    writeln!(self.stdout, "{indent}  ✗ No results found")?;
                    self.stdout.reset()?;
                }
                Ok(matches) => {
                    self.stdout
                        .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                    writeln!(
                        self.stdout,
                        "{indent}  ✓ Found {} unique result(s):",
                        matches.total
                    )?;
                    self.stdout.reset()?;
                    writeln!(self.stdout)?;

                    for record in &matches.records {
                        self.record(record, indent)?;
                    }
                    if matches.suppressed() > 0 {
                        self.stdout
                            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                        writeln!(
                            self.stdout,
                            "{indent}    ... and {} more result(s)",
                            matches.suppressed()
                        )?;
                        self.stdout.reset()?;
                    }
                }
            }
            writeln!(self.stdout)?;
        }

        Ok(())
    }

    fn record(&mut self, record: &MatchRecord, indent: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
        write!(self.stdout, "{indent}    →")?;
        self.stdout.reset()?;
        writeln!(self.stdout, " {}", record.text)?;

        if let Provenance::Base64(encoded) = &record.provenance {
            self.stdout
                .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(self.stdout, "{indent}      Source:")?;
            self.stdout.reset()?;
            writeln!(self.stdout, " base64: {encoded}")?;
            self.stdout
                .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(self.stdout, "{indent}      Decoded:")?;
            self.stdout.reset()?;
            writeln!(self.stdout, " {}", record.context)?;
        }
        Ok(())
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        let rule = "═".repeat(RULE_WIDTH);
        self.colored(Color::Blue, &rule)?;
        self.success("Search complete!")?;
        writeln!(
            self.stdout,
            "Total patterns processed: {}",
            summary.total_patterns
        )?;
        writeln!(
            self.stdout,
            "Total matches found: {}",
            summary.total_matches
        )?;
        self.colored(Color::Blue, &rule)
    }
}
