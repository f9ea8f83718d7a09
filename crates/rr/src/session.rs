//! Line-oriented session against one live store.
//!
//! Each line is one command, split shell-style. A failing command prints its
//! error and the session carries on; only I/O errors end it early.

use crate::error::CliError;
use crate::render::{self, ColorMode};
use rr_core::dashboards::{DriverDashboard, GarageDashboard, Role, VolunteerDashboard};
use rr_core::types::{AwardBadgeInput, BadgeId, RequestId, VolunteerId};
use rr_core::{RequestContext, RoadRemote, Store};
use rr_events::types::EventSource;
use std::io::{BufRead, Write};

pub const HELP: &str = "\
commands:
  garage                                  show the garage dashboard
  volunteer                               show the volunteer dashboard and stats
  driver [name]                           show open requests, optionally for one driver
  accept <garage|volunteer> <id>          accept a pending request
  complete <id>                           mark a garage job completed
  confirm <id>                            confirm the helper as the driver
  available <garage|volunteer> <on|off>   toggle availability
  points <volunteer-id> <n>               award points
  badge <volunteer-id> <badge-id> <name> [description]
  events                                  print the event log
  help                                    show this text
  quit                                    end the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Show {
        role: Role,
        driver: Option<String>,
    },
    Accept {
        role: Role,
        id: RequestId,
    },
    Complete(RequestId),
    Confirm(RequestId),
    Available {
        role: Role,
        on: bool,
    },
    Points {
        volunteer: VolunteerId,
        points: u32,
    },
    Badge {
        volunteer: VolunteerId,
        badge: AwardBadgeInput,
    },
    Events,
    Help,
    Quit,
}

impl SessionCommand {
    /// `Ok(None)` for blank and comment-only lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let words = shell_words::split(strip_comment(line))
            .map_err(|err| CliError::command(err.to_string()))?;
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (name, args) {
            ("garage", []) => Self::Show {
                role: Role::Garage,
                driver: None,
            },
            ("volunteer", []) => Self::Show {
                role: Role::Volunteer,
                driver: None,
            },
            ("driver", []) => Self::Show {
                role: Role::Driver,
                driver: None,
            },
            ("driver", [name]) => Self::Show {
                role: Role::Driver,
                driver: Some((*name).to_string()),
            },
            ("accept", [role, id]) => Self::Accept {
                role: helper_role(role)?,
                id: RequestId::new(*id)?,
            },
            ("complete", [id]) => Self::Complete(RequestId::new(*id)?),
            ("confirm", [id]) => Self::Confirm(RequestId::new(*id)?),
            ("available", [role, state]) => Self::Available {
                role: helper_role(role)?,
                on: switch(state)?,
            },
            ("points", [volunteer, points]) => Self::Points {
                volunteer: VolunteerId::new(*volunteer)?,
                points: points
                    .parse()
                    .map_err(|_| CliError::command(format!("not a point count: {points}")))?,
            },
            ("badge", [volunteer, badge, name, rest @ ..]) if rest.len() <= 1 => Self::Badge {
                volunteer: VolunteerId::new(*volunteer)?,
                badge: AwardBadgeInput {
                    id: BadgeId::new(*badge)?,
                    name: (*name).to_string(),
                    description: rest.first().map(|d| (*d).to_string()).unwrap_or_default(),
                },
            },
            ("events", []) => Self::Events,
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => {
                return Err(CliError::command(format!(
                    "unrecognized command: {} (try `help`)",
                    words.join(" ")
                )));
            }
        };
        Ok(Some(command))
    }
}

/// Cuts the line at the first `#` that starts an unquoted word.
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    let mut escaped = false;
    let mut word_start = true;
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            word_start = false;
            continue;
        }
        match (quote, ch) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') | (None, '\\') => escaped = true,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '#') if word_start => return &line[..idx],
            (None, _) => {}
        }
        word_start = quote.is_none() && ch.is_whitespace();
    }
    line
}

fn helper_role(value: &str) -> Result<Role, CliError> {
    match value {
        "garage" => Ok(Role::Garage),
        "volunteer" => Ok(Role::Volunteer),
        other => Err(CliError::command(format!(
            "expected garage or volunteer, got {other}"
        ))),
    }
}

fn switch(value: &str) -> Result<bool, CliError> {
    match value {
        "on" | "open" => Ok(true),
        "off" | "closed" => Ok(false),
        other => Err(CliError::command(format!("expected on or off, got {other}"))),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub failures: usize,
}

pub struct Session<'a, S: Store, W: Write> {
    core: &'a RoadRemote<S>,
    garage: GarageDashboard<'a, S>,
    volunteer: VolunteerDashboard<'a, S>,
    driver: DriverDashboard<'a, S>,
    ctx: RequestContext,
    color: ColorMode,
    out: W,
}

impl<'a, S: Store, W: Write> Session<'a, S, W> {
    pub fn new(core: &'a RoadRemote<S>, active_volunteer: Option<VolunteerId>, out: W) -> Self {
        let volunteer = match active_volunteer {
            Some(id) => VolunteerDashboard::new(core).for_volunteer(id),
            None => VolunteerDashboard::new(core),
        };
        Self {
            core,
            garage: GarageDashboard::new(core),
            volunteer,
            driver: DriverDashboard::new(core),
            ctx: RequestContext::from_source(EventSource::Cli),
            color: ColorMode::default(),
            out,
        }
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SessionSummary, CliError> {
        let mut summary = SessionSummary::default();
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let command = match SessionCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    summary.commands += 1;
                    summary.failures += 1;
                    self.report(index + 1, &err)?;
                    continue;
                }
            };
            if command == SessionCommand::Quit {
                break;
            }
            summary.commands += 1;
            match self.execute(command) {
                Ok(()) => {}
                Err(CliError::Io(err)) => return Err(err.into()),
                Err(err) => {
                    summary.failures += 1;
                    self.report(index + 1, &err)?;
                }
            }
        }
        Ok(summary)
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<(), CliError> {
        match command {
            SessionCommand::Show { role, driver } => self.show(role, driver)?,
            SessionCommand::Accept { role, id } => {
                let note = match role {
                    Role::Volunteer => self.volunteer.accept(&id)?,
                    _ => self.garage.accept(&id)?,
                };
                render::notification(&mut self.out, self.color, &note)?;
            }
            SessionCommand::Complete(id) => {
                let note = self.garage.complete(&id)?;
                render::notification(&mut self.out, self.color, &note)?;
            }
            SessionCommand::Confirm(id) => {
                let note = self.driver.confirm(&id)?;
                render::notification(&mut self.out, self.color, &note)?;
            }
            SessionCommand::Available { role, on } => {
                match role {
                    Role::Volunteer => self.volunteer.set_available(on),
                    _ => self.garage.set_available(on),
                }
                let state = if on { "available" } else { "unavailable" };
                writeln!(self.out, "{role:?} is now {state}")?;
            }
            SessionCommand::Points { volunteer, points } => {
                let updated = self
                    .core
                    .volunteers()
                    .award_points(&self.ctx, &volunteer, points)?;
                render::stats(&mut self.out, self.color, &updated)?;
            }
            SessionCommand::Badge { volunteer, badge } => {
                let updated = self
                    .core
                    .volunteers()
                    .award_badge(&self.ctx, &volunteer, badge)?;
                render::stats(&mut self.out, self.color, &updated)?;
            }
            SessionCommand::Events => {
                for record in self.core.events().list(None, None)? {
                    render::event(&mut self.out, &record)?;
                }
            }
            SessionCommand::Help => writeln!(self.out, "{HELP}")?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    pub fn show(&mut self, role: Role, driver: Option<String>) -> Result<(), CliError> {
        match role {
            Role::Garage => {
                let available = Some(self.garage.is_available());
                render::heading(&mut self.out, self.color, "Garage Dashboard", available)?;
                let view = self.garage.requests()?;
                render::requests(&mut self.out, self.color, role, &view)?;
            }
            Role::Volunteer => {
                render::heading(
                    &mut self.out,
                    self.color,
                    "Volunteer Dashboard",
                    Some(self.volunteer.is_available()),
                )?;
                let stats = self.volunteer.stats()?;
                render::stats(&mut self.out, self.color, &stats)?;
                let view = self.volunteer.requests()?;
                render::requests(&mut self.out, self.color, role, &view)?;
            }
            Role::Driver => {
                let view = match driver {
                    Some(name) => DriverDashboard::new(self.core).for_driver(name).requests()?,
                    None => self.driver.requests()?,
                };
                render::heading(&mut self.out, self.color, "Driver View", None)?;
                render::requests(&mut self.out, self.color, role, &view)?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn report(&mut self, line: usize, err: &CliError) -> Result<(), CliError> {
        tracing::warn!(line, error = %err, "session command failed");
        writeln!(self.out, "error: {err}")?;
        Ok(())
    }
}
