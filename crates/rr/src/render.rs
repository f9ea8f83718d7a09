use owo_colors::{OwoColorize, Stream::Stdout, Style};
use rr_core::dashboards::{Action, EMPTY_VIEW_MESSAGE, Notification, Role, action_enabled, status_label};
use rr_core::types::{HelpRequest, RequestStatus, Volunteer};
use rr_events::types::EventRecord;
use std::fmt::Display;
use std::io::{self, Write};

/// Whether rendered text may carry ANSI styling. `Auto` defers to stdout's
/// terminal support; the writer itself may be anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Never,
}

impl ColorMode {
    fn paint<T: Display>(self, text: T, style: Style) -> String {
        match self {
            Self::Auto => text
                .if_supports_color(Stdout, |t| t.style(style))
                .to_string(),
            Self::Never => text.to_string(),
        }
    }
}

pub fn heading(
    out: &mut impl Write,
    color: ColorMode,
    title: &str,
    available: Option<bool>,
) -> io::Result<()> {
    write!(out, "{}", color.paint(format!("== {title} =="), Style::new().bold()))?;
    match available {
        Some(true) => writeln!(out, " {}", color.paint("open", Style::new().green())),
        Some(false) => writeln!(out, " {}", color.paint("closed", Style::new().red())),
        None => writeln!(out),
    }
}

pub fn requests(
    out: &mut impl Write,
    color: ColorMode,
    role: Role,
    requests: &[HelpRequest],
) -> io::Result<()> {
    if requests.is_empty() {
        return writeln!(out, "{}", color.paint(EMPTY_VIEW_MESSAGE, Style::new().dimmed()));
    }
    for request in requests {
        writeln!(
            out,
            "{} #{} {}",
            status_tag(color, role, request.status),
            request.id,
            color.paint(&request.issue, Style::new().bold())
        )?;
        writeln!(out, "    {} - {}", request.driver_name, request.vehicle)?;
        writeln!(
            out,
            "    {} ({} miles away) {}",
            request.location,
            request.distance,
            color.paint(&request.timestamp, Style::new().dimmed())
        )?;
        let actions = available_actions(role, request.status);
        if !actions.is_empty() {
            writeln!(out, "    actions: {}", actions.join(", "))?;
        }
    }
    Ok(())
}

pub fn stats(out: &mut impl Write, color: ColorMode, volunteer: &Volunteer) -> io::Result<()> {
    writeln!(
        out,
        "{} has {} points",
        color.paint(&volunteer.name, Style::new().bold()),
        color.paint(volunteer.points, Style::new().yellow())
    )?;
    if volunteer.badges.is_empty() {
        return writeln!(out, "    Complete jobs to earn badges!");
    }
    for badge in &volunteer.badges {
        if badge.description.is_empty() {
            writeln!(out, "    * {}", badge.name)?;
        } else {
            writeln!(out, "    * {}: {}", badge.name, badge.description)?;
        }
    }
    Ok(())
}

pub fn notification(
    out: &mut impl Write,
    color: ColorMode,
    notification: &Notification,
) -> io::Result<()> {
    writeln!(out, "{}", color.paint(&notification.title, Style::new().green()))?;
    writeln!(out, "    {}", notification.description)
}

pub fn event(out: &mut impl Write, record: &EventRecord) -> io::Result<()> {
    write!(
        out,
        "{:>4} {:<10} {}",
        record.seq,
        format!("{:?}", record.source),
        record.kind().unwrap_or("unknown")
    )?;
    match &record.correlation_id {
        Some(id) => writeln!(out, " ({id})"),
        None => writeln!(out),
    }
}

fn status_tag(color: ColorMode, role: Role, status: RequestStatus) -> String {
    let style = match status {
        RequestStatus::Pending => Style::new().yellow(),
        RequestStatus::Accepted => Style::new().blue(),
        RequestStatus::Confirmed => Style::new().cyan(),
        RequestStatus::Completed => Style::new().green(),
    };
    color.paint(format!("[{}]", status_label(role, status)), style)
}

fn available_actions(role: Role, status: RequestStatus) -> Vec<String> {
    let actions: &[Action] = match role {
        Role::Garage => &[Action::Accept, Action::Complete],
        Role::Volunteer => &[Action::Accept],
        Role::Driver => &[Action::Confirm],
    };
    actions
        .iter()
        .filter(|action| action_enabled(**action, status))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_core::types::{Badge, BadgeId, HelperType, RequestId, VolunteerId};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn request(status: RequestStatus) -> HelpRequest {
        HelpRequest {
            id: RequestId::new("req-104").unwrap(),
            driver_name: "Tom".to_string(),
            vehicle: "Outback".to_string(),
            issue: "Transmission".to_string(),
            location: "Hwy 101".to_string(),
            distance: 8.7,
            timestamp: "45 mins ago".to_string(),
            helper_type: HelperType::Garage,
            status,
        }
    }

    #[test]
    fn empty_view_prints_the_placeholder() {
        let text = render(|out| requests(out, ColorMode::Never, Role::Volunteer, &[]));
        assert!(text.contains(EMPTY_VIEW_MESSAGE));
    }

    #[test]
    fn garage_rows_use_role_labels_and_enabled_actions() {
        let text = render(|out| {
            requests(
                out,
                ColorMode::Never,
                Role::Garage,
                &[request(RequestStatus::Confirmed), request(RequestStatus::Pending)],
            )
        });
        assert!(text.contains("[Confirmed by Driver] #req-104"));
        assert!(text.contains("8.7 miles away"));
        assert!(text.contains("actions: complete"));
        assert!(text.contains("actions: accept\n"));

        let done = render(|out| {
            requests(out, ColorMode::Never, Role::Garage, &[request(RequestStatus::Completed)])
        });
        assert!(!done.contains("actions:"));
    }

    #[test]
    fn stats_list_badges_or_hint() {
        let mut volunteer = Volunteer {
            id: VolunteerId::new("vol-1").unwrap(),
            name: "Jordan".to_string(),
            points: 40,
            badges: Vec::new(),
        };
        assert!(
            render(|out| stats(out, ColorMode::Never, &volunteer))
                .contains("Complete jobs to earn badges!")
        );

        volunteer.badges.push(Badge {
            id: BadgeId::new("night-owl").unwrap(),
            name: "Night Owl".to_string(),
            description: "After midnight".to_string(),
            earned_at: None,
        });
        let text = render(|out| stats(out, ColorMode::Never, &volunteer));
        assert!(text.contains("40 points"));
        assert!(text.contains("* Night Owl: After midnight"));
    }

    #[test]
    fn never_mode_writes_plain_text() {
        let text = render(|out| {
            heading(out, ColorMode::Never, "Garage Dashboard", Some(false))?;
            requests(out, ColorMode::Never, Role::Garage, &[request(RequestStatus::Pending)])?;
            notification(out, ColorMode::Never, &Notification::new("Job Accepted!", "ok"))
        });
        assert!(!text.contains('\u{1b}'));
        assert!(text.starts_with("== Garage Dashboard == closed\n[Pending] #req-104 Transmission\n"));
    }
}
