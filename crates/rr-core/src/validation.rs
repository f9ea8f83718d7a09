use crate::error::{RequestError, VolunteerError};
use crate::types::{CreateHelpRequestInput, CreateVolunteerInput, RequestStatus};
use std::collections::HashSet;

/// Forward-only lifecycle. Same-status moves are rejected so a second accept
/// on one request fails instead of silently succeeding.
pub fn validate_request_status_transition(
    from: RequestStatus,
    to: RequestStatus,
) -> Result<(), RequestError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(RequestError::InvalidTransition { from, to })
    }
}

pub fn can_transition(from: RequestStatus, to: RequestStatus) -> bool {
    use RequestStatus::{Accepted, Completed, Confirmed, Pending};

    matches!(
        (from, to),
        (Pending, Accepted) | (Accepted, Confirmed) | (Accepted, Completed) | (Confirmed, Completed)
    )
}

/// Statuses reachable in one step from `from`.
pub fn next_statuses(from: RequestStatus) -> Vec<RequestStatus> {
    RequestStatus::ALL
        .into_iter()
        .filter(|to| can_transition(from, *to))
        .collect()
}

pub fn validate_create_request(input: &CreateHelpRequestInput) -> Result<(), RequestError> {
    for (field, value) in [
        ("driver_name", &input.driver_name),
        ("vehicle", &input.vehicle),
        ("issue", &input.issue),
        ("location", &input.location),
    ] {
        if value.trim().is_empty() {
            return Err(RequestError::InvalidInput {
                message: format!("{field} must not be empty"),
            });
        }
    }
    if !input.distance.is_finite() || input.distance < 0.0 {
        return Err(RequestError::InvalidInput {
            message: format!("distance must be a non-negative number, got {}", input.distance),
        });
    }
    Ok(())
}

pub fn validate_create_volunteer(input: &CreateVolunteerInput) -> Result<(), VolunteerError> {
    if input.name.trim().is_empty() {
        return Err(VolunteerError::InvalidInput {
            message: "name must not be empty".to_string(),
        });
    }
    let mut seen = HashSet::new();
    for badge in &input.badges {
        if !seen.insert(&badge.id) {
            return Err(VolunteerError::DuplicateBadge {
                badge_id: badge.id.clone(),
            });
        }
        if badge.name.trim().is_empty() {
            return Err(VolunteerError::InvalidInput {
                message: format!("badge {} needs a name", badge.id),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AwardBadgeInput, BadgeId, HelperType};
    use RequestStatus::{Accepted, Completed, Confirmed, Pending};

    #[test]
    fn forward_edges_are_allowed() {
        for (from, to) in [
            (Pending, Accepted),
            (Accepted, Confirmed),
            (Accepted, Completed),
            (Confirmed, Completed),
        ] {
            assert_eq!(validate_request_status_transition(from, to), Ok(()));
        }
    }

    #[test]
    fn skips_reversals_and_repeats_are_rejected() {
        for from in RequestStatus::ALL {
            for to in RequestStatus::ALL {
                let expected = matches!(
                    (from, to),
                    (Pending, Accepted)
                        | (Accepted, Confirmed)
                        | (Accepted, Completed)
                        | (Confirmed, Completed)
                );
                assert_eq!(can_transition(from, to), expected, "{from} -> {to}");
            }
        }
        assert_eq!(
            validate_request_status_transition(Pending, Completed),
            Err(RequestError::InvalidTransition {
                from: Pending,
                to: Completed
            })
        );
        assert!(validate_request_status_transition(Accepted, Accepted).is_err());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(next_statuses(Completed).is_empty());
        assert_eq!(next_statuses(Accepted), vec![Confirmed, Completed]);
    }

    fn request_input() -> CreateHelpRequestInput {
        CreateHelpRequestInput {
            id: None,
            driver_name: "Ana".to_string(),
            vehicle: "Civic".to_string(),
            issue: "Flat tire".to_string(),
            location: "I-80 exit 12".to_string(),
            distance: 2.5,
            timestamp: "just now".to_string(),
            helper_type: HelperType::Volunteer,
            status: None,
        }
    }

    #[test]
    fn request_input_checks_text_and_distance() {
        assert!(validate_create_request(&request_input()).is_ok());

        let blank = CreateHelpRequestInput {
            issue: "  ".to_string(),
            ..request_input()
        };
        assert!(matches!(
            validate_create_request(&blank),
            Err(RequestError::InvalidInput { message }) if message.contains("issue")
        ));

        for distance in [-1.0, f64::NAN, f64::INFINITY] {
            let input = CreateHelpRequestInput {
                distance,
                ..request_input()
            };
            assert!(validate_create_request(&input).is_err());
        }
    }

    #[test]
    fn volunteer_input_rejects_duplicate_badges() {
        let badge = AwardBadgeInput {
            id: BadgeId::new("first-aid").unwrap(),
            name: "First Aid".to_string(),
            description: String::new(),
        };
        let input = CreateVolunteerInput {
            id: None,
            name: "Sam".to_string(),
            points: 0,
            badges: vec![badge.clone(), badge],
        };
        assert!(matches!(
            validate_create_volunteer(&input),
            Err(VolunteerError::DuplicateBadge { .. })
        ));
    }
}
