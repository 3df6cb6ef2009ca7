// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Zedny client portal.
//!
//! This crate provides the domain types, error taxonomy, and adapter traits
//! shared by the chat surface, the staff dashboard, and the backend client.
//! It performs no I/O.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ZednyError;
pub use types::{
    ClassificationResponse, ConversationTurn, Department, EscalationCard, EscalationReport,
    HealthStatus, IssueRecord, Priority, Sender, SessionId, Ticket, TicketOrigin, TicketStatus,
    TurnId, User, UserRole,
};

pub use traits::{ClassifierAdapter, PluginAdapter, TicketFeedAdapter};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CONNECTIVITY_FAILURE_TEXT, CreatedAt, TurnBadge};

    #[test]
    fn zedny_error_has_all_variants() {
        let _config = ZednyError::Config("test".into());
        let transport = ZednyError::transport("test", std::io::Error::other("refused"));
        let protocol = ZednyError::Protocol {
            message: "test".into(),
            status: Some(500),
        };
        let malformed = ZednyError::malformed("bad json");
        let validation = ZednyError::Validation {
            field: "department".into(),
            value: "finance".into(),
        };
        let internal = ZednyError::Internal("test".into());

        assert!(transport.is_remote());
        assert!(protocol.is_remote());
        assert!(malformed.is_remote());
        assert!(!validation.is_remote());
        assert!(!internal.is_remote());
    }

    #[test]
    fn validation_error_names_field_and_value() {
        let err = Department::parse_backend("finance").unwrap_err();
        assert_eq!(err.to_string(), "invalid department value `finance`");
    }

    #[test]
    fn department_parses_case_insensitively() {
        assert_eq!(Department::parse_backend("AI").unwrap(), Department::Ai);
        assert_eq!(Department::parse_backend(" web ").unwrap(), Department::Web);
        assert_eq!(Department::Content.to_string(), "content");
    }

    #[test]
    #[tracing_test::traced_test]
    fn unknown_department_coerces_to_fallback_and_logs() {
        assert_eq!(Department::coerce("finance"), Department::FALLBACK);
        assert!(logs_contain("coercing department"));
    }

    #[test]
    fn priority_aliases_map_to_high() {
        assert_eq!(Priority::parse_backend("urgent").unwrap(), Priority::High);
        assert_eq!(Priority::parse_backend("Critical").unwrap(), Priority::High);
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!(Priority::coerce("whenever"), Priority::Medium);
    }

    #[test]
    fn status_accepts_backend_vocabulary() {
        assert_eq!(TicketStatus::parse_backend("open").unwrap(), TicketStatus::New);
        assert_eq!(
            TicketStatus::parse_backend("in_progress").unwrap(),
            TicketStatus::InProgress
        );
        assert_eq!(
            TicketStatus::parse_backend("resolved").unwrap(),
            TicketStatus::Completed
        );
        assert_eq!(TicketStatus::InProgress.to_string(), "in-progress");
        assert_eq!(TicketStatus::coerce("archived"), TicketStatus::New);
    }

    #[test]
    fn ticket_serialization_skips_origin() {
        let ticket = Ticket {
            id: "7".into(),
            origin: TicketOrigin::Live,
            summary: "Site down".into(),
            department: Department::Web,
            priority: Priority::High,
            status: TicketStatus::InProgress,
            created_at: CreatedAt::Label("2 mins ago".into()),
            assignee: None,
            client: None,
            tags: vec![],
        };
        let json = serde_json::to_value(&ticket).unwrap();
        assert!(json.get("origin").is_none());
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["department"], "web");
        assert_eq!(json["createdAt"], "2 mins ago");
    }

    #[test]
    fn turn_ids_are_unique() {
        let a = ConversationTurn::user("hi");
        let b = ConversationTurn::user("hi");
        assert_ne!(a.id, b.id);
        assert_eq!(a.sender, Sender::User);
        assert!(a.structured_data.is_none());
    }

    #[test]
    fn badges_follow_turn_shape() {
        let card = EscalationCard {
            title: "t".into(),
            insights: vec![],
            steps: vec![],
        };
        assert_eq!(ConversationTurn::user("hi").badge(), None);
        assert_eq!(
            ConversationTurn::assistant("sure").badge(),
            Some(TurnBadge::AutoReply)
        );
        assert_eq!(
            ConversationTurn::escalation("routing", card).badge(),
            Some(TurnBadge::Escalated)
        );
        assert_eq!(ConversationTurn::connectivity_failure().badge(), None);
    }

    #[test]
    fn reply_matching_apology_text_keeps_its_badge() {
        let turn = ConversationTurn::assistant(CONNECTIVITY_FAILURE_TEXT);
        assert!(!turn.failed);
        assert_eq!(turn.badge(), Some(TurnBadge::AutoReply));

        let failure = ConversationTurn::connectivity_failure();
        assert!(failure.failed);
        assert_eq!(failure.text, CONNECTIVITY_FAILURE_TEXT);
    }

    #[test]
    fn failed_flag_is_omitted_from_ordinary_turns() {
        let json = serde_json::to_value(ConversationTurn::assistant("ok")).unwrap();
        assert!(json.get("failed").is_none());
        let json = serde_json::to_value(ConversationTurn::connectivity_failure()).unwrap();
        assert_eq!(json["failed"], true);
    }

    #[test]
    fn classification_text_on_both_branches() {
        let reply = ClassificationResponse::Reply { text: "hi".into() };
        let escalate = ClassificationResponse::Escalate {
            text: "routing".into(),
            report: EscalationReport {
                department: Department::Ai,
                priority: Priority::High,
                summary: "outage".into(),
                extracted_info: None,
            },
        };
        assert_eq!(reply.text(), "hi");
        assert_eq!(escalate.text(), "routing");
    }

    #[test]
    fn user_first_name() {
        let user = User {
            id: "e1".into(),
            name: "Alex Chen".into(),
            role: UserRole::Employee,
            department: Some(Department::Ai),
        };
        assert_eq!(user.first_name(), "Alex");
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_classifier_adapter<T: ClassifierAdapter>() {}
        fn _assert_ticket_feed_adapter<T: TicketFeedAdapter>() {}
    }

    proptest::proptest! {
        #[test]
        fn coercion_always_lands_in_enum(raw in ".{0,16}") {
            let dept = Department::coerce(&raw);
            proptest::prop_assert!(matches!(dept, Department::Web | Department::Ai | Department::Content));
            let status = TicketStatus::coerce(&raw);
            proptest::prop_assert!(matches!(status, TicketStatus::New | TicketStatus::InProgress | TicketStatus::Completed));
        }
    }
}
