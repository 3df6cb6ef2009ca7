// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo identities selectable with `--role`.

use zedny_core::types::{Department, User, UserRole};

/// The demo user for a role.
pub fn demo_user(role: UserRole) -> User {
    match role {
        UserRole::Client => User {
            id: "u1".into(),
            name: "Sarah Miller".into(),
            role,
            department: None,
        },
        UserRole::Employee => User {
            id: "e1".into(),
            name: "Alex Chen".into(),
            role,
            department: Some(Department::Ai),
        },
        UserRole::Admin => User {
            id: "a1".into(),
            name: "Jordan Boss".into(),
            role,
            department: None,
        },
    }
}

/// Two-line dashboard greeting for `user`.
pub fn welcome_lines(user: &User) -> (String, String) {
    let scope = user
        .department
        .map(|d| d.to_string().to_uppercase())
        .unwrap_or_else(|| "Company".to_string());
    (
        format!("Welcome back, {}", user.first_name()),
        format!("Here is what's happening in the {scope} today."),
    )
}
