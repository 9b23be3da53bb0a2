//! Core data model types for quizportal.
//!
//! Every entity here maps to exactly one line in its collection; see
//! `records` for the line layouts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quiz difficulty tier. The default bank uses levels 1 to 3, but manually
/// authored questions may carry any integer.
pub type Level = i32;

/// Levels offered on the child menu.
pub const PLAYABLE_LEVELS: [Level; 3] = [1, 2, 3];

/// Scores are reported out of this many stars.
pub const MAX_STARS: u32 = 3;

/// The four portal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Child,
}

impl Role {
    /// The credentialed counterpart of this role, if it has one.
    ///
    /// Children authenticate by roster membership and have no credential.
    pub fn staff(self) -> Option<StaffRole> {
        match self {
            Role::Admin => Some(StaffRole::Admin),
            Role::Teacher => Some(StaffRole::Teacher),
            Role::Parent => Some(StaffRole::Parent),
            Role::Child => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Teacher => write!(f, "Teacher"),
            Role::Parent => write!(f, "Parent"),
            Role::Child => write!(f, "Child"),
        }
    }
}

/// Roles that hold a username/password credential. One account per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Teacher,
    Parent,
}

impl From<StaffRole> for Role {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Admin => Role::Admin,
            StaffRole::Teacher => Role::Teacher,
            StaffRole::Parent => Role::Parent,
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Role::from(*self).fmt(f)
    }
}

/// The singleton login for a staff role.
///
/// Note: Custom Debug impl masks the password to prevent accidental exposure in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub role: StaffRole,
    pub username: String,
    pub password: String,
}

impl Credential {
    /// Whether the given pair matches exactly (case-sensitive).
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("role", &self.role)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A graded question in the quiz bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub level: Level,
    pub prompt: String,
    pub expected_answer: String,
}

impl QuizQuestion {
    pub fn new(level: Level, prompt: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self {
            level,
            prompt: prompt.into(),
            expected_answer: expected_answer.into(),
        }
    }

    /// Answers are compared exactly: no trimming, no case folding.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.expected_answer == answer
    }
}

/// One quiz attempt. Attempts accumulate; none supersedes another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub student_name: String,
    pub level: Level,
    pub score: u32,
}

/// A child's free-text request for help.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpRequest {
    pub student_name: String,
    pub message: String,
}

/// A teacher's message, addressed to a student by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub target_student: String,
    pub message: String,
}

/// A roster entry. Duplicate names are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRegistration {
    pub child_name: String,
}

/// Render a score as a row of stars, e.g. `* *` for 2.
pub fn star_rating(points: u32) -> String {
    vec!["*"; points as usize].join(" ")
}
