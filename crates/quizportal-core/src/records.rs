//! Named record collections and their line layouts.
//!
//! Each entity occupies one line of its collection. Lines that do not decode
//! are skipped with a warning rather than failing the whole read.

use std::fmt;

use crate::error::StoreError;
use crate::model::{
    ChildRegistration, Credential, HelpRequest, QuizQuestion, Reply, ScoreRecord, StaffRole,
};
use crate::traits::RecordStore;

/// The portal's persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    AdminCredentials,
    TeacherCredentials,
    ParentCredentials,
    Quiz,
    Results,
    HelpRequests,
    Replies,
    Children,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::AdminCredentials,
        Collection::TeacherCredentials,
        Collection::ParentCredentials,
        Collection::Quiz,
        Collection::Results,
        Collection::HelpRequests,
        Collection::Replies,
        Collection::Children,
    ];

    /// File name used by file-backed stores.
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::AdminCredentials => "admin_creds.txt",
            Collection::TeacherCredentials => "teacher_creds.txt",
            Collection::ParentCredentials => "parent_creds.txt",
            Collection::Quiz => "quiz.txt",
            Collection::Results => "results.txt",
            Collection::HelpRequests => "help.txt",
            Collection::Replies => "replies.txt",
            Collection::Children => "children.txt",
        }
    }

    /// The credential collection for a staff role.
    pub fn credentials(role: StaffRole) -> Self {
        match role {
            StaffRole::Admin => Collection::AdminCredentials,
            StaffRole::Teacher => Collection::TeacherCredentials,
            StaffRole::Parent => Collection::ParentCredentials,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// An entity stored one-per-line in a fixed collection.
pub trait Record: Sized {
    const COLLECTION: Collection;

    fn encode(&self) -> String;

    fn decode(line: &str) -> Option<Self>;
}

impl Record for QuizQuestion {
    const COLLECTION: Collection = Collection::Quiz;

    /// `level|prompt|answer`
    fn encode(&self) -> String {
        format!("{}|{}|{}", self.level, self.prompt, self.expected_answer)
    }

    // The answer is everything after the second `|`, so it may itself contain `|`.
    fn decode(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, '|');
        let level = parts.next()?.trim().parse().ok()?;
        let prompt = parts.next()?;
        let answer = parts.next()?;
        Some(QuizQuestion::new(level, prompt, answer))
    }
}

impl Record for ScoreRecord {
    const COLLECTION: Collection = Collection::Results;

    /// `studentName level score`
    fn encode(&self) -> String {
        format!("{} {} {}", self.student_name, self.level, self.score)
    }

    fn decode(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let student_name = tokens.next()?.to_string();
        let level = tokens.next()?.parse().ok()?;
        let score = tokens.next()?.parse().ok()?;
        if tokens.next().is_some() {
            return None;
        }
        Some(ScoreRecord {
            student_name,
            level,
            score,
        })
    }
}

impl Record for HelpRequest {
    const COLLECTION: Collection = Collection::HelpRequests;

    /// `studentName: message`
    fn encode(&self) -> String {
        format!("{}: {}", self.student_name, self.message)
    }

    fn decode(line: &str) -> Option<Self> {
        let (student_name, message) = line.split_once(": ")?;
        Some(HelpRequest {
            student_name: student_name.to_string(),
            message: message.to_string(),
        })
    }
}

impl Record for Reply {
    const COLLECTION: Collection = Collection::Replies;

    /// `To targetStudent: message`
    fn encode(&self) -> String {
        format!("To {}: {}", self.target_student, self.message)
    }

    fn decode(line: &str) -> Option<Self> {
        let (target, message) = line.strip_prefix("To ")?.split_once(": ")?;
        Some(Reply {
            target_student: target.to_string(),
            message: message.to_string(),
        })
    }
}

impl Record for ChildRegistration {
    const COLLECTION: Collection = Collection::Children;

    fn encode(&self) -> String {
        self.child_name.clone()
    }

    fn decode(line: &str) -> Option<Self> {
        let name = line.trim();
        if name.is_empty() {
            return None;
        }
        Some(ChildRegistration {
            child_name: name.to_string(),
        })
    }
}

impl Credential {
    /// `username password`
    pub fn encode(&self) -> String {
        format!("{} {}", self.username, self.password)
    }

    /// Reads the first two whitespace-separated tokens of a credential line.
    pub fn decode(role: StaffRole, line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let username = tokens.next()?.to_string();
        let password = tokens.next()?.to_string();
        Some(Credential {
            role,
            username,
            password,
        })
    }
}

/// Decode a batch of raw lines, skipping blanks and reporting malformed lines.
pub fn decode_lines<T: Record>(lines: Vec<String>) -> impl Iterator<Item = T> {
    let collection = T::COLLECTION;
    lines.into_iter().filter_map(move |line| {
        if line.trim().is_empty() {
            return None;
        }
        let decoded = T::decode(&line);
        if decoded.is_none() {
            tracing::warn!(%collection, line = %line, "skipping malformed record");
        }
        decoded
    })
}

/// Load every record of type `T` in storage order.
pub fn load_all<T: Record>(store: &dyn RecordStore) -> Result<Vec<T>, StoreError> {
    if !store.exists(T::COLLECTION)? {
        return Ok(Vec::new());
    }
    Ok(decode_lines(store.read_all(T::COLLECTION)?).collect())
}

/// Append a single record of type `T`.
pub fn append<T: Record>(store: &dyn RecordStore, record: &T) -> Result<(), StoreError> {
    store.append_record(T::COLLECTION, &record.encode())
}
