//! The portal's role state machine.
//!
//! ```text
//! RoleSelect ──► AwaitingSetup ──► RoleSelect
//!     │
//!     ├────────► AwaitingLogin ──► Active ──(logout)──► RoleSelect
//!     │                 └──(rejected)──► RoleSelect
//!     └──(exit)─► Exited
//! ```
//!
//! One `SessionController` drives one console; only one session is ever
//! active because the state lives in a single field. Running out of input
//! at any prompt moves straight to `Exited`.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::board::MessageBoard;
use crate::error::PortalError;
use crate::ledger::ProgressLedger;
use crate::model::{star_rating, Level, Role, ScoreRecord, StaffRole, MAX_STARS, PLAYABLE_LEVELS};
use crate::quiz::QuizBank;
use crate::records::Record;
use crate::roster::Roster;
use crate::traits::{Console, RecordStore};

const ROLE_MENU: &str = "\n==== MAIN PORTAL ====\n1. Admin\n2. Teacher\n3. Parent\n4. Child\n5. Exit";
const ADMIN_MENU: &str = "\n[ADMIN PORTAL]\n1. Auto-Add Default Quiz Questions\n2. Manually Add Questions\n3. View Class Average Score\n4. Logout";
const TEACHER_MENU: &str = "\n[TEACHER PORTAL]\n1. View Help\n2. Reply\n3. Logout";
const PARENT_MENU: &str = "\n[PARENT MENU]\n1. Register Child\n2. View Results\n3. Logout";
const CHILD_MENU: &str = "\n[CHILD ZONE]\n1. Level 1\n2. Level 2\n3. Level 3\n4. Help Request\n5. Logout";

pub const LOCKED_MESSAGE: &str = "LOCKED!";
pub const NOT_REGISTERED_MESSAGE: &str = "Not registered!";
const NO_RECORDS: &str = "No records found.";

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// An authenticated session. The variant fixes which action table applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin { username: String },
    Teacher { username: String },
    Parent { username: String },
    Child { name: String },
}

impl Session {
    fn for_staff(role: StaffRole, username: String) -> Self {
        match role {
            StaffRole::Admin => Session::Admin { username },
            StaffRole::Teacher => Session::Teacher { username },
            StaffRole::Parent => Session::Parent { username },
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Admin { .. } => Role::Admin,
            Session::Teacher { .. } => Role::Teacher,
            Session::Parent { .. } => Role::Parent,
            Session::Child { .. } => Role::Child,
        }
    }

    /// The name the session was opened under.
    pub fn name(&self) -> &str {
        match self {
            Session::Admin { username }
            | Session::Teacher { username }
            | Session::Parent { username } => username,
            Session::Child { name } => name,
        }
    }

    fn menu(&self) -> &'static str {
        match self {
            Session::Admin { .. } => ADMIN_MENU,
            Session::Teacher { .. } => TEACHER_MENU,
            Session::Parent { .. } => PARENT_MENU,
            Session::Child { .. } => CHILD_MENU,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalState {
    RoleSelect,
    AwaitingSetup(StaffRole),
    AwaitingLogin(Role),
    Active(Session),
    Exited,
}

// ---------------------------------------------------------------------------
// Action tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChoice {
    Role(Role),
    Exit,
}

impl RoleChoice {
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(RoleChoice::Role(Role::Admin)),
            2 => Some(RoleChoice::Role(Role::Teacher)),
            3 => Some(RoleChoice::Role(Role::Parent)),
            4 => Some(RoleChoice::Role(Role::Child)),
            5 => Some(RoleChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    AutoAddQuiz,
    ManualAddQuiz,
    ViewClassAverage,
    Logout,
}

impl AdminAction {
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(AdminAction::AutoAddQuiz),
            2 => Some(AdminAction::ManualAddQuiz),
            3 => Some(AdminAction::ViewClassAverage),
            4 => Some(AdminAction::Logout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherAction {
    ViewHelpRequests,
    ReplyToStudent,
    Logout,
}

impl TeacherAction {
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(TeacherAction::ViewHelpRequests),
            2 => Some(TeacherAction::ReplyToStudent),
            3 => Some(TeacherAction::Logout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentAction {
    RegisterChild,
    ViewResults,
    Logout,
}

impl ParentAction {
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(ParentAction::RegisterChild),
            2 => Some(ParentAction::ViewResults),
            3 => Some(ParentAction::Logout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildAction {
    TakeLevel(Level),
    RequestHelp,
    Logout,
}

impl ChildAction {
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1..=3 => Some(ChildAction::TakeLevel(PLAYABLE_LEVELS[choice as usize - 1])),
            4 => Some(ChildAction::RequestHelp),
            5 => Some(ChildAction::Logout),
            _ => None,
        }
    }
}

/// What the active session does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Stay,
    Logout,
    Closed,
}

/// Result of the take-a-level sub-protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The level is gated; nothing was recorded.
    Locked,
    /// Every question was asked and the score was appended.
    Completed(ScoreRecord),
    /// Input ran out mid-quiz; nothing was recorded.
    Abandoned,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct SessionController {
    auth: AuthService,
    quiz: QuizBank,
    ledger: ProgressLedger,
    roster: Roster,
    board: MessageBoard,
    state: PortalState,
}

impl SessionController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&store)),
            quiz: QuizBank::new(Arc::clone(&store)),
            ledger: ProgressLedger::new(Arc::clone(&store)),
            roster: Roster::new(Arc::clone(&store)),
            board: MessageBoard::new(store),
            state: PortalState::RoleSelect,
        }
    }

    pub fn with_pass_threshold(mut self, threshold: u32) -> Self {
        self.ledger = self.ledger.with_pass_threshold(threshold);
        self
    }

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn quiz(&self) -> &QuizBank {
        &self.quiz
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn board(&self) -> &MessageBoard {
        &self.board
    }

    /// Drive the state machine until `Exited`.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<(), PortalError> {
        while self.state != PortalState::Exited {
            self.step(console)?;
        }
        Ok(())
    }

    /// Perform one transition. On error the state is left unchanged.
    pub fn step(&mut self, console: &mut dyn Console) -> Result<(), PortalError> {
        let next = match &self.state {
            PortalState::RoleSelect => self.select_role(console)?,
            PortalState::AwaitingSetup(role) => self.run_setup(*role, console)?,
            PortalState::AwaitingLogin(role) => self.run_login(*role, console)?,
            PortalState::Active(session) => self.run_session_turn(session, console)?,
            PortalState::Exited => PortalState::Exited,
        };
        tracing::trace!(?next, "state transition");
        self.state = next;
        Ok(())
    }

    fn select_role(&self, console: &mut dyn Console) -> Result<PortalState, PortalError> {
        console.show(ROLE_MENU)?;
        let Some(token) = console.read_token("Role: ")? else {
            return Ok(PortalState::Exited);
        };
        let next = match parse_choice(&token).and_then(RoleChoice::from_choice) {
            Some(RoleChoice::Exit) => {
                console.show("Goodbye!")?;
                PortalState::Exited
            }
            Some(RoleChoice::Role(role)) => match role.staff() {
                Some(staff) if self.auth.needs_setup(staff)? => PortalState::AwaitingSetup(staff),
                _ => PortalState::AwaitingLogin(role),
            },
            None => PortalState::RoleSelect,
        };
        Ok(next)
    }

    fn run_setup(
        &self,
        role: StaffRole,
        console: &mut dyn Console,
    ) -> Result<PortalState, PortalError> {
        console.show(&format!("==== {role} INITIAL SETUP ===="))?;
        let Some(username) = console.read_token(&format!("Set {role} Username: "))? else {
            return Ok(PortalState::Exited);
        };
        let Some(password) = console.read_token(&format!("Set {role} Password: "))? else {
            return Ok(PortalState::Exited);
        };
        self.auth.setup(role, &username, &password)?;
        console.show(&format!("{role} setup complete! Please login now."))?;
        Ok(PortalState::RoleSelect)
    }

    fn run_login(&self, role: Role, console: &mut dyn Console) -> Result<PortalState, PortalError> {
        let Some(username) = console.read_token("Username: ")? else {
            return Ok(PortalState::Exited);
        };

        let session = match role.staff() {
            Some(staff) => {
                let Some(password) = console.read_token("Pass: ")? else {
                    return Ok(PortalState::Exited);
                };
                if !self.auth.login(staff, &username, &password)? {
                    // Rejections are silent; the caller is back at the role menu.
                    return Ok(PortalState::RoleSelect);
                }
                Session::for_staff(staff, username)
            }
            None => {
                if !self.roster.is_registered(&username)? {
                    console.show(NOT_REGISTERED_MESSAGE)?;
                    return Ok(PortalState::RoleSelect);
                }
                Session::Child { name: username }
            }
        };

        console.show(&format!("\nWelcome to the Portal, {}!", session.name()))?;
        tracing::info!(role = %session.role(), name = session.name(), "session opened");
        Ok(PortalState::Active(session))
    }

    fn run_session_turn(
        &self,
        session: &Session,
        console: &mut dyn Console,
    ) -> Result<PortalState, PortalError> {
        console.show(session.menu())?;
        let flow = match console.read_token("Choice: ")? {
            None => Flow::Closed,
            Some(token) => match parse_choice(&token) {
                Some(choice) => self.handle_action(session, choice, console)?,
                None => Flow::Stay,
            },
        };

        Ok(match flow {
            Flow::Stay => PortalState::Active(session.clone()),
            Flow::Logout => {
                console.show(&format!("Goodbye, {}! Session closed.", session.name()))?;
                tracing::info!(role = %session.role(), name = session.name(), "session closed");
                PortalState::RoleSelect
            }
            Flow::Closed => PortalState::Exited,
        })
    }

    /// Dispatch one menu choice for `session`. Unknown choices do nothing.
    fn handle_action(
        &self,
        session: &Session,
        choice: u32,
        console: &mut dyn Console,
    ) -> Result<Flow, PortalError> {
        match session {
            Session::Admin { .. } => match AdminAction::from_choice(choice) {
                Some(action) => self.admin_action(action, console),
                None => Ok(Flow::Stay),
            },
            Session::Teacher { .. } => match TeacherAction::from_choice(choice) {
                Some(action) => self.teacher_action(action, console),
                None => Ok(Flow::Stay),
            },
            Session::Parent { .. } => match ParentAction::from_choice(choice) {
                Some(action) => self.parent_action(action, console),
                None => Ok(Flow::Stay),
            },
            Session::Child { name } => match ChildAction::from_choice(choice) {
                Some(action) => self.child_action(name, action, console),
                None => Ok(Flow::Stay),
            },
        }
    }

    fn admin_action(
        &self,
        action: AdminAction,
        console: &mut dyn Console,
    ) -> Result<Flow, PortalError> {
        match action {
            AdminAction::AutoAddQuiz => {
                self.quiz.reset_to_defaults()?;
                console.show("Default questions added automatically!")?;
            }
            AdminAction::ManualAddQuiz => return self.manual_add(console),
            AdminAction::ViewClassAverage => match self.ledger.class_average()? {
                Some(avg) => console.show(&format!("Class Average: {avg:.2}/{MAX_STARS}"))?,
                None => console.show("Class Average: no data")?,
            },
            AdminAction::Logout => return Ok(Flow::Logout),
        }
        Ok(Flow::Stay)
    }

    fn manual_add(&self, console: &mut dyn Console) -> Result<Flow, PortalError> {
        let Some(level) = console.read_token("Level (1, 2, or 3): ")? else {
            return Ok(Flow::Closed);
        };
        let Some(quantity) = console.read_token("Quantity: ")? else {
            return Ok(Flow::Closed);
        };
        // Any integer level is accepted; only a non-numeric entry aborts.
        let (Ok(level), Ok(quantity)) = (level.parse::<Level>(), quantity.parse::<u32>()) else {
            return Ok(Flow::Stay);
        };

        for i in 1..=quantity {
            let Some(prompt) = console.read_line(&format!("Question {i}: "))? else {
                return Ok(Flow::Closed);
            };
            let Some(answer) = console.read_line("Answer: ")? else {
                return Ok(Flow::Closed);
            };
            self.quiz.append(level, &prompt, &answer)?;
        }
        Ok(Flow::Stay)
    }

    fn teacher_action(
        &self,
        action: TeacherAction,
        console: &mut dyn Console,
    ) -> Result<Flow, PortalError> {
        match action {
            TeacherAction::ViewHelpRequests => {
                let requests = self.board.help_requests()?;
                show_listing(console, "REQUESTS", requests.iter().map(Record::encode))?;
            }
            TeacherAction::ReplyToStudent => {
                let Some(target) = console.read_token("To Student: ")? else {
                    return Ok(Flow::Closed);
                };
                let Some(message) = console.read_line("Msg: ")? else {
                    return Ok(Flow::Closed);
                };
                self.board.reply(&target, &message)?;
            }
            TeacherAction::Logout => return Ok(Flow::Logout),
        }
        Ok(Flow::Stay)
    }

    fn parent_action(
        &self,
        action: ParentAction,
        console: &mut dyn Console,
    ) -> Result<Flow, PortalError> {
        match action {
            ParentAction::RegisterChild => {
                let Some(name) = console.read_token("Enter Child Name: ")? else {
                    return Ok(Flow::Closed);
                };
                self.roster.register(&name)?;
            }
            ParentAction::ViewResults => {
                let results = self.ledger.results()?;
                show_listing(console, "SCORES", results.iter().map(Record::encode))?;
            }
            ParentAction::Logout => return Ok(Flow::Logout),
        }
        Ok(Flow::Stay)
    }

    fn child_action(
        &self,
        name: &str,
        action: ChildAction,
        console: &mut dyn Console,
    ) -> Result<Flow, PortalError> {
        match action {
            ChildAction::TakeLevel(level) => {
                if self.take_level(name, level, console)? == AttemptOutcome::Abandoned {
                    return Ok(Flow::Closed);
                }
            }
            ChildAction::RequestHelp => {
                let Some(message) = console.read_line("Question: ")? else {
                    return Ok(Flow::Closed);
                };
                self.board.request_help(name, &message)?;
            }
            ChildAction::Logout => return Ok(Flow::Logout),
        }
        Ok(Flow::Stay)
    }

    /// Run one quiz attempt for `student` at `level`.
    ///
    /// Levels above 1 are gated on a qualifying prior score. A completed
    /// attempt is always recorded, whatever the score.
    pub fn take_level(
        &self,
        student: &str,
        level: Level,
        console: &mut dyn Console,
    ) -> Result<AttemptOutcome, PortalError> {
        if !self.ledger.unlocked(student, level)? {
            tracing::info!(student, level, "attempt on locked level");
            console.show(&format!(
                "{LOCKED_MESSAGE} Pass previous level with {}+ stars.",
                self.ledger.pass_threshold()
            ))?;
            return Ok(AttemptOutcome::Locked);
        }

        let mut points = 0;
        for question in self.quiz.questions_for_level(level)? {
            let prompt = format!("\nQ: {}\nAns: ", question.prompt);
            let Some(answer) = console.read_token(&prompt)? else {
                return Ok(AttemptOutcome::Abandoned);
            };
            if question.is_correct(&answer) {
                console.show("Correct!")?;
                points += 1;
            } else {
                console.show("Wrong!")?;
            }
        }

        self.ledger.record_score(student, level, points)?;
        console.show(&format!(
            "\nScore: {points}/{MAX_STARS} Stars: {}",
            star_rating(points)
        ))?;

        Ok(AttemptOutcome::Completed(ScoreRecord {
            student_name: student.to_string(),
            level,
            score: points,
        }))
    }
}

/// Menu input is a non-negative integer; anything else is ignored.
fn parse_choice(token: &str) -> Option<u32> {
    token.parse().ok()
}

fn show_listing(
    console: &mut dyn Console,
    title: &str,
    lines: impl Iterator<Item = String>,
) -> Result<(), PortalError> {
    console.show(&format!("\n--- {title} ---"))?;
    let mut any = false;
    for line in lines {
        console.show(&line)?;
        any = true;
    }
    if !any {
        console.show(NO_RECORDS)?;
    }
    Ok(())
}
