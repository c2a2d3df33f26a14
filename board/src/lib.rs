//! Campus event board - events, institutional users and registrations
//!
//! An in-memory board where administrators publish events and attendees
//! register with an institutional address. Everything lives for one page
//! session; there is no persistence and no authentication.
//!
//! # Architecture
//!
//! ```text
//!  page ──Interaction──▶ BoardAction ──▶ Store<BoardReducer>
//!                                           │   reduce: validate → event → apply
//!                                           │   effects: delayed DismissAlert
//!                                           ▼
//!                                      BoardState ──observer──▶ PageView ──▶ Renderer
//! ```
//!
//! - **Repository**: events, users and registrations in insertion order
//! - **Domain rules**: institutional email, seats left, full, passed
//! - **Filter engine**: category plus a day-bounded date window
//! - **Reducer**: create/edit/register workflows and the modal state machine
//! - **Views and rendering**: view-models recomputed against the clock on
//!   every render, turned into escaped HTML
//!
//! # Example
//!
//! ```ignore
//! let env = BoardEnvironment::new(Arc::new(SystemClock), BoardConfig::from_env());
//! let app = BoardApp::new(Repository::new(), env).await;
//! app.dispatch(Interaction::SubmitUserForm(UserForm {
//!     name: "Ada".into(),
//!     email: "ada@univ.edu".into(),
//! }))
//! .await?;
//! ```

pub mod alerts;
pub mod app;
pub mod calendar;
pub mod config;
pub mod email;
pub mod error;
pub mod filter;
pub mod forms;
pub mod interaction;
pub mod reducer;
pub mod render;
pub mod repository;
pub mod session;
pub mod types;
pub mod view;

pub use alerts::{Alert, AlertCenter, AlertId, AlertKind};
pub use app::{BoardApp, Screen};
pub use config::BoardConfig;
pub use error::{BoardError, BoardResult};
pub use filter::{EventFilter, FilterForm};
pub use forms::{EventForm, RegistrationForm, UserForm};
pub use interaction::Interaction;
pub use reducer::{BoardAction, BoardEnvironment, BoardReducer, BoardState};
pub use render::{HtmlRenderer, RenderedPage, Renderer};
pub use repository::{Availability, Repository};
pub use session::{FormKind, Modal, UiSession};
pub use types::{Category, Event, EventFields, EventId, Registration, RegistrationId, User, UserId};
pub use view::{DisplayContext, PageView};
