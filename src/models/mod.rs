mod de;
mod row;
mod user;
mod task;
mod billing;
mod entity;
mod forms;
mod session;

pub use row::{CellValue, Column, Row};
pub use user::User;
pub use task::Task;
pub use billing::Billing;
pub use entity::{Entity, EntityKind, OwnerLookup, SingleShape};
pub use forms::{LoginForm, RegisterForm, Registration};
pub use session::{
    clear_session, store_session, Role, Session, SessionUser,
};
