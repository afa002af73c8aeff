pub mod hash;
mod verify_session;

pub use verify_session::{verify_session, Error};
