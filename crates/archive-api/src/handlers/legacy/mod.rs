//! Cookie-session form flow under `/servlet`.
//!
//! Runs beside the token API and shares its services. Pages are plain
//! server-rendered HTML; state lives in [`session::SessionStore`].

pub mod forms;
pub mod pages;
pub mod session;

pub use forms::{
    dashboard, login_form, login_submit, logout_get, logout_post, register_form,
    register_submit,
};
