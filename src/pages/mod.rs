//! Page objects for the playwright.dev documentation site.
//!
//! Each page object owns a [`crate::Page`] and exposes the interactions a
//! spec needs by name; selectors stay private to the page object.

mod getting_started;
mod home;

pub use getting_started::GettingStartedPage;
pub use home::HomePage;
