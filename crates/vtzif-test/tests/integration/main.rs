//! Integration tests over the `.ics` fixtures.

mod errors;
mod helpers;
mod template;
mod tzif;
