pub mod ical;
pub mod tzif;
