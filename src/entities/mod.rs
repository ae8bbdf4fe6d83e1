pub mod prelude;

pub mod admins;
pub mod clients;
pub mod contacts;
pub mod films;
pub mod settings;
pub mod subscribers;
pub mod team_members;
