pub mod admin;
pub mod client;
pub mod contact;
pub mod film;
pub mod setting;
pub mod subscriber;
pub mod team;
