pub use super::admins::Entity as Admins;
pub use super::clients::Entity as Clients;
pub use super::contacts::Entity as Contacts;
pub use super::films::Entity as Films;
pub use super::settings::Entity as Settings;
pub use super::subscribers::Entity as Subscribers;
pub use super::team_members::Entity as TeamMembers;
