pub mod factoid;
pub mod permission;

pub use factoid::Entity as Factoid;
pub use permission::Entity as Permission;
