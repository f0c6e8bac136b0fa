pub use super::assignments::Entity as Assignments;
pub use super::submissions::Entity as Submissions;
pub use super::users::Entity as Users;
