//! User management: the `User` model, database queries, account
//! registration, and the views and endpoints for administering users.

mod core;
mod delete_endpoint;
mod edit_page;
mod list_endpoint;
mod profile_endpoint;
mod register;
mod update_endpoint;
mod users_page;

pub use core::{User, UserID, create_user, create_user_table, get_user_by_email, get_user_by_id};
pub use delete_endpoint::delete_user_endpoint;
pub use edit_page::get_edit_user_page;
pub use list_endpoint::list_users_endpoint;
pub use profile_endpoint::get_user_profile_endpoint;
pub use register::{get_register_page, register_user};
pub use update_endpoint::update_user_endpoint;
pub use users_page::get_users_page;
