pub use jobify_models::auth::{AppStats, CurrentUserResponse, MessageResponse, UpdateUserRequest};
pub use jobify_models::users::{Role, User};

pub const USER_UPDATED_MESSAGE: &str = "update user";
