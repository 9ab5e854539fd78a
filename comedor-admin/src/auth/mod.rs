//! Session and permission checks
//!
//! Authentication is delegated to the hosted identity provider. It hands
//! back a user id plus custom [`Claims`]; everything here works from those.

mod session;

pub use session::{Claims, CurrentUser};
