//! Share domain entities.

pub mod merged;
pub mod model;
pub mod mount;
pub mod permission;

pub use merged::SuperShare;
pub use model::{Share, ShareRecord, ShareState, ShareType};
pub use mount::SharedMount;
pub use permission::SharePermissions;
