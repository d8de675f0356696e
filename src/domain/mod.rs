pub mod campus;
pub mod query;
pub mod reading;

pub use campus::{lookup, Campus};
pub use query::RoomQuery;
pub use reading::Reading;
