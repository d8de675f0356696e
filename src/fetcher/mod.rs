pub mod error;
pub mod payload;
pub mod synjones;

use async_trait::async_trait;

use crate::domain::{Reading, RoomQuery};

pub use error::FetchError;
pub use synjones::{SynjonesFetcher, DEFAULT_QUERY_URL};

/// Something that can report the electricity balance of a room.
///
/// Failures are logged by the implementation and surface as `None`; they
/// never propagate past this boundary.
#[async_trait]
pub trait ElectricitySource: Send + Sync {
    async fn fetch(&self, query: &RoomQuery) -> Option<Reading>;
}
