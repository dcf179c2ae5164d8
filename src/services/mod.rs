//=========================================================================
// Services
//
// Concrete collaborators plugged into the game:
//
//   RonStore / MemoryStore   Persistence (high score)
//   ChannelReporter          ScoreReporter on a worker thread
//   LogDisplay               Display that writes to the log
//   HeadlessTrack            Stage without a physics engine
//
//=========================================================================

mod log_display;
mod reporter;
mod store;
mod track;

pub use log_display::LogDisplay;
pub use reporter::{ChannelReporter, ScoreReport};
pub use store::{MemoryStore, RonStore, StoreError};
pub use track::{HeadlessTrack, TrackLayout};
