pub mod deadline;
pub mod frequency;
pub mod scheduler;
pub mod song;
pub mod tone;
pub mod voice;

pub use frequency::Frequency;
pub use song::{Catalog, Song};
pub use tone::ToneGenerator;
pub use voice::Voice;
