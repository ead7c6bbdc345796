pub mod attempt;
pub mod event;
pub mod frame;
pub mod layout;
pub mod record;
pub mod stats;

pub use attempt::{AttemptOutcome, GameAttempt, LossReason};
pub use event::{InputEvent, Key, StampedEvent};
pub use frame::{Button, Frame, Rgb, ScreenKind, TextLine, TextSize};
pub use layout::{Layout, PixelRect, Target};
pub use record::{
    PlayerDataset, PlayerRecord, RecordError, RejectedRecord, StoredDataset, StoredRecord,
    is_name_char,
};
pub use stats::{BUCKET_BOUNDS_MS, BUCKET_COUNT, HistogramBucket};
