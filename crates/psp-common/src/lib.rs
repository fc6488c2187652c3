pub mod errors;
pub mod events;
pub mod id;
pub mod settings;
pub mod types;

pub use errors::{ChannelError, ConfigError, PspError, StoreError};
pub use events::{AppEvent, EventBus};
pub use id::{new_id, SessionId};
pub use settings::{
    SettingEntry, SettingKind, SettingPatch, SettingSchema, SettingValue, SettingsSnapshot,
};
pub use types::{Rect, WindowId, WindowKind};

pub type Result<T> = std::result::Result<T, PspError>;
