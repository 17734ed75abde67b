pub mod clipboard;
pub mod debounce;
pub mod grace;
pub mod logging;
pub mod platform;
pub mod session;
pub mod window_state;

pub use clipboard::{ClipboardAccess, SystemClipboard};
pub use debounce::TrailingDebounce;
pub use grace::GraceQueue;
pub use logging::init_logging;
pub use platform::{AppController, BreakNotifier, DisplayEnumerator, WindowEvent, WindowHandle};
pub use session::{Action, EditTarget, SessionChannels, WidgetSession, BREAK_MESSAGE};
pub use window_state::{StartupPhase, WindowStateService};
