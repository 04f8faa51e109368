//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so the
//! browser console stays quiet. Every check is further gated by
//! `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Emit how long each kline request took and how many rows came back.
    pub print_fetch_timing: bool,
    /// Emit a line whenever a finished fetch is dropped because a newer render started.
    pub print_stale_discards: bool,
    /// Emit resize listener registration / removal.
    pub print_resize_listeners: bool,
    /// Emit every bot control request and the state it produced.
    pub print_bot_transitions: bool,
    /// Emit UI interaction logs (symbol / interval changes, button clicks).
    pub print_ui_interactions: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch_timing: false,
    print_stale_discards: true,
    print_resize_listeners: false,
    print_bot_transitions: false,
    print_ui_interactions: true,
};
