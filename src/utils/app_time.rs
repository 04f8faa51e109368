// Monotonic clock that also works in the browser (std::time::Instant panics on wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub type AppInstant = std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub type AppInstant = web_time::Instant;

pub fn now() -> AppInstant {
    AppInstant::now()
}

/// Milliseconds since `start`, for timing log lines.
pub fn elapsed_ms(start: AppInstant) -> u128 {
    start.elapsed().as_millis()
}
