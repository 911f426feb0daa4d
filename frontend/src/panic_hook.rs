use std::panic;

/// Panic hook that records the panic through the `log` facade before handing
/// it to `console_error_panic_hook`, which prints the JS stack trace to
/// `console.error` on wasm and to `stderr` elsewhere.
pub fn hook(info: &panic::PanicHookInfo) {
    log::error!("panic: {}", info);
    console_error_panic_hook::hook(info);
}
