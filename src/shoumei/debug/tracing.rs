use std::time::Instant;

/// Runs `body` and logs how long it took at `trace` level.
pub fn timed<T>(tag: &str, body: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = body();
    log::trace!("run of {} {:?}", tag, start.elapsed());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_passes_result_through() {
        assert_eq!(timed("sum", || 2 + 2), 4);
    }
}
