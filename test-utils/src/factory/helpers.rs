//! Shared helper utilities for factory methods.

/// Counter for generating unique values in tests.
///
/// Ensures each factory-created entity gets distinct names and emails so unique
/// columns never collide within a test.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
