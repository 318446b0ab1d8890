//! Amplitude table shared between the control path and the render path.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::MAX_NOTES;

/// Per-note amplitudes guarded by a single lock.
///
/// Cloning shares the same table. A render pass holds the lock for its
/// whole duration via [`AmplitudeTable::with_table`], so a concurrent
/// [`AmplitudeTable::replace`] is seen either entirely or not at all.
#[derive(Debug, Clone)]
pub struct AmplitudeTable {
    inner: Arc<Mutex<[f32; MAX_NOTES]>>,
}

impl AmplitudeTable {
    /// A silent table.
    pub fn new() -> Self {
        AmplitudeTable {
            inner: Arc::new(Mutex::new([0.0; MAX_NOTES])),
        }
    }

    /// Overwrite every note at once.
    pub fn replace(&self, table: [f32; MAX_NOTES]) {
        *self.inner.lock() = table;
    }

    /// Run `f` with a consistent view of the table, holding the lock.
    pub fn with_table<R>(&self, f: impl FnOnce(&[f32; MAX_NOTES]) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> [f32; MAX_NOTES] {
        *self.inner.lock()
    }

    pub fn get(&self, note: usize) -> f32 {
        self.inner.lock()[note]
    }
}

impl Default for AmplitudeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_silent() {
        let table = AmplitudeTable::new();
        assert!(table.snapshot().iter().all(|&a| a == 0.0));
    }

    #[test]
    fn replace_overwrites_everything() {
        let table = AmplitudeTable::new();
        let mut first = [0.0; MAX_NOTES];
        first[3] = 0.7;
        first[40] = 0.2;
        table.replace(first);

        let mut second = [0.0; MAX_NOTES];
        second[10] = 0.1;
        table.replace(second);

        let snap = table.snapshot();
        assert_eq!(snap[3], 0.0, "Old values must not survive a replace");
        assert_eq!(snap[40], 0.0);
        assert_eq!(snap[10], 0.1);
    }

    #[test]
    fn clones_share_state() {
        let table = AmplitudeTable::new();
        let writer = table.clone();
        writer.replace([0.5; MAX_NOTES]);
        assert_eq!(table.get(95), 0.5);
    }

    #[test]
    fn concurrent_reads_never_tear() {
        let table = AmplitudeTable::new();
        let writer = table.clone();

        std::thread::scope(|s| {
            s.spawn(move || {
                for i in 0..2000 {
                    let value = if i % 2 == 0 { 0.25 } else { 0.75 };
                    writer.replace([value; MAX_NOTES]);
                }
            });

            for _ in 0..2000 {
                table.with_table(|amps| {
                    let first = amps[0];
                    assert!(
                        amps.iter().all(|&a| a == first),
                        "Render pass observed a mix of two tables"
                    );
                });
            }
        });
    }
}
