//! Last known value of every report.

use rxvlib_core::UNKNOWN_VALUE;

/// Raw value per report identifier, [`UNKNOWN_VALUE`] until observed.
#[derive(Clone, PartialEq, Eq)]
pub struct StatusCache {
    values: [u8; 256],
}

impl StatusCache {
    /// A cache with every report unknown.
    pub fn new() -> Self {
        StatusCache {
            values: [UNKNOWN_VALUE; 256],
        }
    }

    /// Cached value of report `id`.
    pub fn get(&self, id: u8) -> u8 {
        self.values[usize::from(id)]
    }

    /// Store `value` for report `id`, returning the previous value.
    pub fn set(&mut self, id: u8, value: u8) -> u8 {
        std::mem::replace(&mut self.values[usize::from(id)], value)
    }

    /// Whether report `id` has a known value.
    pub fn is_known(&self, id: u8) -> bool {
        self.get(id) != UNKNOWN_VALUE
    }

    /// Identifiers and values of every known report.
    pub fn known(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..=u8::MAX)
            .map(|id| (id, self.get(id)))
            .filter(|&(_, value)| value != UNKNOWN_VALUE)
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatusCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.known()).finish()
    }
}
