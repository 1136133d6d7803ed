//! Trigger wheel catalog.
//!
//! A trigger wheel is described by its nominal tooth count and the number of
//! teeth removed to form the sync gap. Present teeth come first, the gap
//! occupies the last `missing` positions of the revolution.
//!
//! The catalog is a fixed `static` table, created at compile time and never
//! mutated, so both the console and the timer ISR can read it without
//! synchronization.

/// A single tooth wheel pattern (e.g. `36-1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToothWheel {
    /// Display name, conventionally `<teeth>-<missing>`.
    pub name: &'static str,
    /// Nominal tooth count per revolution (present + missing).
    pub teeth: u16,
    /// Teeth removed to form the sync gap.
    pub missing: u16,
}

impl ToothWheel {
    /// Define a wheel.
    ///
    /// Panics (at compile time when used in a `static`) unless
    /// `teeth > 0` and `missing < teeth`, i.e. at least one tooth is present.
    pub const fn new(name: &'static str, teeth: u16, missing: u16) -> Self {
        assert!(teeth > 0, "wheel needs at least one tooth");
        assert!(missing < teeth, "wheel needs at least one present tooth");

        Self { name, teeth, missing }
    }

    /// Number of physically present teeth.
    #[inline]
    pub const fn present_teeth(&self) -> u16 {
        self.teeth - self.missing
    }

    /// True if `tooth` is a present tooth, false inside the gap.
    #[inline]
    pub const fn is_present(&self, tooth: u16) -> bool {
        tooth < self.present_teeth()
    }
}

/// Wheels offered by the emulator, in selection order.
pub static WHEELS: [ToothWheel; 5] = [
    ToothWheel::new("36-1", 36, 1),
    ToothWheel::new("60-2", 60, 2),
    ToothWheel::new("24-1", 24, 1),
    ToothWheel::new("12-2", 12, 2),
    ToothWheel::new("12-0", 12, 0),
];

/// Process-wide catalog over [`WHEELS`].
pub static CATALOG: WheelCatalog = WheelCatalog::new(&WHEELS);

/// Catalog lookup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelError {
    /// Index is not in `0..count`.
    InvalidIndex { index: usize, count: usize },
}

impl core::fmt::Display for WheelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidIndex { index, count } => {
                write!(f, "wheel index {} out of range (0..{})", index, count)
            }
        }
    }
}

/// Ordered, immutable list of tooth wheels.
#[derive(Debug, Clone, Copy)]
pub struct WheelCatalog {
    wheels: &'static [ToothWheel],
}

impl WheelCatalog {
    /// Wrap a static wheel table.
    pub const fn new(wheels: &'static [ToothWheel]) -> Self {
        Self { wheels }
    }

    /// Get wheel by index.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&'static ToothWheel, WheelError> {
        self.wheels.get(index).ok_or(WheelError::InvalidIndex {
            index,
            count: self.wheels.len(),
        })
    }

    /// Number of wheels.
    #[inline]
    pub fn len(&self) -> usize {
        self.wheels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wheels.is_empty()
    }

    /// Iterate wheels in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &'static ToothWheel> {
        self.wheels.iter()
    }
}
