//! Wash-cycle catalog.
//!
//! Three fixed programs, selectable from the carousel. The table is
//! immutable; the only derived value is the total run time.

/// Parameters of one wash program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Label shown under the cycle icon.
    pub name: &'static str,
    /// Minutes spent in each rinse.
    pub rinse_minutes: u32,
    /// Number of rinses.
    pub rinse_count: u32,
    /// Spin speed.
    pub spin_rpm: u32,
    /// Minutes spent spinning.
    pub spin_minutes: u32,
    /// Heavy-duty agitation.
    pub heavy: bool,
    /// Bubble wash enabled.
    pub bubbles: bool,
}

/// Selectable programs, in carousel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleKind {
    Daily,
    Heavy,
    Quick,
}

impl CycleKind {
    /// All programs in carousel order.
    pub const ALL: [CycleKind; 3] = [CycleKind::Daily, CycleKind::Heavy, CycleKind::Quick];

    /// Position in [`CATALOG`].
    pub const fn index(self) -> usize {
        match self {
            CycleKind::Daily => 0,
            CycleKind::Heavy => 1,
            CycleKind::Quick => 2,
        }
    }

    /// Carousel step to the right (wraps quick → daily).
    pub const fn next(self) -> Self {
        match self {
            CycleKind::Daily => CycleKind::Heavy,
            CycleKind::Heavy => CycleKind::Quick,
            CycleKind::Quick => CycleKind::Daily,
        }
    }

    /// Carousel step to the left (wraps daily → quick).
    pub const fn prev(self) -> Self {
        match self {
            CycleKind::Daily => CycleKind::Quick,
            CycleKind::Heavy => CycleKind::Daily,
            CycleKind::Quick => CycleKind::Heavy,
        }
    }

    pub fn cycle(self) -> &'static Cycle {
        &CATALOG[self.index()]
    }
}

/// The program table, indexed by [`CycleKind::index`].
pub static CATALOG: [Cycle; 3] = [
    Cycle {
        name: "LAVAGEM DIARIA",
        rinse_minutes: 15,
        rinse_count: 2,
        spin_rpm: 1200,
        spin_minutes: 8,
        heavy: false,
        bubbles: true,
    },
    Cycle {
        name: "LAVAGEM PESADA",
        rinse_minutes: 10,
        rinse_count: 3,
        spin_rpm: 1200,
        spin_minutes: 10,
        heavy: true,
        bubbles: true,
    },
    Cycle {
        name: "LAVAGEM RAPIDA",
        rinse_minutes: 5,
        rinse_count: 3,
        spin_rpm: 900,
        spin_minutes: 5,
        heavy: false,
        bubbles: true,
    },
];

/// Total run time in minutes: the spin plus every rinse.
pub fn total_duration(cycle: &Cycle) -> u32 {
    cycle
        .rinse_count
        .saturating_mul(cycle.rinse_minutes)
        .saturating_add(cycle.spin_minutes)
}
