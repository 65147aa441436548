//! Claim-status bitmask.
//!
//! A claim status is a subset of five flags packed into a small integer. Valid
//! codes lie in 1..=31 and never combine contradictory ownership flags.

use serde::Serialize;

/// One claim-status flag. The discriminant is its bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ClaimFlag {
    Ok = 1,
    Water = 2,
    SelfOwned = 4,
    OtherOwned = 8,
    NotAdjacent = 16,
}

/// All flags, highest bit first. This is the decode order.
pub const FLAGS_DESCENDING: [ClaimFlag; 5] = [
    ClaimFlag::NotAdjacent,
    ClaimFlag::OtherOwned,
    ClaimFlag::SelfOwned,
    ClaimFlag::Water,
    ClaimFlag::Ok,
];

/// Sum of every flag value.
pub const MAX_CODE: i32 = 31;

impl ClaimFlag {
    /// The flag's bit value.
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// The flag's snake_case name.
    pub const fn name(self) -> &'static str {
        match self {
            ClaimFlag::Ok => "ok",
            ClaimFlag::Water => "water",
            ClaimFlag::SelfOwned => "self_owned",
            ClaimFlag::OtherOwned => "other_owned",
            ClaimFlag::NotAdjacent => "not_adjacent",
        }
    }

    /// Parses a snake_case flag name.
    pub fn from_name(name: &str) -> Option<ClaimFlag> {
        FLAGS_DESCENDING.iter().copied().find(|f| f.name() == name)
    }
}

/// Decodes `code` into its flags, highest bit first.
///
/// Each flag is tested by whole division against the running remainder and
/// subtracted once when present, so codes outside 0..=31 decode to whatever
/// that walk yields rather than to a raw bit test.
pub fn decode(code: i32) -> Vec<ClaimFlag> {
    let mut rest = code;
    let mut flags = Vec::new();
    for flag in FLAGS_DESCENDING {
        if rest / flag.value() == 1 {
            flags.push(flag);
            rest -= flag.value();
        }
    }
    flags
}

/// Sums the flag values. Inverse of [`decode`] for duplicate-free input.
pub fn encode(flags: &[ClaimFlag]) -> i32 {
    flags.iter().map(|f| f.value()).sum()
}

/// Returns true if `code` is in range and free of contradictory flags.
pub fn is_valid(code: i32) -> bool {
    if !(1..=MAX_CODE).contains(&code) {
        return false;
    }
    ClaimStatus::from_flags(&decode(code)).is_consistent()
}

/// A set of claim flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClaimStatus(u8);

impl ClaimStatus {
    pub const EMPTY: ClaimStatus = ClaimStatus(0);

    /// Collects `flags` into a set.
    pub fn from_flags(flags: &[ClaimFlag]) -> Self {
        let mut status = ClaimStatus::EMPTY;
        for f in flags {
            status.insert(*f);
        }
        status
    }

    /// Adds `flag` to the set.
    pub fn insert(&mut self, flag: ClaimFlag) {
        self.0 |= flag as u8;
    }

    /// Returns the set with `flag` added.
    pub fn with(mut self, flag: ClaimFlag) -> Self {
        self.insert(flag);
        self
    }

    /// Returns true if `flag` is in the set.
    pub const fn contains(self, flag: ClaimFlag) -> bool {
        self.0 & flag as u8 != 0
    }

    /// Returns true if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The integer claim-status code.
    pub const fn code(self) -> i32 {
        self.0 as i32
    }

    /// Flags in the set, highest bit first.
    pub fn flags(self) -> Vec<ClaimFlag> {
        FLAGS_DESCENDING.iter().copied().filter(|f| self.contains(*f)).collect()
    }

    /// Non-empty and free of ownership contradictions.
    pub fn is_valid(self) -> bool {
        !self.is_empty() && self.is_consistent()
    }

    fn is_consistent(self) -> bool {
        let both = |a, b| self.contains(a) && self.contains(b);
        !(both(ClaimFlag::SelfOwned, ClaimFlag::OtherOwned)
            || both(ClaimFlag::Ok, ClaimFlag::OtherOwned)
            || both(ClaimFlag::Ok, ClaimFlag::SelfOwned))
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.flags().iter().map(|flag| flag.name()).collect();
        write!(f, "{} [{}]", self.code(), names.join(", "))
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}
