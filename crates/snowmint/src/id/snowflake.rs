use core::fmt;

/// A 64-bit Snowflake ID.
///
/// - 42 bits timestamp (ms since the generator's epoch)
/// - 10 bits machine ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63             22 21             12 11             0
///              +----------------+-----------------+---------------+
///  Field:      | timestamp (42) | machine ID (10) | sequence (12) |
///              +----------------+-----------------+---------------+
///              |<----- MSB --------- 64 bits --------- LSB ------>|
/// ```
///
/// The layout is part of the wire format: IDs compare in the same order as
/// their raw `u64` values, which is timestamp first, then machine ID, then
/// sequence.
///
/// # Example
///
/// ```
/// use snowmint::SnowflakeId;
///
/// let id = SnowflakeId::from_components(1000, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.machine_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// assert_eq!(id.to_raw(), (1000 << 22) | (2 << 12) | 1);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 42;

    /// Width of the machine ID field.
    pub const MACHINE_ID_BITS: u32 = 10;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 10-bit machine ID field. Occupies bits 12
    /// through 21.
    pub const MACHINE_ID_MASK: u64 = (1 << Self::MACHINE_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its correct position.
    pub const TIMESTAMP_SHIFT: u32 = Self::MACHINE_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the machine ID to its correct position.
    pub const MACHINE_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Packs the three fields into an ID. Each field is masked to its width,
    /// so an oversized value never spills into its neighbour.
    pub const fn from_components(timestamp: u64, machine_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | machine_id | sequence,
        }
    }

    /// Wraps a raw value. Any `u64` is a structurally valid ID.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the packed `u64`.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp (ticks since the epoch) from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the machine ID from the packed ID.
    pub const fn machine_id(&self) -> u64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns `(timestamp, machine_id, sequence)`.
    pub const fn decompose(&self) -> (u64, u64, u64) {
        (self.timestamp(), self.machine_id(), self.sequence())
    }

    /// Largest encodable timestamp.
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Largest encodable machine ID.
    pub const fn max_machine_id() -> u64 {
        Self::MACHINE_ID_MASK
    }

    /// Largest encodable sequence.
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }
}

/// Splits a raw ID into `(timestamp, machine_id, sequence)`.
///
/// This never fails: values that were not produced by a generator simply
/// decompose into fields with no external meaning. The timestamp is relative
/// to whichever epoch minted the ID; see
/// [`LockSnowflakeGenerator::system_time_of`] to recover wall-clock time.
///
/// ```
/// let (ts, machine_id, seq) = snowmint::decompose_parts((7 << 22) | (3 << 12) | 9);
/// assert_eq!((ts, machine_id, seq), (7, 3, 9));
/// ```
///
/// [`LockSnowflakeGenerator::system_time_of`]: crate::LockSnowflakeGenerator::system_time_of
pub const fn decompose_parts(id: u64) -> (u64, u64, u64) {
    SnowflakeId::from_raw(id).decompose()
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("machine_id", &self.machine_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_and_bounds() {
        let ts = SnowflakeId::max_timestamp();
        let mid = SnowflakeId::max_machine_id();
        let seq = SnowflakeId::max_sequence();

        let id = SnowflakeId::from_components(ts, mid, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.machine_id(), mid);
        assert_eq!(id.sequence(), seq);
        assert_eq!(id.to_raw(), u64::MAX);
        assert_eq!(ts, (1 << 42) - 1);
        assert_eq!(mid, 1023);
        assert_eq!(seq, 4095);
    }

    #[test]
    fn layout_consumes_exactly_64_bits() {
        assert_eq!(
            SnowflakeId::TIMESTAMP_BITS + SnowflakeId::MACHINE_ID_BITS + SnowflakeId::SEQUENCE_BITS,
            64
        );
        assert_eq!(SnowflakeId::TIMESTAMP_SHIFT, 22);
        assert_eq!(SnowflakeId::MACHINE_ID_SHIFT, 12);
    }

    #[test]
    fn oversized_fields_do_not_corrupt_neighbours() {
        let id = SnowflakeId::from_components(1, 1024 + 5, 4096 + 7);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.machine_id(), 5);
        assert_eq!(id.sequence(), 7);
    }

    #[test]
    fn decompose_parts_matches_accessors() {
        let raw = (123_456_789 << 22) | (512 << 12) | 4000;
        let id = SnowflakeId::from_raw(raw);
        assert_eq!(decompose_parts(raw), (123_456_789, 512, 4000));
        assert_eq!(decompose_parts(raw), id.decompose());
    }

    #[test]
    fn decompose_parts_accepts_any_value() {
        assert_eq!(decompose_parts(0), (0, 0, 0));
        assert_eq!(
            decompose_parts(u64::MAX),
            (
                SnowflakeId::max_timestamp(),
                SnowflakeId::max_machine_id(),
                SnowflakeId::max_sequence()
            )
        );
    }

    #[test]
    fn ordering_follows_timestamp_then_sequence() {
        let a = SnowflakeId::from_components(10, 1, 4095);
        let b = SnowflakeId::from_components(11, 0, 0);
        let c = SnowflakeId::from_components(11, 0, 1);
        assert!(a < b && b < c);
        assert!(a.to_raw() < b.to_raw());
    }

    #[test]
    fn display_is_raw_decimal() {
        let id = SnowflakeId::from_raw(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(u64::from(id), 42);
        assert_eq!(SnowflakeId::from(42u64), id);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_is_transparent() {
        let id = SnowflakeId::from_components(5, 6, 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.to_raw().to_string());
        let back: SnowflakeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
