use thiserror::Error;

/// Why a switch could not be added to the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Unrecognised switch kind or circuit type.
    #[error("invalid switch kind or circuit type")]
    InvalidParameters,
    /// Every slot in the table is already in use.
    #[error("no free switch slots")]
    CapacityExceeded,
}

/// Why an output pin could not be linked to (or unlinked from) a switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The id does not name a registered switch.
    #[error("no such switch")]
    NoSuchSwitch,
    /// Unlink requested for a switch without a linked output.
    #[error("switch has no linked output")]
    NotLinked,
}

/// The switch table could not be built with the requested capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapacityError {
    #[error("capacity {requested} exceeds the {max} available slots")]
    TooLarge { requested: usize, max: usize },
}
